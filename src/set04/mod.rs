pub mod c25;
pub mod c26;
pub mod c27;
