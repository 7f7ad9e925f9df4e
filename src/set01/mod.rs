pub mod c02;
pub mod c08;
