pub mod c17;
pub mod c18;
pub mod c22;
pub mod c23;
pub mod c24;
