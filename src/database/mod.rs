pub mod column;
pub mod range;
pub mod table;
pub mod value;
