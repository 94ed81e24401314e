pub mod fields;
pub mod limit;
pub mod parse;
pub mod save;
