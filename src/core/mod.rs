pub mod interner;
pub mod value;
