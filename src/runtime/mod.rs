pub mod class;
pub mod hierarchy;
