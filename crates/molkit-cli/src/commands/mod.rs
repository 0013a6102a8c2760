pub mod build;
pub mod elements;
