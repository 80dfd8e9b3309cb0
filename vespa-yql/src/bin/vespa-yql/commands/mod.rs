pub mod build;
pub mod demo;
