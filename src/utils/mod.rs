pub mod excel;
pub mod tracing;
