pub mod constants;
pub mod pagination;
pub mod tracing;
