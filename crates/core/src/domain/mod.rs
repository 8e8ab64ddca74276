mod lenient;
pub mod plan;
pub mod task;
