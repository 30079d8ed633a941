pub mod plan;
pub mod task;
