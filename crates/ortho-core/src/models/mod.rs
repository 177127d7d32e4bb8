pub mod field;
pub mod patient;
pub mod plan;
