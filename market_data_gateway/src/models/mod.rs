pub mod interval;
pub mod operation;
pub mod payload;
pub mod query;
pub mod records;
