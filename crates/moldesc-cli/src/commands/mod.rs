pub mod catalog;
pub mod compute;
