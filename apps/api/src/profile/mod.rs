pub mod completeness;
pub mod handlers;
pub mod intake;
pub mod repository;
