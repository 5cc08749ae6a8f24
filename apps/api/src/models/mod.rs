pub mod history;
pub mod job;
pub mod plan;
pub mod profile;
