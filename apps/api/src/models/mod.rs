pub mod analysis;
pub mod career;
pub mod credits;
pub mod jobs;
pub mod pipeline;
pub mod profile;
