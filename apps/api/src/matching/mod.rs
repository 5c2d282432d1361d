// Career path matching: weighted match scoring, reachability tiers and job scanning.
// Everything here is pure; handlers load data and pass it in.

pub mod categorizer;
pub mod jobs;
pub mod scorer;
