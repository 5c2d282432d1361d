// Resume and cover letter generation for a single job posting.
// Paid: DOCUMENT_GENERATION_COST credits per pair, refunded when generation fails.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod storage;
