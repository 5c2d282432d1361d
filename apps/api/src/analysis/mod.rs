// Career path analysis: score the industry's catalog against the user,
// split into immediate / future roles, attach skill gaps and job suggestions,
// and keep every run as its own row.

pub mod handlers;
pub mod history;
