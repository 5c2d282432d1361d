// Credit ledger: per-user balances gating paid generation (reports, documents).
// Invariant: used_credits <= total_credits. Deductions are a single conditional
// write, never read-then-write.

pub mod handlers;
pub mod ledger;

/// Cost of one advisory report.
pub const ADVISORY_REPORT_COST: i32 = 10;
/// Cost of one resume + cover letter pair.
pub const DOCUMENT_GENERATION_COST: i32 = 5;
/// Credits granted on a user's first intake submission.
pub const INITIAL_CREDITS: i32 = 30;
