use serde::Deserialize;
use tracing::info;

use crate::documents::prompts::{build_documents_prompt, DOCUMENTS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::jobs::JobPostingRow;
use crate::models::profile::UserProfile;

#[derive(Debug, Deserialize)]
pub struct DraftedDocuments {
    pub resume_markdown: String,
    pub cover_letter_markdown: String,
}

impl DraftedDocuments {
    /// Both documents must have content; a blank one means the model failed.
    pub fn validate(self) -> Result<Self, AppError> {
        if self.resume_markdown.trim().is_empty() {
            return Err(AppError::Llm("Model returned an empty resume".into()));
        }
        if self.cover_letter_markdown.trim().is_empty() {
            return Err(AppError::Llm("Model returned an empty cover letter".into()));
        }
        Ok(self)
    }
}

pub async fn draft_documents(
    llm: &LlmClient,
    profile: &UserProfile,
    posting: &JobPostingRow,
) -> Result<DraftedDocuments, AppError> {
    let prompt = build_documents_prompt(profile, posting);
    let system = format!("{DOCUMENTS_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

    let drafted: DraftedDocuments = llm.call_json(&prompt, &system).await?;
    let drafted = drafted.validate()?;

    info!(
        "Drafted documents for posting {} (resume {} chars, cover letter {} chars)",
        posting.id,
        drafted.resume_markdown.len(),
        drafted.cover_letter_markdown.len()
    );
    Ok(drafted)
}
