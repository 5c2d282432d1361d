use crate::models::jobs::JobPostingRow;
use crate::models::profile::UserProfile;

pub const DOCUMENTS_SYSTEM: &str = "You are an expert career writer who tailors resumes \
    and cover letters to a specific job posting. You write in clear, concrete Markdown.";

/// Prompt asking for a tailored resume and cover letter as one JSON object.
/// Placeholders: {grounding}, {profile_summary}, {job_summary}.
pub const DOCUMENTS_PROMPT_TEMPLATE: &str = r#"Write a tailored resume and cover letter for the candidate below, targeting the job below.

{grounding}

## Candidate
{profile_summary}

## Job
{job_summary}

Return a JSON object with exactly these keys:
{"resume_markdown": "<full resume in Markdown>", "cover_letter_markdown": "<cover letter in Markdown, addressed to the company>"}"#;

pub fn build_documents_prompt(profile: &UserProfile, posting: &JobPostingRow) -> String {
    DOCUMENTS_PROMPT_TEMPLATE
        .replace(
            "{grounding}",
            crate::llm_client::prompts::PROFILE_GROUNDING_INSTRUCTION,
        )
        .replace("{profile_summary}", &profile_summary(profile))
        .replace("{job_summary}", &job_summary(posting))
}

fn profile_summary(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!("Name: {}", profile.name),
        format!("Email: {}", profile.email),
    ];

    if !profile.technical_skills.is_empty() {
        lines.push(format!("Technical skills: {}", profile.technical_skills.join(", ")));
    }
    if !profile.soft_skills.is_empty() {
        lines.push(format!("Soft skills: {}", profile.soft_skills.join(", ")));
    }

    for edu in &profile.education {
        let spec = edu
            .specialization
            .as_deref()
            .map(|s| format!(" in {s}"))
            .unwrap_or_default();
        let status = if edu.is_completed() { "completed" } else { "pursuing" };
        lines.push(format!("Education: {}{} ({})", edu.degree, spec, status));
    }

    for exp in &profile.experience {
        let mut line = format!("Experience: {} at {}", exp.role, exp.company);
        if let Some(duration) = &exp.duration {
            line.push_str(&format!(" ({duration})"));
        }
        if let Some(desc) = &exp.description {
            line.push_str(&format!(": {desc}"));
        }
        lines.push(line);
    }

    for project in &profile.projects {
        let mut line = format!("Project: {}", project.name);
        if !project.technologies.is_empty() {
            line.push_str(&format!(" [{}]", project.technologies.join(", ")));
        }
        if let Some(desc) = &project.description {
            line.push_str(&format!(": {desc}"));
        }
        lines.push(line);
    }

    for cert in &profile.certifications {
        match &cert.issuer {
            Some(issuer) => lines.push(format!("Certification: {} ({issuer})", cert.name)),
            None => lines.push(format!("Certification: {}", cert.name)),
        }
    }

    lines.join("\n")
}

fn job_summary(posting: &JobPostingRow) -> String {
    let mut lines = vec![
        format!("Title: {}", posting.job_title),
        format!("Company: {}", posting.company),
        format!("Location: {}", posting.location),
    ];
    if !posting.required_skills.is_empty() {
        lines.push(format!("Required skills: {}", posting.required_skills.join(", ")));
    }
    for r in &posting.responsibilities {
        lines.push(format!("- {r}"));
    }
    if let Some(summary) = &posting.summary {
        lines.push(format!("Summary: {summary}"));
    }
    lines.join("\n")
}
