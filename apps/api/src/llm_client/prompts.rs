// Prompt fragments shared by every LLM caller.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated documents to what the candidate actually told us.
pub const PROFILE_GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use only facts present in the candidate profile. \
    Do NOT invent employers, degrees, certifications, dates or metrics. \
    If the profile lacks something the job asks for, leave it out rather than guessing.";
