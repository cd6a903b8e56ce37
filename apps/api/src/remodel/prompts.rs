// LLM prompt constants for the remodel module. The instruction contract is
// fixed: structured JSON only, controlled kinds, bounded weights.

/// System prompt for keyword extraction — enforces JSON-only output.
pub const KEYWORD_EXTRACT_SYSTEM: &str =
    "You are an assistant that structures job posting requirements into weighted keywords. \
    Keep the posting's original language for each term. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keyword extraction prompt template. Replace `{required}` and `{preferred}`
/// with bulleted section lines before sending.
pub const KEYWORD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract weighted keywords from the qualification sections of a job posting.

Return a JSON object with this EXACT schema (no extra fields):
{"keywords":[{"term":"Spring Boot","weight":0.9,"kind":"TECH"}]}

Rules:
- kind "TECH": technologies — languages, frameworks, databases, infrastructure
- kind "ROLE": roles/positions — 백엔드, 서버 개발, DevOps, Frontend
- kind "ETC": everything else
- weight is between 0.2 and 1.0; more important requirements get higher weights
- merge synonyms and spelling variants into one canonical term (e.g. Spring Boot, JPA, MySQL, AWS)
- every keyword must come from the sections below; do not invent requirements

[REQUIRED QUALIFICATIONS]
{required}

[PREFERRED QUALIFICATIONS]
{preferred}"#;
