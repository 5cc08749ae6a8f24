// Cross-cutting prompt fragments shared by all agents.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps agents from inventing capabilities the freelancer does not have.
pub const HONESTY_INSTRUCTION: &str = "Ground every claim in the provided \
    profile and plan. Never invent skills, achievements, or portfolio items \
    that are not present in the input.";
