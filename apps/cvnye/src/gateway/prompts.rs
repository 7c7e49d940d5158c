// Prompt templates for the three gateway operations.
// Placeholders are `{name}` and are filled with `fill_template` before sending.

/// Trend search. Replace `{target}`, `{domain}` and `{years}`.
pub const TREND_SEARCH_PROMPT: &str = "\
Search for the latest CV trends, essential keywords, and highly valued skills for a {target} \
position in the {domain} domain for {years}. \
Provide a concise summary of what recruiters are looking for.";

/// Raw text to structured record. Replace `{json_only}` and `{raw_text}`.
pub const EXTRACT_PROMPT: &str = "\
Extract CV information from the following text and format it as JSON. \
Give every experience, education and project entry a short unique id. \
{json_only}

TEXT:
{raw_text}";

/// Analysis and rewrite. Replace every placeholder before sending.
pub const ANALYZE_PROMPT: &str = r#"You are an expert career coach and professional resume writer.

USER CONTEXT:
- Domain: {domain}
- Target: {target}
- Duration: {duration}
- Additional Info: {additional_info}

MARKET TRENDS:
{trends}

CURRENT CV DATA:
{cv_json}

TASK:
1. Analyze the current CV against the market trends and user goals.
2. Provide specific suggestions for improvement.
3. Identify missing keywords.
4. Rewrite the CV content (summary, experience descriptions) to be more impactful, professional, and optimized for ATS (Applicant Tracking Systems).

{fidelity}

{json_only}"#;
