// Shared prompt fragments.
// Each gateway operation builds its own prompt in gateway/prompts.rs;
// this file only holds cross-cutting instructions.

/// Appended to every structured-output prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only, matching the declared response schema exactly. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Keeps rewritten content tied to what the user actually wrote.
pub const FIDELITY_INSTRUCTION: &str = "\
    Never invent employers, schools, dates, degrees or contact details. \
    Rephrase and reorder what is present; leave a field empty when the source is silent.";

/// Fills `{name}` placeholders in one pass, so braces inside substituted
/// values are never treated as placeholders. Unknown names are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match replaced {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_names() {
        let out = fill_template("Hi {name}, from {place}.", &[("name", "Ada"), ("place", "London")]);
        assert_eq!(out, "Hi Ada, from London.");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_json_braces() {
        let out = fill_template("{\"a\": {x}} {missing}", &[("x", "1")]);
        assert_eq!(out, "{\"a\": 1} {missing}");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{a}|{b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b}|B");
    }
}
