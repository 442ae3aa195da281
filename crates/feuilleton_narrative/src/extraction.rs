//! Helpers for pulling JSON out of model replies.
//!
//! Models asked for JSON often wrap it in markdown fences or add a sentence
//! before it.

/// Remove markdown code fence markers and surrounding whitespace.
///
/// Both the ```` ```json ```` opener and bare ```` ``` ```` markers are removed
/// wherever they occur.
///
/// # Examples
///
/// ```
/// use feuilleton_narrative::strip_code_fences;
///
/// let reply = "```json\n{\"score\": 90}\n```";
/// assert_eq!(strip_code_fences(reply), "{\"score\": 90}");
/// ```
pub fn strip_code_fences(response: &str) -> String {
    response
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Find the first balanced `{ ... }` object in a reply.
///
/// Braces inside JSON strings are ignored.
///
/// # Examples
///
/// ```
/// use feuilleton_narrative::extract_json_object;
///
/// let reply = "Here is my verdict: {\"score\": 72, \"feedback\": \"use {fewer} adverbs\"} Thanks!";
/// let json = extract_json_object(reply).unwrap();
/// assert!(json.ends_with("adverbs\"}"));
/// ```
pub fn extract_json_object(response: &str) -> Option<String> {
    let start = response.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    tracing::debug!(
        response_length = response.len(),
        "Unbalanced JSON object in model reply"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_without_fences_only_trims() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_bare_fences() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_extract_nested_object() {
        let reply = "ok {\"details\": {\"hook\": 3}, \"score\": 9} done";
        assert_eq!(
            extract_json_object(reply).as_deref(),
            Some("{\"details\": {\"hook\": 3}, \"score\": 9}")
        );
    }

    #[test]
    fn test_extract_unbalanced_returns_none() {
        assert_eq!(extract_json_object("{\"score\": 9"), None);
        assert_eq!(extract_json_object("no json"), None);
    }
}
