//! Prompt helpers: fingerprints and structured-output parsing.

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::BrainError;

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Parse a JSON object out of a model reply.
///
/// Accepts a bare object, an object inside a fenced code block, or an
/// object surrounded by prose.
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T, BrainError> {
    let trimmed = reply.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let candidate = strip_code_fence(trimmed).or_else(|| outer_braces(trimmed));
    match candidate {
        Some(inner) => serde_json::from_str(inner)
            .map_err(|e| BrainError::InvalidOutput(format!("Malformed JSON reply: {}", e))),
        None => Err(BrainError::InvalidOutput(
            "Reply does not contain a JSON object".to_string(),
        )),
    }
}

/// Whether the reply holds something [`parse_json_reply`] would try to parse.
pub(crate) fn contains_json(reply: &str) -> bool {
    let trimmed = reply.trim();
    trimmed.starts_with('{')
        || strip_code_fence(trimmed).is_some()
        || outer_braces(trimmed).is_some()
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip an optional language tag on the opening fence.
    let body_start = after.find('\n')? + 1;
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        summary: String,
    }

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_bare_object() {
        let reply: Reply = parse_json_reply(r#" {"summary": "short"} "#).unwrap();
        assert_eq!(reply.summary, "short");
    }

    #[test]
    fn test_fenced_object() {
        let text = "```json\n{\"summary\": \"fenced\"}\n```";
        let reply: Reply = parse_json_reply(text).unwrap();
        assert_eq!(reply.summary, "fenced");
    }

    #[test]
    fn test_object_in_prose() {
        let text = "Sure! Here it is: {\"summary\": \"inline\"} Hope that helps.";
        let reply: Reply = parse_json_reply(text).unwrap();
        assert_eq!(reply.summary, "inline");
    }

    #[test]
    fn test_no_object() {
        let err = parse_json_reply::<Reply>("no json here").unwrap_err();
        assert!(matches!(err, BrainError::InvalidOutput(_)));
    }

    #[test]
    fn test_wrong_shape() {
        let err = parse_json_reply::<Reply>(r#"{"other": 1}"#).unwrap_err();
        assert!(matches!(err, BrainError::InvalidOutput(_)));
    }

    #[test]
    fn test_contains_json() {
        assert!(contains_json("  {\"a\": 1}"));
        assert!(contains_json("```json\n{}\n```"));
        assert!(contains_json("Here you go:\n```json\n{}\n```"));
        assert!(contains_json("Sure! {\"a\": 1}"));
        assert!(!contains_json("The email says hi."));
    }
}
