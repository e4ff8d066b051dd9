//! Mention detection
//!
//! The transport carries mentions as a JSON-encoded array of user ids inside a
//! string field. Anything that does not decode is treated as "no mentions".

use tracing::debug;

/// Decode the transport mention list; malformed or absent input yields an empty list
pub fn parse_mentions(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(mentions) => mentions.unwrap_or_default(),
        Err(e) => {
            debug!(error = %e, raw = %raw, "Ignoring malformed mention list");
            Vec::new()
        }
    }
}

/// Whether `user_id` appears in the mention list
pub fn is_mentioned(mentions: &[String], user_id: &str) -> bool {
    mentions.iter().any(|m| m == user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mentions_valid() {
        let mentions = parse_mentions(Some(r#"["u1","u2"]"#));
        assert_eq!(mentions, vec!["u1".to_string(), "u2".to_string()]);
    }

    #[test]
    fn test_parse_mentions_absent_or_empty() {
        assert!(parse_mentions(None).is_empty());
        assert!(parse_mentions(Some("")).is_empty());
        assert!(parse_mentions(Some("null")).is_empty());
        assert!(parse_mentions(Some("[]")).is_empty());
    }

    #[test]
    fn test_parse_mentions_malformed() {
        assert!(parse_mentions(Some("[\"u1\"")).is_empty());
        assert!(parse_mentions(Some(r#"{"u1": true}"#)).is_empty());
        assert!(parse_mentions(Some("[1, 2]")).is_empty());
    }

    #[test]
    fn test_is_mentioned() {
        let mentions = vec!["u1".to_string(), "u3".to_string()];
        assert!(is_mentioned(&mentions, "u1"));
        assert!(!is_mentioned(&mentions, "u2"));
        assert!(!is_mentioned(&[], "u1"));
    }
}
