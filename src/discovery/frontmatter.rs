//! Two-stage front matter parsing
//!
//! Stage one splits the document on the leading `---` delimiter pair; stage
//! two hands the header region to the YAML parser. A document without front
//! matter is the valid empty-metadata case, not an error: `metadata` is
//! `Null` and the body is the whole document. A header that fails to parse
//! is treated the same way.

use serde_yaml::Value;

/// Parsed document: optional metadata block plus the remaining body
#[derive(Debug, Clone)]
pub struct FrontMatter {
    pub metadata: Value,
    pub body: String,
}

impl FrontMatter {
    fn absent(content: &str) -> Self {
        Self {
            metadata: Value::Null,
            body: content.to_string(),
        }
    }

    #[allow(dead_code)] // used in tests
    pub fn has_metadata(&self) -> bool {
        self.metadata.as_mapping().is_some()
    }
}

/// Parse a document into front matter and body
pub fn parse(content: &str) -> FrontMatter {
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return FrontMatter::absent(content);
    }

    let Some(close) = lines[1..].iter().position(|l| l.trim() == "---") else {
        return FrontMatter::absent(content);
    };
    let close = close + 1;

    let header = lines[1..close].join("\n");
    let body = lines[close + 1..].join("\n");

    match serde_yaml::from_str::<Value>(&header) {
        Ok(metadata) if metadata.as_mapping().is_some() => FrontMatter { metadata, body },
        _ => FrontMatter::absent(content),
    }
}

/// Read a string field from parsed metadata (numbers and bools stringify)
pub fn str_field(metadata: &Value, key: &str) -> Option<String> {
    let mapping = metadata.as_mapping()?;
    match mapping.get(Value::String(key.to_string()))? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a boolean field, accepting `true` and `"true"`
pub fn bool_field(metadata: &Value, key: &str) -> bool {
    let Some(mapping) = metadata.as_mapping() else {
        return false;
    };
    match mapping.get(Value::String(key.to_string())) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_front_matter() {
        let doc = "---\nname: Dev\ndescription: Builds things\n---\n\n# Body\n";
        let parsed = parse(doc);

        assert!(parsed.has_metadata());
        assert_eq!(str_field(&parsed.metadata, "name").as_deref(), Some("Dev"));
        assert_eq!(parsed.body.trim(), "# Body");
    }

    #[test]
    fn test_parse_absent_is_valid_empty() {
        let doc = "# Just markdown\n\nNo metadata here.\n";
        let parsed = parse(doc);

        assert!(!parsed.has_metadata());
        assert_eq!(parsed.body.trim_end(), doc.trim_end());
    }

    #[test]
    fn test_parse_unterminated_block_is_absent() {
        let doc = "---\nname: Dev\nbody without closing delimiter\n";
        let parsed = parse(doc);
        assert!(!parsed.has_metadata());
    }

    #[test]
    fn test_parse_malformed_header_is_absent() {
        let doc = "---\n: [ not yaml\n---\nbody\n";
        let parsed = parse(doc);
        assert!(!parsed.has_metadata());
    }

    #[test]
    fn test_bool_field_accepts_string_true() {
        let parsed = parse("---\nstandalone: \"true\"\nother: false\n---\n");
        assert!(bool_field(&parsed.metadata, "standalone"));
        assert!(!bool_field(&parsed.metadata, "other"));
        assert!(!bool_field(&parsed.metadata, "missing"));
    }

    #[test]
    fn test_str_field_stringifies_scalars() {
        let parsed = parse("---\nversion: 2\nenabled: true\n---\n");
        assert_eq!(str_field(&parsed.metadata, "version").as_deref(), Some("2"));
        assert_eq!(str_field(&parsed.metadata, "enabled").as_deref(), Some("true"));
    }
}
