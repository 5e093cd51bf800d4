//! XML text helpers for compiled documents

/// Escape special characters for safe embedding in XML text and attributes
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Extract an attribute value from raw tag text (`attr="value"`)
pub fn extract_attribute(tag: &str, attr: &str) -> Option<String> {
    let needle = format!("{attr}=");
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Collapse a multi-line text field to a single trimmed line
pub fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml_all_specials() {
        assert_eq!(
            escape_xml(r#"<a & "b" 'c'>"#),
            "&lt;a &amp; &quot;b&quot; &apos;c&apos;&gt;"
        );
    }

    #[test]
    fn test_escape_xml_ampersand_first() {
        // escaping must not double-escape the entities it produces
        assert_eq!(escape_xml("<"), "&lt;");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_extract_attribute() {
        let tag = r#"<task standalone="true" name='run'>"#;
        assert_eq!(extract_attribute(tag, "standalone").as_deref(), Some("true"));
        assert_eq!(extract_attribute(tag, "name").as_deref(), Some("run"));
        assert_eq!(extract_attribute(tag, "missing"), None);
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse("  line one\n\n  line two\t end  "), "line one line two end");
    }
}
