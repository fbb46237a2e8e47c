//! Frontmatter extraction and parsing.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// Metadata mapping parsed from a YAML block.
///
/// Keys are kept sorted so that anything rendered from the mapping is stable
/// between runs.
pub type Metadata = BTreeMap<String, Value>;

const DELIMITER: &str = "---";

/// Extract frontmatter from a markdown source.
///
/// Returns the parsed metadata and the body that follows the closing
/// delimiter. A source that does not open with a `---` line has no
/// frontmatter: the metadata is empty and the whole source is the body.
pub fn extract_frontmatter(source: &str) -> Result<(Metadata, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let (first, after_open) = split_line(trimmed);
    if first.trim_end() != DELIMITER {
        return Ok((Metadata::new(), source));
    }

    // Find the closing ---
    let mut cursor = after_open;
    loop {
        if cursor.is_empty() {
            return Err(FrontmatterError::Unclosed);
        }

        let (line, next) = split_line(cursor);
        if line.trim_end() == DELIMITER {
            let yaml = &after_open[..after_open.len() - cursor.len()];
            let metadata = parse_mapping(yaml)?;
            return Ok((metadata, next.trim_start()));
        }

        cursor = next;
    }
}

/// Parse YAML text whose top level must be a mapping.
///
/// Empty text (or a document that is just `null`) yields an empty mapping.
/// Scalar keys such as numbers and booleans are converted to strings.
pub fn parse_mapping(yaml: &str) -> Result<Metadata, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    let mapping = match value {
        Value::Null => return Ok(Metadata::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontmatterError::NotAMapping),
    };

    mapping
        .into_iter()
        .map(|(key, value)| Ok((key_to_string(key)?, value)))
        .collect()
}

fn key_to_string(key: Value) -> Result<String, FrontmatterError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(FrontmatterError::InvalidKey(format!("{:?}", other))),
    }
}

/// Split off the first line, dropping its newline.
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter must be a mapping of keys to values")]
    NotAMapping,

    #[error("Unsupported frontmatter key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Hello
path: /hello
tags: [intro, news]
---

# Hello World
"#;

        let (meta, content) = extract_frontmatter(source).unwrap();

        assert_eq!(meta["title"], Value::String("Hello".to_string()));
        assert_eq!(meta["path"].as_str(), Some("/hello"));
        assert!(meta["tags"].is_sequence());
        assert_eq!(content, "# Hello World\n");
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (meta, content) = extract_frontmatter(source).unwrap();

        assert!(meta.is_empty());
        assert_eq!(content, source);
    }

    #[test]
    fn horizontal_rule_with_text_is_not_frontmatter() {
        let source = "--- not a delimiter\nbody";

        let (meta, content) = extract_frontmatter(source).unwrap();

        assert!(meta.is_empty());
        assert_eq!(content, source);
    }

    #[test]
    fn handles_empty_block() {
        let (meta, content) = extract_frontmatter("---\n---\nbody").unwrap();

        assert!(meta.is_empty());
        assert_eq!(content, "body");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let source = "---\r\npath: /a\r\n---\r\n# A\r\n";

        let (meta, content) = extract_frontmatter(source).unwrap();

        assert_eq!(meta["path"].as_str(), Some("/a"));
        assert_eq!(content, "# A\r\n");
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let (meta, content) = extract_frontmatter("---\npath: /end\n---").unwrap();

        assert_eq!(meta["path"].as_str(), Some("/end"));
        assert_eq!(content, "");
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn errors_on_non_mapping() {
        let result = parse_mapping("- one\n- two\n");

        assert!(matches!(result, Err(FrontmatterError::NotAMapping)));
    }

    #[test]
    fn stringifies_scalar_keys() {
        let meta = parse_mapping("1: one\ntrue: yes\n").unwrap();

        let keys: Vec<_> = meta.keys().cloned().collect();
        assert_eq!(keys, vec!["1".to_string(), "true".to_string()]);
    }
}
