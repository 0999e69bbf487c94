//! Export binding resolution.
//!
//! Decides how a generated test file will import a symbol. An `importStyle`
//! containing a brace-delimited identifier (`{name}`) is a named-export
//! binding; any other non-empty style is a default-export binding used
//! verbatim. The qualified name (the record's `longName`) is carried through
//! for suite labeling only — import resolution never looks at it.

use crate::error::PublishError;
use crate::record::DocumentationRecord;
use regex::Regex;
use std::sync::LazyLock;

static RE_NAMED_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// How a symbol is bound in the generated import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBinding {
    pub is_default: bool,
    pub import_name: String,
    pub qualified_name: String,
}

/// Resolve a record's export binding.
///
/// Fails when the record is not marked exported — only exported symbols can
/// be imported by a generated test. A missing `importStyle` falls back to
/// the record's own name as a default binding; a missing `longName` falls
/// back to the name for labeling.
pub fn resolve_binding(record: &DocumentationRecord) -> Result<ExportBinding, PublishError> {
    if !record.exported {
        return Err(PublishError::NotExported {
            name: record.name.clone(),
        });
    }

    let style = record
        .import_style
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&record.name);

    let (is_default, import_name) = match RE_NAMED_BINDING.captures(style) {
        Some(caps) => (false, caps[1].to_string()),
        None => (true, style.to_string()),
    };

    Ok(ExportBinding {
        is_default,
        import_name,
        qualified_name: record
            .long_name
            .clone()
            .unwrap_or_else(|| record.name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exported: bool, import_style: Option<&str>, long_name: Option<&str>) -> DocumentationRecord {
        DocumentationRecord {
            name: "widget".to_string(),
            exported,
            import_style: import_style.map(str::to_string),
            long_name: long_name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn braced_style_is_named_binding() {
        let binding = resolve_binding(&record(true, Some("{widget}"), Some("src/widget.js~widget"))).unwrap();
        assert!(!binding.is_default);
        assert_eq!(binding.import_name, "widget");
        assert_eq!(binding.qualified_name, "src/widget.js~widget");
    }

    #[test]
    fn bare_style_is_default_binding() {
        let binding = resolve_binding(&record(true, Some("widget"), None)).unwrap();
        assert!(binding.is_default);
        assert_eq!(binding.import_name, "widget");
    }

    #[test]
    fn unexported_record_fails() {
        let err = resolve_binding(&record(false, Some("{widget}"), None)).unwrap_err();
        assert!(matches!(err, PublishError::NotExported { .. }));
    }

    #[test]
    fn missing_style_falls_back_to_name() {
        let binding = resolve_binding(&record(true, None, None)).unwrap();
        assert!(binding.is_default);
        assert_eq!(binding.import_name, "widget");
    }

    #[test]
    fn missing_long_name_falls_back_to_name() {
        let binding = resolve_binding(&record(true, Some("{widget}"), None)).unwrap();
        assert_eq!(binding.qualified_name, "widget");
    }

    #[test]
    fn surrounding_text_still_matches_braced_identifier() {
        // Extractors wrap the binding in extra prose, e.g. "import {x} from 'y'".
        let binding = resolve_binding(&record(true, Some("import {widget} from 'widget'"), None)).unwrap();
        assert!(!binding.is_default);
        assert_eq!(binding.import_name, "widget");
    }
}
