//! Documentation record input shape — the external extractor's contract.
//!
//! Records arrive as JSON, either one top-level array (a single batch) or
//! newline-delimited objects (an incremental push stream). Every field other
//! than `kind` defaults when absent: extractors disagree on which fields they
//! populate, and the stream is explicitly allowed to be not-quite-well-formed.

use serde::Deserialize;

/// What a record describes. Unknown kinds deserialize to [`RecordKind::Other`]
/// and are ignored by the publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    File,
    Class,
    Method,
    Function,
    #[default]
    #[serde(other)]
    Other,
}

/// One free-form annotation tag attached to a record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub tag_value: String,
}

/// One structured entry produced by documentation extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub name: String,
    /// Owning symbol for members (e.g. the class a method belongs to).
    /// Attachment goes by stream order instead; kept for the wire shape.
    #[serde(default)]
    #[allow(dead_code)]
    pub member_of: Option<String>,
    /// Canonical fully-qualified name, used for suite labeling.
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub exported: bool,
    /// Either a bare default-export binding name, or a string containing a
    /// single brace-delimited named-export binding.
    #[serde(default)]
    pub import_style: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Raw example blocks from the extractor. Part of the record shape; the
    /// pipeline's test content comes from the test-case tag instead.
    #[serde(default)]
    #[allow(dead_code)]
    pub examples: Vec<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub source_file_name: Option<String>,
}

/// True when a payload is a single JSON array batch rather than
/// newline-delimited records.
pub fn is_batch(input: &str) -> bool {
    input.trim_start().starts_with('[')
}

/// Parse a whole batch payload.
pub fn parse_batch(input: &str) -> serde_json::Result<Vec<DocumentationRecord>> {
    serde_json::from_str(input)
}

/// Parse one record from a push-stream line.
pub fn parse_line(line: &str) -> serde_json::Result<DocumentationRecord> {
    serde_json::from_str(line)
}
