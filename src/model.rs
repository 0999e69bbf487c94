//! Test tree model — format-agnostic, one [`TestFile`] per source file.
//!
//! Writability decides what the emitter renders: a node with no test-case
//! content anywhere beneath it stays in the tree but produces no output.

use crate::resolve::ExportBinding;

/// The tree built from one source file's records.
#[derive(Debug, Default)]
pub struct TestFile {
    /// Source path with the known suffixes (`.es6.js`, `.js`) stripped.
    pub source_name: String,
    pub default_export: Option<Exportable>,
    pub named_exports: Vec<Exportable>,
}

/// An exported symbol — the only things a generated test can import.
#[derive(Debug)]
pub struct Exportable {
    pub binding: ExportBinding,
    pub before_hook: String,
    pub after_hook: String,
    pub kind: ExportKind,
}

/// The two exportable shapes share everything except their test payload.
#[derive(Debug)]
pub enum ExportKind {
    Function { test_cases: Vec<String> },
    Class { methods: Vec<MethodTests> },
}

/// Test cases attached to one class method. Methods are not independently
/// exported; they render inside their class's suite.
#[derive(Debug, Default)]
pub struct MethodTests {
    // Hooks and name are extracted (and validated) per method but never
    // rendered; only class-level hooks reach the suite.
    #[allow(dead_code)]
    pub name: String,
    #[allow(dead_code)]
    pub before_hook: String,
    #[allow(dead_code)]
    pub after_hook: String,
    pub test_cases: Vec<String>,
}

impl TestFile {
    pub fn new(record_name: &str) -> Self {
        Self {
            source_name: strip_source_suffix(record_name).to_string(),
            ..Default::default()
        }
    }

    /// A file produces output iff something exported beneath it does.
    pub fn is_writable(&self) -> bool {
        self.default_export
            .as_ref()
            .is_some_and(Exportable::is_writable)
            || self.named_exports.iter().any(Exportable::is_writable)
    }
}

impl Exportable {
    pub fn is_writable(&self) -> bool {
        match &self.kind {
            ExportKind::Function { test_cases } => !test_cases.is_empty(),
            ExportKind::Class { methods } => methods.iter().any(MethodTests::is_writable),
        }
    }
}

impl MethodTests {
    pub fn is_writable(&self) -> bool {
        !self.test_cases.is_empty()
    }
}

/// Strip the known source suffixes: `a/b.es6.js` → `a/b`, `a/b.js` → `a/b`.
/// Anything else is used verbatim.
pub fn strip_source_suffix(name: &str) -> &str {
    name.strip_suffix(".es6.js")
        .or_else(|| name.strip_suffix(".js"))
        .unwrap_or(name)
}
