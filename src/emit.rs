//! Test file emission — compiled templates and block assembly.
//!
//! Walks a [`TestFile`] and renders the import line, one QUnit module block
//! per writable export and one numbered QUnit test block per test-case body,
//! then hands the assembled text to the pretty-printer. Unwritable nodes are
//! skipped silently — they stay in the tree but produce nothing.

use crate::model::{ExportKind, Exportable, TestFile};
use crate::prettify;
use regex::Regex;
use std::sync::LazyLock;

// -- Templates ----------------------------------------------------------------

const FILE_TEMPLATE: &str = "\
// auto-generated test file
{{{imports}}}

{{{suites}}}
";

const SUITE_TEMPLATE: &str = "\
QUnit.module(\"{{{name}}}\", {
beforeEach: {{{before}}},
afterEach: {{{after}}}
});

{{{tests}}}";

const TEST_TEMPLATE: &str = "\
QUnit.test(\"{{{label}}}\", (assert) => {
{{{body}}}
});";

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\{([a-z]+)\}\}\}").unwrap());

static FILE_TPL: LazyLock<Template> = LazyLock::new(|| Template::compile(FILE_TEMPLATE));
static SUITE_TPL: LazyLock<Template> = LazyLock::new(|| Template::compile(SUITE_TEMPLATE));
static TEST_TPL: LazyLock<Template> = LazyLock::new(|| Template::compile(TEST_TEMPLATE));

/// A template compiled once into literal and placeholder segments.
struct Template {
    segments: Vec<Segment>,
}

enum Segment {
    Text(String),
    Var(String),
}

impl Template {
    fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in RE_PLACEHOLDER.captures_iter(source) {
            let whole = caps.get(0).unwrap();
            if whole.start() > last {
                segments.push(Segment::Text(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Var(caps[1].to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Text(source[last..].to_string()));
        }
        Template { segments }
    }

    /// Substitute placeholders; one not listed in `vars` renders empty.
    fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => {
                    if let Some((_, value)) = vars.iter().find(|(key, _)| key == name) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}

// -- File assembly ------------------------------------------------------------

/// Render a whole file, or None when nothing beneath it is writable.
pub fn emit_file(file: &TestFile, base_dir: &str) -> Option<String> {
    if !file.is_writable() {
        return None;
    }
    let default = file
        .default_export
        .as_ref()
        .filter(|e| e.is_writable());
    let named: Vec<&Exportable> = file
        .named_exports
        .iter()
        .filter(|e| e.is_writable())
        .collect();

    let path = relativize(&file.source_name, base_dir);
    let imports = import_line(default, &named, path).unwrap_or_default();

    // Named suites first, the default export's suite last.
    let mut suites: Vec<String> = named.iter().map(|e| emit_suite(e)).collect();
    if let Some(export) = default {
        suites.push(emit_suite(export));
    }
    let suites = suites.join("\n\n");

    let raw = FILE_TPL.render(&[("imports", imports.as_str()), ("suites", suites.as_str())]);
    Some(prettify::format(&raw))
}

/// The import statement for a file's writable exports, or None when no
/// usable binding exists. Binding names are de-duplicated (first occurrence
/// wins, the default binding never repeats in the brace list) and empty
/// names are dropped.
fn import_line(default: Option<&Exportable>, named: &[&Exportable], path: &str) -> Option<String> {
    let default_name = default
        .map(|e| e.binding.import_name.as_str())
        .filter(|name| !name.is_empty());

    let mut named_names: Vec<&str> = Vec::new();
    for export in named {
        let name = export.binding.import_name.as_str();
        if name.is_empty() || Some(name) == default_name || named_names.contains(&name) {
            continue;
        }
        named_names.push(name);
    }

    if default_name.is_none() && named_names.is_empty() {
        return None;
    }

    let mut line = String::from("import");
    if let Some(name) = default_name {
        line.push(' ');
        line.push_str(name);
    }
    if !named_names.is_empty() {
        if default_name.is_some() {
            line.push(',');
        }
        line.push_str(" {");
        line.push_str(&named_names.join(", "));
        line.push('}');
    }
    line.push_str(" from '");
    line.push_str(path);
    line.push_str("';");
    Some(line)
}

/// Strip everything up to and including the first occurrence of the base
/// segment: `media/js/views/cart` with base `js/` → `views/cart`. A source
/// that never mentions the base segment is used whole.
fn relativize<'a>(source: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return source;
    }
    match source.find(base) {
        Some(idx) => &source[idx + base.len()..],
        None => source,
    }
}

/// One QUnit module block: qualified name, hooks, concatenated test blocks.
fn emit_suite(export: &Exportable) -> String {
    let tests = match &export.kind {
        ExportKind::Function { test_cases } => test_blocks(test_cases, "test #"),
        ExportKind::Class { methods } => methods
            .iter()
            .filter(|m| m.is_writable())
            .map(|m| test_blocks(&m.test_cases, "test case #"))
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    SUITE_TPL.render(&[
        ("name", export.binding.qualified_name.as_str()),
        ("before", export.before_hook.as_str()),
        ("after", export.after_hook.as_str()),
        ("tests", tests.as_str()),
    ])
}

/// Number test bodies zero-based into labeled blocks. Function cases label
/// as `test #<n>`, method cases as `test case #<n>`; numbering restarts for
/// every method.
fn test_blocks(cases: &[String], label_prefix: &str) -> String {
    cases
        .iter()
        .enumerate()
        .map(|(idx, body)| {
            let label = format!("{label_prefix}{idx}");
            TEST_TPL.render(&[("label", label.as_str()), ("body", body.as_str())])
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
