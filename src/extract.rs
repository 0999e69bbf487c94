//! Custom annotation tag extraction.
//!
//! Pulls the recognized tags — a before-each hook, an after-each hook and
//! test-case bodies — out of a record's free-form annotation list. Hook tags
//! are single-occurrence; multiplicity is decided by an explicit match count.
//! Test-case bodies are collected in source order and must each contain an
//! assertion call. Tag surface names are configuration, not semantics.

use crate::error::PublishError;
use crate::record::DocumentationRecord;

/// Hook body used when a record carries no hook annotation.
pub const NOOP_HOOK: &str = "function() {}";

/// Recognized annotation tag names.
#[derive(Debug, Clone)]
pub struct TagConfig {
    pub before_each: String,
    pub after_each: String,
    pub test_case: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            before_each: "@xBeforeEach".to_string(),
            after_each: "@xAfterEach".to_string(),
            test_case: "@xTestCase".to_string(),
        }
    }
}

/// Extract a single-occurrence hook body, defaulting to a no-op.
pub fn hook_body(record: &DocumentationRecord, tag: &str) -> Result<String, PublishError> {
    let mut count = 0usize;
    let mut body: Option<&str> = None;
    for annotation in &record.annotations {
        if annotation.tag_name == tag {
            count += 1;
            body.get_or_insert(annotation.tag_value.as_str());
        }
    }
    if count > 1 {
        return Err(PublishError::DuplicateHook {
            tag: tag.to_string(),
            name: record.name.clone(),
        });
    }
    Ok(body.unwrap_or(NOOP_HOOK).to_string())
}

/// Collect every test-case body in source order, validating that each one
/// contains an assertion call. The bodies are opaque otherwise — they are
/// re-embedded in emitted text unmodified.
pub fn test_cases(record: &DocumentationRecord, tag: &str) -> Result<Vec<String>, PublishError> {
    let mut cases = Vec::new();
    for annotation in &record.annotations {
        if annotation.tag_name != tag {
            continue;
        }
        if !has_assertion(&annotation.tag_value) {
            return Err(PublishError::MissingAssertion {
                tag: tag.to_string(),
                name: record.name.clone(),
            });
        }
        cases.push(annotation.tag_value.clone());
    }
    Ok(cases)
}

/// A body counts as asserting when it calls `assert(...)` or any
/// `assert.*` helper.
fn has_assertion(body: &str) -> bool {
    body.contains("assert(") || body.contains("assert.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Annotation;

    fn record(annotations: &[(&str, &str)]) -> DocumentationRecord {
        DocumentationRecord {
            name: "subject".to_string(),
            annotations: annotations
                .iter()
                .map(|(tag, value)| Annotation {
                    tag_name: tag.to_string(),
                    tag_value: value.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn absent_hook_is_noop() {
        let rec = record(&[]);
        assert_eq!(hook_body(&rec, "@xBeforeEach").unwrap(), NOOP_HOOK);
    }

    #[test]
    fn single_hook_used_verbatim() {
        let rec = record(&[("@xBeforeEach", "function() { setup(); }")]);
        assert_eq!(
            hook_body(&rec, "@xBeforeEach").unwrap(),
            "function() { setup(); }"
        );
    }

    #[test]
    fn duplicate_hook_fails() {
        let rec = record(&[
            ("@xBeforeEach", "function() { a(); }"),
            ("@xBeforeEach", "function() { b(); }"),
        ]);
        let err = hook_body(&rec, "@xBeforeEach").unwrap_err();
        assert!(matches!(err, PublishError::DuplicateHook { .. }));
    }

    #[test]
    fn hooks_with_other_tags_present() {
        // Other tag names never count toward the hook's multiplicity.
        let rec = record(&[
            ("@xAfterEach", "function() { teardown(); }"),
            ("@xBeforeEach", "function() { setup(); }"),
            ("@xTestCase", "assert(true);"),
        ]);
        assert_eq!(
            hook_body(&rec, "@xBeforeEach").unwrap(),
            "function() { setup(); }"
        );
        assert_eq!(
            hook_body(&rec, "@xAfterEach").unwrap(),
            "function() { teardown(); }"
        );
    }

    #[test]
    fn test_cases_keep_source_order() {
        let rec = record(&[
            ("@xTestCase", "assert(1);"),
            ("@xTestCase", "assert.equal(a, b);"),
            ("@xTestCase", "assert(3);"),
        ]);
        let cases = test_cases(&rec, "@xTestCase").unwrap();
        assert_eq!(cases, vec!["assert(1);", "assert.equal(a, b);", "assert(3);"]);
    }

    #[test]
    fn no_test_cases_is_empty() {
        let rec = record(&[("@xBeforeEach", "function() {}")]);
        assert!(test_cases(&rec, "@xTestCase").unwrap().is_empty());
    }

    #[test]
    fn body_without_assertion_fails() {
        let rec = record(&[
            ("@xBeforeEach", "function() { setup(); }"),
            ("@xTestCase", "console.log('no assertion');"),
        ]);
        let err = test_cases(&rec, "@xTestCase").unwrap_err();
        assert!(matches!(err, PublishError::MissingAssertion { .. }));
    }

    #[test]
    fn dotted_assertion_accepted() {
        let rec = record(&[("@xTestCase", "assert.ok(done);")]);
        assert_eq!(test_cases(&rec, "@xTestCase").unwrap().len(), 1);
    }
}
