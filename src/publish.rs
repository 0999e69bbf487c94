//! The record-stream fold.
//!
//! Records arrive in source order: a `file` record opens a container, the
//! classes and functions that follow attach to it, and methods attach to the
//! class a cursor points at. The next `file` record (or the end of the
//! stream) finalizes the open container into a rendered test file.

use crate::emit;
use crate::error::PublishError;
use crate::extract::{self, TagConfig};
use crate::model::{ExportKind, Exportable, MethodTests, TestFile};
use crate::record::{DocumentationRecord, RecordKind};
use crate::resolve;
use crate::sink;
use std::path::PathBuf;

/// Everything a run needs besides the records: recognized tag names, the
/// base segment for import relativization, and where generated files land.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub tags: TagConfig,
    pub base_dir: String,
    pub test_dir: PathBuf,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            tags: TagConfig::default(),
            base_dir: "js/".to_string(),
            test_dir: PathBuf::from("tests/js/doctests"),
        }
    }
}

/// One finalized test file, ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Where the next method record attaches. Reset at every file boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// No class seen since the last boundary.
    Closed,
    /// The last class is not part of the output; its methods are dropped.
    Suppressed,
    /// The last class holds the file's default slot.
    DefaultSlot,
    /// The last class sits at named slot `i`.
    NamedSlot(usize),
}

pub struct Publisher {
    config: PublishConfig,
    current: Option<TestFile>,
    cursor: Cursor,
    files_seen: usize,
}

impl Publisher {
    pub fn new(config: PublishConfig) -> Self {
        Publisher {
            config,
            current: None,
            cursor: Cursor::Closed,
            files_seen: 0,
        }
    }

    /// Fold one record into the tree. A `file` record closes the previous
    /// container, so the call may yield a finalized output pair.
    pub fn push(
        &mut self,
        record: &DocumentationRecord,
    ) -> Result<Option<GeneratedFile>, PublishError> {
        match record.kind {
            RecordKind::File => {
                let finished = self.finalize_current();
                self.current = Some(TestFile::new(&record.name));
                self.files_seen += 1;
                Ok(finished)
            }
            RecordKind::Class => self.push_class(record).map(|()| None),
            RecordKind::Function => self.push_function(record).map(|()| None),
            RecordKind::Method => self.push_method(record).map(|()| None),
            RecordKind::Other => Ok(None),
        }
    }

    /// End of stream: finalize the last open container. A stream that never
    /// carried a file record has nothing to attribute anything to.
    pub fn finish(mut self) -> Result<Option<GeneratedFile>, PublishError> {
        if self.files_seen == 0 {
            return Err(PublishError::EmptyStream);
        }
        Ok(self.finalize_current())
    }

    fn finalize_current(&mut self) -> Option<GeneratedFile> {
        // Boundary reset happens even when no container was open.
        self.cursor = Cursor::Closed;
        let file = self.current.take()?;
        let contents = emit::emit_file(&file, &self.config.base_dir)?;
        let path = sink::output_path(&self.config.test_dir, &file.source_name);
        Some(GeneratedFile { path, contents })
    }

    fn push_class(&mut self, record: &DocumentationRecord) -> Result<(), PublishError> {
        if !record.exported {
            // Methods trailing an unexported class belong to it and must not
            // leak onto whatever the cursor pointed at before.
            self.cursor = Cursor::Suppressed;
            return Ok(());
        }
        let export = build_export(
            &self.config.tags,
            record,
            ExportKind::Class {
                methods: Vec::new(),
            },
        )?;
        let Some(file) = self.current.as_mut() else {
            return Err(PublishError::NoContainer {
                name: record.name.clone(),
            });
        };
        self.cursor = if export.binding.is_default {
            file.default_export = Some(export);
            Cursor::DefaultSlot
        } else {
            file.named_exports.push(export);
            Cursor::NamedSlot(file.named_exports.len() - 1)
        };
        Ok(())
    }

    fn push_function(&mut self, record: &DocumentationRecord) -> Result<(), PublishError> {
        if !record.exported {
            return Ok(());
        }
        let Some(file) = self.current.as_mut() else {
            return Err(PublishError::NoContainer {
                name: record.name.clone(),
            });
        };
        let test_cases = extract::test_cases(record, &self.config.tags.test_case)?;
        let export = build_export(&self.config.tags, record, ExportKind::Function { test_cases })?;
        if export.binding.is_default {
            // The function displaces whatever held the default slot; if the
            // cursor pointed there, trailing methods have nowhere to go.
            if self.cursor == Cursor::DefaultSlot {
                self.cursor = Cursor::Suppressed;
            }
            file.default_export = Some(export);
        } else {
            file.named_exports.push(export);
        }
        Ok(())
    }

    fn push_method(&mut self, record: &DocumentationRecord) -> Result<(), PublishError> {
        if self.cursor == Cursor::Closed {
            return Err(PublishError::NoContainer {
                name: record.name.clone(),
            });
        }
        // Built (and validated) even when the cursor is suppressed.
        let method = build_method(&self.config.tags, record)?;
        let slot = match self.cursor {
            Cursor::DefaultSlot => self
                .current
                .as_mut()
                .and_then(|file| file.default_export.as_mut()),
            Cursor::NamedSlot(idx) => self
                .current
                .as_mut()
                .and_then(|file| file.named_exports.get_mut(idx)),
            Cursor::Closed | Cursor::Suppressed => None,
        };
        if let Some(export) = slot {
            if let ExportKind::Class { methods } = &mut export.kind {
                methods.push(method);
            }
        }
        Ok(())
    }
}

fn build_export(
    tags: &TagConfig,
    record: &DocumentationRecord,
    kind: ExportKind,
) -> Result<Exportable, PublishError> {
    let binding = resolve::resolve_binding(record)?;
    let before_hook = extract::hook_body(record, &tags.before_each)?;
    let after_hook = extract::hook_body(record, &tags.after_each)?;
    Ok(Exportable {
        binding,
        before_hook,
        after_hook,
        kind,
    })
}

fn build_method(tags: &TagConfig, record: &DocumentationRecord) -> Result<MethodTests, PublishError> {
    Ok(MethodTests {
        name: record.name.clone(),
        before_hook: extract::hook_body(record, &tags.before_each)?,
        after_hook: extract::hook_body(record, &tags.after_each)?,
        test_cases: extract::test_cases(record, &tags.test_case)?,
    })
}
