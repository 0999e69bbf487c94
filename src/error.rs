//! Fatal pipeline errors.
//!
//! A malformed record stream indicates a bug in the upstream extractor or in
//! the source annotations, so every kind here aborts the whole run. Output
//! already written for earlier-finalized files stays on disk — there is no
//! rollback.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// An import binding was requested for a record not marked exported.
    #[error("record `{name}` is not exported and cannot be imported by a test")]
    NotExported { name: String },

    /// More than one before/after hook tag on a single record.
    #[error("more than one {tag} annotation on `{name}` (only one allowed)")]
    DuplicateHook { tag: String, name: String },

    /// A test-case body with no recognizable assertion call.
    #[error("{tag} on `{name}` must contain an assertion call (`assert(` or `assert.`)")]
    MissingAssertion { tag: String, name: String },

    /// A member record arrived with nothing open to attach it to.
    #[error("record `{name}` arrived with no open container")]
    NoContainer { name: String },

    /// The stream ended without a single file record.
    #[error("record stream contained no file records")]
    EmptyStream,
}
