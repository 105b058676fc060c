//! The file driver: read the target, run the rules, write the result back.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

use crate::rewrite::{RewriteError, RuleOutcome};
use crate::rules::builtin_rules;

/// Result of one patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchOutcome should be checked for patched/unchanged"]
pub enum PatchOutcome {
    /// At least one rule matched; the file was rewritten in place.
    Patched {
        file: PathBuf,
        /// Per-rule outcomes, in application order
        rule_outcomes: Vec<(&'static str, RuleOutcome)>,
    },
    /// No rule matched; the file was left untouched.
    Unchanged { file: PathBuf },
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl PatchError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Apply the built-in chain-collapse rules to the file at `path`.
///
/// Reads the whole file, runs each rule over the full text in order (the
/// second rule sees the output of the first), and writes the result back
/// atomically if anything changed. A missing or unreadable path fails here
/// before any write; so does content that is not valid UTF-8.
pub fn patch_file(path: impl AsRef<Path>) -> Result<PatchOutcome, PatchError> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| PatchError::io(path, source))?;
    let original = std::str::from_utf8(&bytes).map_err(|source| PatchError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let original_hash = xxh3_64(original.as_bytes());

    let mut text = original.to_string();
    let mut rule_outcomes = Vec::new();
    for rule in builtin_rules()? {
        let (next, outcome) = rule.apply(&text);
        rule_outcomes.push((rule.id, outcome));
        text = next;
    }

    // Idempotency: a run that changes nothing must not touch the file.
    if xxh3_64(text.as_bytes()) == original_hash {
        return Ok(PatchOutcome::Unchanged {
            file: path.to_path_buf(),
        });
    }

    atomic_write(path, text.as_bytes())?;

    // Bump mtime so the build tool picks up the rewrite
    let now = filetime::FileTime::now();
    filetime::set_file_mtime(path, now).map_err(|source| PatchError::io(path, source))?;

    Ok(PatchOutcome::Patched {
        file: path.to_path_buf(),
        rule_outcomes,
    })
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write lands or the original file keeps its prior
/// contents.
fn atomic_write(path: &Path, content: &[u8]) -> Result<(), PatchError> {
    // Tempfile in the same directory, so the rename stays on one filesystem
    let parent = path.parent().ok_or_else(|| {
        PatchError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent directory"),
        )
    })?;

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|source| PatchError::io(path, source))?;

    temp.write_all(content)
        .map_err(|source| PatchError::io(path, source))?;

    temp.as_file()
        .sync_all()
        .map_err(|source| PatchError::io(path, source))?;

    temp.persist(path)
        .map_err(|e| PatchError::io(path, e.error))?;

    Ok(())
}
