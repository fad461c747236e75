//! Identity key extraction.
//!
//! # Overview
//!
//! Two files are duplicates when they share an [`IdentityKey`]. The key is
//! computed by one of two strategies:
//!
//! - [`KeyStrategy::Hash`] (default): lowercase hex SHA-256 of the whole
//!   file content, streamed through a fixed-size buffer. Detects copies
//!   regardless of their names.
//! - [`KeyStrategy::Name`]: the file's base name, extension included.
//!   Detects same-named files in different directories regardless of
//!   content. Never opens the file.
//!
//! # Example
//!
//! ```no_run
//! use dedupe::scanner::{FileCandidate, KeyStrategy};
//! use std::path::PathBuf;
//!
//! let candidate = FileCandidate::new(PathBuf::from("photos/img.jpg"));
//! let by_name = KeyStrategy::Name.compute_key(&candidate).unwrap();
//! assert_eq!(by_name.to_str(), Some("img.jpg"));
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::{FileCandidate, KeyError};

/// Read buffer size used while streaming file content into the digest.
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Opaque identity key shared by duplicate files.
///
/// Keys compare byte-for-byte: name keys keep the raw OS file name, so two
/// names that only differ in non-UTF-8 bytes never collide. Display and
/// serialization are lossy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(OsString);

impl IdentityKey {
    /// Wrap a raw key.
    #[must_use]
    pub fn new(key: impl Into<OsString>) -> Self {
        Self(key.into())
    }

    /// The exact key.
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    /// The key as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn to_str(&self) -> Option<&str> {
        self.0.to_str()
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string_lossy())
    }
}

impl Serialize for IdentityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strategy used to compute identity keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// SHA-256 of the file content
    #[default]
    Hash,
    /// File base name
    Name,
}

impl KeyStrategy {
    /// Compute the identity key of a candidate under this strategy.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if the hash strategy cannot open or fully read
    /// the file, or if the path has no file name.
    pub fn compute_key(self, candidate: &FileCandidate) -> Result<IdentityKey, KeyError> {
        self.extractor().compute_key(candidate)
    }

    /// The extractor implementing this strategy.
    #[must_use]
    pub fn extractor(self) -> &'static dyn KeyExtractor {
        match self {
            Self::Hash => &ContentHashKey,
            Self::Name => &NameKey,
        }
    }

    /// Lowercase name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to derive an identity key from a file candidate.
///
/// Implementations must be usable from the hashing worker pool.
pub trait KeyExtractor: Send + Sync {
    /// Strategy implemented by this extractor.
    fn strategy(&self) -> KeyStrategy;

    /// Compute the identity key for `candidate`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key cannot be derived. The caller drops
    /// the candidate from the pass; nothing is retried.
    fn compute_key(&self, candidate: &FileCandidate) -> Result<IdentityKey, KeyError>;
}

/// Content digest key (SHA-256, lowercase hex).
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashKey;

impl KeyExtractor for ContentHashKey {
    fn strategy(&self) -> KeyStrategy {
        KeyStrategy::Hash
    }

    fn compute_key(&self, candidate: &FileCandidate) -> Result<IdentityKey, KeyError> {
        hash_file(&candidate.path).map(IdentityKey::new)
    }
}

/// Base-name key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameKey;

impl KeyExtractor for NameKey {
    fn strategy(&self) -> KeyStrategy {
        KeyStrategy::Name
    }

    fn compute_key(&self, candidate: &FileCandidate) -> Result<IdentityKey, KeyError> {
        candidate
            .path
            .file_name()
            .map(IdentityKey::new)
            .ok_or_else(|| KeyError::NoFileName(candidate.path.clone()))
    }
}

/// Stream a file through SHA-256 and return the lowercase hex digest.
///
/// Memory use is bounded by [`HASH_BUFFER_SIZE`] regardless of file size.
///
/// # Errors
///
/// Returns [`KeyError`] if the file cannot be opened or fully read.
pub fn hash_file(path: &Path) -> Result<String, KeyError> {
    let file = File::open(path).map_err(|e| KeyError::from_io(path.to_path_buf(), e))?;
    let mut reader = BufReader::with_capacity(HASH_BUFFER_SIZE, file);
    let mut hasher = Sha256::new();

    io::copy(&mut reader, &mut hasher).map_err(|e| KeyError::from_io(path.to_path_buf(), e))?;

    Ok(format!("{:x}", hasher.finalize()))
}
