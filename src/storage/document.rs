//! JSON persistence for the whole data document.
//!
//! Reading is deliberately forgiving: a missing, unreadable or malformed file
//! yields an empty [`Document`] so the application can always start. The
//! failure is reported through `tracing` and through the returned
//! [`LoadOutcome`], never as an error.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timing::ScopedTimer;

/// The raw persisted document.
///
/// A JSON object holding the rooms array under [`Document::ROOMS_KEY`] plus
/// any other top-level keys, which are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// The top-level key holding the rooms array.
    pub const ROOMS_KEY: &'static str = "pokoje";

    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw rooms value, if present.
    #[must_use]
    pub fn rooms(&self) -> Option<&Value> {
        self.0.get(Self::ROOMS_KEY)
    }

    /// Replace the rooms array, leaving every other key as it was.
    pub fn set_rooms(&mut self, rooms: Vec<Value>) {
        self.0.insert(Self::ROOMS_KEY.to_string(), Value::Array(rooms));
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the document has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What happened when a document was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and decoded.
    Read,
    /// There was no file; an empty document was used.
    Missing,
    /// The file exists but could not be read; an empty document was used.
    Unreadable,
    /// The file was not a JSON object; an empty document was used.
    Malformed,
}

/// A document together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The document. Empty unless `outcome` is [`LoadOutcome::Read`].
    pub document: Document,
    /// How the load went.
    pub outcome: LoadOutcome,
}

impl Loaded {
    fn empty(outcome: LoadOutcome) -> Self {
        Self {
            document: Document::new(),
            outcome,
        }
    }
}

/// Errors that can occur when writing the document.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The file could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The document could not be encoded as JSON.
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A JSON file holding a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// A handle on the JSON file at `path`. Nothing is read until
    /// [`JsonFile::load`] is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document from disk.
    ///
    /// This never fails. A missing, unreadable or malformed file yields an
    /// empty document; see [`Loaded::outcome`].
    #[must_use]
    pub fn load(&self) -> Loaded {
        let _timer = ScopedTimer::start("load", self.path.display().to_string());

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Data file {} does not exist, starting with an empty document",
                    self.path.display()
                );
                return Loaded::empty(LoadOutcome::Missing);
            }
            Err(e) => {
                tracing::error!("Failed to read data file {}: {e}", self.path.display());
                return Loaded::empty(LoadOutcome::Unreadable);
            }
        };

        match serde_json::from_str(&content) {
            Ok(document) => Loaded {
                document,
                outcome: LoadOutcome::Read,
            },
            Err(e) => {
                tracing::error!("Failed to decode data file {}: {e}", self.path.display());
                Loaded::empty(LoadOutcome::Malformed)
            }
        }
    }

    /// Write the document to disk as pretty-printed JSON.
    ///
    /// Parent directories are created if needed. Failures are logged and
    /// returned; they are never fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the document cannot
    /// be encoded.
    pub fn save(&self, document: &Document) -> Result<(), SaveError> {
        let _timer = ScopedTimer::start("save", self.path.display().to_string());

        let result = self.write(document);
        if let Err(e) = &result {
            tracing::error!("{e}");
        }
        result
    }

    fn write(&self, document: &Document) -> Result<(), SaveError> {
        let io_error = |source: io::Error| SaveError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        document.serialize(&mut serializer)?;

        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)
    }
}
