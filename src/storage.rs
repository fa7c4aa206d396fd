/// JSON persistence of the data document.
pub mod document;

pub use document::{Document, JsonFile, LoadOutcome, Loaded, SaveError};
