//! Error types for loading and tearing down a dictionary

use std::io;

use thiserror::Error;

/// Errors that can occur while loading a word list
#[derive(Debug, Error)]
pub enum LoadError {
    /// The word list could not be opened or read
    #[error("word list unavailable: {0}")]
    SourceUnavailable(#[from] io::Error),

    /// Arena, table or entry storage could not be allocated
    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    /// The source produced more bytes than were reserved for it
    #[error("word list grew past the {capacity} bytes reserved for it")]
    SourceOverflow { capacity: usize },

    /// `load` was called on a dictionary that is already loaded
    #[error("dictionary is already loaded")]
    AlreadyLoaded,
}

/// Errors returned by `unload`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnloadError {
    #[error("dictionary is not loaded")]
    NotLoaded,
}

/// A query was made against a dictionary that holds no words
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("dictionary is not loaded")]
pub struct NotLoaded;
