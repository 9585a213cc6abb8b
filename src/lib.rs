//! A case-insensitive word dictionary backed by a single string arena and a
//! fixed-size chained hash table, plus the spell-checking surfaces built on
//! top of it.

pub mod arena;
pub mod compare;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod hash;
pub mod lexer;
pub mod pipeline;
pub mod server;
pub mod shared;
pub mod table;

pub use dictionary::Dictionary;
pub use error::{LoadError, NotLoaded, UnloadError};
pub use shared::SharedDictionary;
