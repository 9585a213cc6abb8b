use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info};

use crate::arena::Arena;
use crate::error::{LoadError, NotLoaded, UnloadError};
use crate::hash::{bucket_of, WordHasher};
use crate::table::{Entry, Table};

/// Everything a successful load produces.
#[derive(Debug)]
struct Words {
    arena: Arena,
    table: Table,
    count: usize,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Empty,
    Loaded(Words),
    Unloaded,
}

/// A case-insensitive word set loaded once from a newline-delimited list.
///
/// The lifecycle is `new` → `load` → any number of `check`/`size` calls →
/// `unload`. Queries against a dictionary that is not loaded report `false`
/// (or [`NotLoaded`] through [`Dictionary::lookup`]). A failed load leaves the
/// dictionary as it was.
#[derive(Debug, Default)]
pub struct Dictionary {
    state: State,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            state: State::Empty,
        }
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        if self.is_loaded() {
            return Err(LoadError::AlreadyLoaded);
        }
        debug!("loading word list from {}", path.display());
        let file = File::open(path)?;
        self.load_from(file)
    }

    /// Loads from any seekable source. The source is measured first so the
    /// arena can be sized once, then read from the start.
    ///
    /// A final word without a trailing newline is still stored. Empty lines
    /// are stored as empty entries and counted.
    pub fn load_from<R: Read + Seek>(&mut self, mut source: R) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Err(LoadError::AlreadyLoaded);
        }

        let byte_len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        let byte_len = usize::try_from(byte_len).map_err(|_| LoadError::OutOfMemory {
            requested: usize::MAX,
        })?;

        let mut arena = Arena::reserve(byte_len)?;
        let mut table = Table::new()?;
        let mut count = 0;

        let mut hasher = WordHasher::new();
        let mut start = 0;
        let mut cursor = 0;

        for byte in BufReader::new(source).bytes() {
            let byte = byte?;
            if byte == b'\n' {
                arena.write(cursor, 0)?;
                table.insert(hasher.bucket(), Entry::new(start, cursor - start))?;
                count += 1;
                hasher.reset();
                cursor += 1;
                start = cursor;
                continue;
            }
            hasher.push(byte);
            arena.write(cursor, byte)?;
            cursor += 1;
        }

        if cursor > start {
            arena.write(cursor, 0)?;
            table.insert(hasher.bucket(), Entry::new(start, cursor - start))?;
            count += 1;
        }

        debug!(
            "longest chain {} across {} entries",
            table.longest_chain(),
            table.len()
        );
        info!("loaded {count} words ({byte_len} bytes)");

        self.state = State::Loaded(Words {
            arena,
            table,
            count,
        });
        Ok(())
    }

    /// Returns whether `word` is in the dictionary. Never fails: empty
    /// queries and queries against an unloaded dictionary are `false`.
    pub fn check(&self, word: &str) -> bool {
        self.lookup(word).unwrap_or(false)
    }

    pub fn lookup(&self, word: &str) -> Result<bool, NotLoaded> {
        let State::Loaded(words) = &self.state else {
            return Err(NotLoaded);
        };
        let query = word.as_bytes();
        if query.is_empty() {
            return Ok(false);
        }
        Ok(words.table.lookup(bucket_of(query), query, &words.arena))
    }

    /// Number of loaded words, duplicates and empty lines included.
    pub fn size(&self) -> usize {
        match &self.state {
            State::Loaded(words) => words.count,
            _ => 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Releases the table and the arena. Chains are index-linked, so this is
    /// a flat release no matter how long a chain grew.
    pub fn unload(&mut self) -> Result<(), UnloadError> {
        match std::mem::replace(&mut self.state, State::Unloaded) {
            State::Loaded(words) => {
                debug!("unloading {} words", words.count);
                drop(words);
                Ok(())
            }
            previous => {
                self.state = previous;
                Err(UnloadError::NotLoaded)
            }
        }
    }
}
