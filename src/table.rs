use crate::arena::Arena;
use crate::compare::words_match;
use crate::error::LoadError;
use crate::hash::TABLE_SIZE;

/// One stored word. `start`/`len` locate the word in the arena; the
/// terminator follows at `start + len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub start: usize,
    pub len: usize,
    next: Option<usize>,
}

impl Entry {
    pub fn new(start: usize, len: usize) -> Entry {
        Entry {
            start,
            len,
            next: None,
        }
    }
}

/// Fixed-size table of bucket heads. Chains link entries by index into a
/// single entry vector, in insertion order.
#[derive(Debug)]
pub struct Table {
    heads: Vec<Option<usize>>,
    entries: Vec<Entry>,
}

impl Table {
    pub fn new() -> Result<Table, LoadError> {
        let mut heads = Vec::new();
        heads
            .try_reserve_exact(TABLE_SIZE)
            .map_err(|_| LoadError::OutOfMemory {
                requested: TABLE_SIZE * std::mem::size_of::<Option<usize>>(),
            })?;
        heads.resize(TABLE_SIZE, None);
        Ok(Table {
            heads,
            entries: Vec::new(),
        })
    }

    /// Appends `entry` to the tail of `bucket`'s chain. Buckets are taken
    /// modulo [`TABLE_SIZE`].
    pub fn insert(&mut self, bucket: usize, entry: Entry) -> Result<(), LoadError> {
        let bucket = bucket % TABLE_SIZE;
        self.entries
            .try_reserve(1)
            .map_err(|_| LoadError::OutOfMemory {
                requested: std::mem::size_of::<Entry>(),
            })?;
        let id = self.entries.len();
        self.entries.push(Entry { next: None, ..entry });

        let Some(mut tail) = self.heads[bucket] else {
            self.heads[bucket] = Some(id);
            return Ok(());
        };
        while let Some(next) = self.entries[tail].next {
            tail = next;
        }
        self.entries[tail].next = Some(id);
        Ok(())
    }

    /// Walks `bucket`'s chain from the head until an entry matches `query`.
    pub fn lookup(&self, bucket: usize, query: &[u8], arena: &Arena) -> bool {
        self.chain(bucket)
            .any(|entry| words_match(arena.slice(entry.start, entry.len + 1), query))
    }

    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            table: self,
            cursor: self.heads[bucket % TABLE_SIZE],
        }
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }

    pub fn longest_chain(&self) -> usize {
        (0..TABLE_SIZE)
            .map(|bucket| self.chain_len(bucket))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over the entries of one bucket, head first.
pub struct Chain<'a> {
    table: &'a Table,
    cursor: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = &self.table.entries[self.cursor?];
        self.cursor = entry.next;
        Some(entry)
    }
}
