/// Number of buckets in the word table. Never resized.
pub const TABLE_SIZE: usize = 32768;

/// Running hash over the bytes of a word.
///
/// Each byte contributes only its low five bits, so letters hash the same
/// regardless of case. Some punctuation collides with letters as a result
/// (an apostrophe lands on the same value as `g`); the comparator tells them
/// apart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WordHasher {
    acc: u32,
}

impl WordHasher {
    pub fn new() -> WordHasher {
        WordHasher { acc: 0 }
    }

    pub fn push(&mut self, byte: u8) {
        self.acc = self
            .acc
            .wrapping_mul(31)
            .wrapping_add(u32::from(byte & 0x1F));
    }

    pub fn bucket(&self) -> usize {
        self.acc as usize % TABLE_SIZE
    }

    pub fn reset(&mut self) {
        self.acc = 0;
    }
}

/// Bucket index for a whole word.
pub fn bucket_of(word: &[u8]) -> usize {
    let mut hasher = WordHasher::new();
    word.iter().for_each(|&b| hasher.push(b));
    hasher.bucket()
}
