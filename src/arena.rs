use crate::error::LoadError;

/// A fixed-capacity byte buffer that stores every loaded word back to back,
/// each followed by a NUL terminator.
///
/// The buffer is allocated once by [`Arena::reserve`] and never grows. Words
/// are addressed by offset; slices borrow from the arena and cannot outlive it.
#[derive(Debug)]
pub struct Arena {
    buf: Vec<u8>,
}

impl Arena {
    /// Allocates room for `byte_len` bytes of source text plus one terminator.
    pub fn reserve(byte_len: usize) -> Result<Arena, LoadError> {
        let requested = byte_len
            .checked_add(1)
            .ok_or(LoadError::OutOfMemory { requested: usize::MAX })?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(requested)
            .map_err(|_| LoadError::OutOfMemory { requested })?;
        buf.resize(requested, 0);
        Ok(Arena { buf })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn write(&mut self, offset: usize, byte: u8) -> Result<(), LoadError> {
        let capacity = self.capacity();
        let slot = self
            .buf
            .get_mut(offset)
            .ok_or(LoadError::SourceOverflow { capacity })?;
        *slot = byte;
        Ok(())
    }

    /// Borrowed view of `len` bytes starting at `start`.
    ///
    /// Out of range requests yield an empty slice.
    pub fn slice(&self, start: usize, len: usize) -> &[u8] {
        start
            .checked_add(len)
            .and_then(|end| self.buf.get(start..end))
            .unwrap_or(&[])
    }
}
