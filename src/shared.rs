use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::dictionary::Dictionary;
use crate::error::{LoadError, UnloadError};

/// A dictionary that can be shared between threads. Queries take the read
/// lock. Loading builds the new dictionary without any lock held and only
/// takes the write lock to install it, so readers never wait on file I/O.
#[derive(Clone, Default)]
pub struct SharedDictionary(Arc<RwLock<Dictionary>>);

impl SharedDictionary {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(Dictionary::new())))
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Err(LoadError::AlreadyLoaded);
        }
        self.load_from(File::open(path)?)
    }

    pub fn load_from<R: Read + Seek>(&self, source: R) -> Result<(), LoadError> {
        let mut fresh = Dictionary::new();
        fresh.load_from(source)?;

        let mut current = self.0.write();
        if current.is_loaded() {
            return Err(LoadError::AlreadyLoaded);
        }
        *current = fresh;
        Ok(())
    }

    pub fn unload(&self) -> Result<(), UnloadError> {
        self.0.write().unload()
    }

    pub fn check(&self, word: &str) -> bool {
        self.0.read().check(word)
    }

    pub fn size(&self) -> usize {
        self.0.read().size()
    }

    pub fn is_loaded(&self) -> bool {
        self.0.read().is_loaded()
    }

    /// Runs `f` with the read lock held, so a batch of checks sees one
    /// consistent dictionary.
    pub fn with<T>(&self, f: impl FnOnce(&Dictionary) -> T) -> T {
        f(&self.0.read())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, SeekFrom, Write};
    use std::sync::mpsc::{channel, Receiver, Sender};
    use std::thread;

    use super::*;

    #[test]
    fn concurrent_readers() {
        let path = std::env::temp_dir().join(format!("wordcheck-shared-{}.txt", std::process::id()));
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"shared\nwords\n")
            .unwrap();

        let shared = SharedDictionary::new();
        assert!(!shared.is_loaded());
        shared.load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.check("SHARED") && shared.check("words"))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(shared.with(|d| d.size()), 2);

        shared.unload().unwrap();
        assert_eq!(shared.size(), 0);
        assert!(!shared.check("shared"));
    }

    /// Pauses on its first read until the test lets it continue.
    struct GatedSource {
        inner: Cursor<Vec<u8>>,
        started: Option<Sender<()>>,
        resume: Receiver<()>,
    }

    impl Read for GatedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(started) = self.started.take() {
                let _ = started.send(());
                let _ = self.resume.recv();
            }
            self.inner.read(buf)
        }
    }

    impl Seek for GatedSource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn readers_are_not_blocked_while_loading() {
        let (started_tx, started_rx) = channel();
        let (resume_tx, resume_rx) = channel();
        let source = GatedSource {
            inner: Cursor::new(b"slow\nsource\n".to_vec()),
            started: Some(started_tx),
            resume: resume_rx,
        };

        let shared = SharedDictionary::new();
        let loader = {
            let shared = shared.clone();
            thread::spawn(move || shared.load_from(source))
        };

        started_rx.recv().unwrap();
        assert!(shared.0.try_read().is_some());
        assert!(!shared.is_loaded());
        assert!(!shared.check("slow"));

        resume_tx.send(()).unwrap();
        loader.join().unwrap().unwrap();
        assert!(shared.check("SOURCE"));
        assert_eq!(shared.size(), 2);
    }

    #[test]
    fn second_load_is_rejected() {
        let shared = SharedDictionary::new();
        shared.load_from(Cursor::new(b"first\n".to_vec())).unwrap();
        assert!(matches!(
            shared.load_from(Cursor::new(b"second\n".to_vec())),
            Err(LoadError::AlreadyLoaded)
        ));
        assert!(shared.check("first"));
        assert!(!shared.check("second"));
    }
}
