use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key shared with the web client's local-storage cart. The file
/// backend keeps the same name so payloads stay interchangeable.
pub const STORAGE_KEY: &str = "stamped-trip-cart";

/// Durable payload slot the cart reads and rewrites in full. Backends never
/// surface failures; an unreadable slot is indistinguishable from an empty
/// one.
pub trait CartStorage {
    fn load(&self) -> Option<String>;
    fn store(&self, payload: &str);
}

impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn store(&self, payload: &str) {
        (**self).store(payload)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn store(&self, payload: &str) {
        (**self).store(payload)
    }
}

/// File-backed storage: one JSON file named after the storage key inside a
/// caller-chosen directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn store(&self, payload: &str) {
        if let Err(err) = fs::write(&self.path, payload) {
            eprintln!("Failed to save trip cart: {}", err);
        }
    }
}

/// In-memory storage for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryStorage {
    cell: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            cell: Mutex::new(Some(payload.into())),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.cell.lock().unwrap().clone()
    }

    fn store(&self, payload: &str) {
        *self.cell.lock().unwrap() = Some(payload.to_string());
    }
}
