use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{window, Storage};

/// Durable slot holding the last selected tab label.
pub trait PreferenceStore {
    /// `None` when nothing was stored yet or the backend is unreadable.
    fn load(&self) -> Option<String>;

    /// Overwrite the stored label. Never fails from the caller's point of view.
    fn save(&self, label: &str);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, label: &str) {
        (**self).save(label)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, label: &str) {
        (**self).save(label)
    }
}

fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Preference kept in `window.localStorage` under a fixed key.
pub struct LocalStoragePreferenceStore {
    storage: Storage,
    key: String,
}

impl LocalStoragePreferenceStore {
    /// Returns `None` when localStorage is blocked (private mode, sandboxed iframe).
    pub fn open(key: impl Into<String>) -> Option<Self> {
        let storage = get_local_storage()?;
        Some(Self {
            storage,
            key: key.into(),
        })
    }
}

impl PreferenceStore for LocalStoragePreferenceStore {
    fn load(&self) -> Option<String> {
        self.storage.get_item(&self.key).ok()?
    }

    fn save(&self, label: &str) {
        if let Err(err) = self.storage.set_item(&self.key, label) {
            log::warn!("Failed to persist tab preference '{}': {:?}", label, err);
        }
    }
}

/// Page-lifetime preference. Used in tests and when localStorage is unavailable.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    value: RefCell<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(label: &str) -> Self {
        Self {
            value: RefCell::new(Some(label.to_string())),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, label: &str) {
        *self.value.borrow_mut() = Some(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        assert_eq!(MemoryPreferenceStore::new().load(), None);
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryPreferenceStore::with_value("Python");
        store.save("TypeScript");
        store.save("Go");
        assert_eq!(store.load().as_deref(), Some("Go"));
    }

    #[test]
    fn test_shared_store_sees_writes() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let handle: Box<dyn PreferenceStore> = Box::new(Rc::clone(&store));
        handle.save("Rust");
        assert_eq!(store.load().as_deref(), Some("Rust"));
    }
}
