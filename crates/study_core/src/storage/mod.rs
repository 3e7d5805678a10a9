use crate::error::AppError;
use crate::model::ReminderEntry;
use std::cell::RefCell;

pub mod json_store;

pub use json_store::JsonFileStore;

/// Whole-sequence persistence for reminders.
///
/// There is no locking: two callers racing `append` can lose an entry.
pub trait ReminderStore {
    fn load_all(&self) -> Result<Vec<ReminderEntry>, AppError>;

    fn save_all(&self, entries: &[ReminderEntry]) -> Result<(), AppError>;

    fn append(&self, entry: ReminderEntry) -> Result<(), AppError> {
        let mut entries = self.load_all()?;
        entries.push(entry);
        self.save_all(&entries)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<ReminderEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ReminderEntry>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }
}

impl ReminderStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<ReminderEntry>, AppError> {
        Ok(self.entries.borrow().clone())
    }

    fn save_all(&self, entries: &[ReminderEntry]) -> Result<(), AppError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, ReminderStore};
    use crate::model::ReminderEntry;

    #[test]
    fn memory_store_appends_in_order() {
        let first = ReminderEntry {
            text: "first".to_string(),
            when: "2026-10-17T18:00:00Z".to_string(),
        };
        let store = MemoryStore::with_entries(vec![first.clone()]);
        let second = ReminderEntry {
            text: "second".to_string(),
            when: "2026-10-18T18:00:00Z".to_string(),
        };

        store.append(second.clone()).unwrap();

        assert_eq!(store.load_all().unwrap(), vec![first, second]);
    }
}
