use crate::*;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared handle to one election's state.
///
/// The lock is the election's sequencer: writers hold it for the whole of an
/// operation, readers see a consistent snapshot.
pub type ElectionHandle = Arc<RwLock<ElectionRecord>>;

/// An election store
///
/// Implementations must make `insert` atomic with respect to the id check,
/// and must never hand out two different handles for the same id.
pub trait Store {
    /// Get the handle for an election
    fn get(&self, id: &ElectionId) -> Option<ElectionHandle>;

    /// Add a new election, failing if the id is taken
    fn insert(&self, record: ElectionRecord) -> Result<ElectionHandle, ProtocolError>;

    /// All known election ids, in order
    fn ids(&self) -> Vec<ElectionId>;
}

/// A simple store that uses an in-memory BTreeMap
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<BTreeMap<ElectionId, ElectionHandle>>,
}

impl MemStore {
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Store for MemStore {
    fn get(&self, id: &ElectionId) -> Option<ElectionHandle> {
        self.inner.read().get(id).cloned()
    }

    fn insert(&self, record: ElectionRecord) -> Result<ElectionHandle, ProtocolError> {
        let mut inner = self.inner.write();
        match inner.entry(record.id().clone()) {
            Entry::Occupied(entry) => Err(ProtocolError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let handle = Arc::new(RwLock::new(record));
                entry.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    fn ids(&self) -> Vec<ElectionId> {
        self.inner.read().keys().cloned().collect()
    }
}

impl From<Vec<ElectionRecord>> for MemStore {
    fn from(records: Vec<ElectionRecord>) -> Self {
        let inner = records
            .into_iter()
            .map(|record| (record.id().clone(), Arc::new(RwLock::new(record))))
            .collect();
        MemStore {
            inner: RwLock::new(inner),
        }
    }
}
