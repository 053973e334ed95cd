//! # In-Memory Repositories
//!
//! The provider interface is deliberately narrow: list, fetch by id,
//! create, update, delete. [`MemoryRepository`] keeps records in a map
//! behind a `parking_lot::RwLock`. The lock is never held across calls,
//! and `parking_lot` locks do not poison, so a panicking writer cannot
//! wedge the repository.
//!
//! Records are listed in id order so output is stable across runs.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use parking_lot::RwLock;

use sgm_core::{Case, CaseId, PlanId, VersionId};
use sgm_docs::DocumentVersion;
use sgm_plans::Plan;

use crate::error::StoreError;

/// Identifier usable as a repository key.
pub trait RecordId: Clone + Ord + Debug + Display + Send + Sync {
    fn generate() -> Self;
    fn is_blank(&self) -> bool;
}

macro_rules! record_id {
    ($($id:ty),* $(,)?) => {
        $(
            impl RecordId for $id {
                fn generate() -> Self {
                    <$id>::generate()
                }

                fn is_blank(&self) -> bool {
                    self.as_str().trim().is_empty()
                }
            }
        )*
    };
}

record_id!(CaseId, VersionId, PlanId);

/// A record a repository can hold.
pub trait Record: Clone + Debug + Send + Sync {
    type Id: RecordId;

    /// Name used in error messages (`case`, `plan`, ...).
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
    fn set_id(&mut self, id: Self::Id);
}

impl Record for Case {
    type Id = CaseId;
    const KIND: &'static str = "case";

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn set_id(&mut self, id: CaseId) {
        self.id = id;
    }
}

impl Record for DocumentVersion {
    type Id = VersionId;
    const KIND: &'static str = "document version";

    fn id(&self) -> &VersionId {
        &self.id
    }

    fn set_id(&mut self, id: VersionId) {
        self.id = id;
    }
}

impl Record for Plan {
    type Id = PlanId;
    const KIND: &'static str = "plan";

    fn id(&self) -> &PlanId {
        &self.id
    }

    fn set_id(&mut self, id: PlanId) {
        self.id = id;
    }
}

/// Read/write access to one kind of record.
pub trait Repository<T: Record> {
    fn find_all(&self) -> Vec<T>;

    fn find_by_id(&self, id: &T::Id) -> Option<T>;

    /// Insert a new record. A blank id is replaced with a generated one.
    fn create(&self, record: T) -> Result<T, StoreError>;

    /// Replace an existing record with the same id.
    fn update(&self, record: T) -> Result<T, StoreError>;

    /// Remove a record, returning it.
    fn delete(&self, id: &T::Id) -> Result<T, StoreError>;
}

/// Thread-safe, cloneable in-memory repository. Clones share storage.
#[derive(Debug)]
pub struct MemoryRepository<T: Record> {
    data: Arc<RwLock<BTreeMap<T::Id, T>>>,
}

impl<T: Record> Clone for MemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Build a repository from seed records. Later duplicates replace
    /// earlier ones.
    pub fn seeded(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.id().clone(), r))
            .collect::<BTreeMap<_, _>>();
        Self {
            data: Arc::new(RwLock::new(map)),
        }
    }

    /// Read-validate-update a record under a single write lock.
    ///
    /// Returns `None` if the record doesn't exist, otherwise the closure's
    /// result.
    pub fn try_update<R, E>(
        &self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn find_all(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    fn find_by_id(&self, id: &T::Id) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    fn create(&self, mut record: T) -> Result<T, StoreError> {
        if record.id().is_blank() {
            record.set_id(T::Id::generate());
        }
        let mut guard = self.data.write();
        if guard.contains_key(record.id()) {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }
        guard.insert(record.id().clone(), record.clone());
        tracing::debug!(kind = T::KIND, id = %record.id(), "record created");
        Ok(record)
    }

    fn update(&self, record: T) -> Result<T, StoreError> {
        let mut guard = self.data.write();
        match guard.get_mut(record.id()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(StoreError::NotFound {
                kind: T::KIND,
                id: record.id().to_string(),
            }),
        }
    }

    fn delete(&self, id: &T::Id) -> Result<T, StoreError> {
        self.data
            .write()
            .remove(id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgm_core::{CasePriority, CaseStatus, CaseType, Timestamp};

    fn case(id: &str) -> Case {
        Case {
            id: CaseId::new(id),
            case_number: format!("CASE-{id}"),
            case_type: CaseType::Dispute,
            status: CaseStatus::New,
            priority: CasePriority::Medium,
            assigned_to: None,
            created_at: Timestamp::parse("2025-12-01T00:00:00Z").unwrap(),
            title: "Split credit dispute".into(),
        }
    }

    #[test]
    fn create_then_find() {
        let repo: MemoryRepository<Case> = MemoryRepository::new();
        repo.create(case("case-b")).unwrap();
        repo.create(case("case-a")).unwrap();
        assert_eq!(repo.len(), 2);
        let ids: Vec<_> = repo.find_all().into_iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec!["case-a", "case-b"]);
        assert!(repo.find_by_id(&CaseId::new("case-a")).is_some());
    }

    #[test]
    fn blank_id_is_generated() {
        let repo: MemoryRepository<Case> = MemoryRepository::new();
        let created = repo.create(case("")).unwrap();
        assert!(!created.id.as_str().is_empty());
        assert!(repo.find_by_id(&created.id).is_some());
    }

    #[test]
    fn duplicate_create_rejected() {
        let repo = MemoryRepository::seeded([case("case-a")]);
        let err = repo.create(case("case-a")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { kind: "case", .. }));
    }

    #[test]
    fn update_requires_existing() {
        let repo = MemoryRepository::seeded([case("case-a")]);
        let mut changed = case("case-a");
        changed.status = CaseStatus::Escalated;
        repo.update(changed).unwrap();
        assert_eq!(
            repo.find_by_id(&CaseId::new("case-a")).unwrap().status,
            CaseStatus::Escalated
        );
        assert!(matches!(
            repo.update(case("case-z")),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let repo = MemoryRepository::seeded([case("case-a")]);
        let removed = repo.delete(&CaseId::new("case-a")).unwrap();
        assert_eq!(removed.id.as_str(), "case-a");
        assert!(repo.is_empty());
        let err = repo.delete(&CaseId::new("case-a")).unwrap_err();
        assert_eq!(err.to_string(), "case not found: case-a");
    }

    #[test]
    fn clones_share_storage() {
        let repo: MemoryRepository<Case> = MemoryRepository::new();
        let other = repo.clone();
        other.create(case("case-a")).unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn try_update_runs_under_lock() {
        let repo = MemoryRepository::seeded([case("case-a")]);
        let result: Option<Result<(), &str>> = repo.try_update(&CaseId::new("case-a"), |c| {
            if c.is_active() {
                c.status = CaseStatus::Resolved;
                Ok(())
            } else {
                Err("already closed")
            }
        });
        assert_eq!(result, Some(Ok(())));
        assert!(repo
            .try_update(&CaseId::new("missing"), |_| Ok::<_, ()>(()))
            .is_none());
    }
}
