//! In-memory stores with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::domain::{
    business::Business,
    id::{BusinessId, SnapshotId, TenantId},
    snapshot::{GridSnapshot, SnapshotStatus},
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{BusinessStore, SnapshotStore};

// ---------------------------------------------------------------------------
// InMemorySnapshotStore
// ---------------------------------------------------------------------------

/// Snapshot store held in a map.
///
/// Mirrors the SQLite store's visibility rules: shells are hidden until
/// committed, and a commit replaces the shell in one step.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    snapshots: Mutex<HashMap<SnapshotId, GridSnapshot>>,
    fail_commit: AtomicBool,
    fail_create: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent commit fail.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent shell insert fail.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Every stored row, pending shells included.
    pub fn raw_len(&self) -> usize {
        self.snapshots.lock().len()
    }

    /// Number of stored pending shells.
    pub fn pending_count(&self) -> usize {
        self.snapshots
            .lock()
            .values()
            .filter(|s| s.status == SnapshotStatus::Pending)
            .count()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    async fn create_shell(&self, snapshot: &GridSnapshot) -> Result<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Error::Database("injected create failure".into()));
        }
        let mut shell = snapshot.clone();
        shell.points.clear();
        self.snapshots.lock().insert(shell.id.clone(), shell);
        Ok(())
    }

    async fn commit(&self, snapshot: &GridSnapshot) -> Result<()> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(Error::Database("injected commit failure".into()));
        }
        if !snapshot.has_full_point_set() {
            return Err(Error::Database(format!(
                "snapshot {} has {} points, expected {}",
                snapshot.id,
                snapshot.points.len(),
                snapshot.expected_point_count()
            )));
        }
        let mut snapshots = self.snapshots.lock();
        match snapshots.get(&snapshot.id) {
            Some(existing) if existing.status == SnapshotStatus::Pending => {
                snapshots.insert(snapshot.id.clone(), snapshot.clone());
                Ok(())
            }
            _ => Err(Error::Database(format!(
                "no pending snapshot {} to commit",
                snapshot.id
            ))),
        }
    }

    async fn discard(&self, id: &SnapshotId) -> Result<bool> {
        let mut snapshots = self.snapshots.lock();
        let pending = snapshots
            .get(id)
            .is_some_and(|s| s.status == SnapshotStatus::Pending);
        if pending {
            snapshots.remove(id);
        }
        Ok(pending)
    }

    async fn get(&self, id: &SnapshotId) -> Result<Option<GridSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .get(id)
            .filter(|s| s.status.is_committed())
            .cloned())
    }

    async fn history(&self, business_id: &BusinessId) -> Result<Vec<GridSnapshot>> {
        let mut history: Vec<GridSnapshot> = self
            .snapshots
            .lock()
            .values()
            .filter(|s| &s.business_id == business_id && s.status.is_committed())
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(history)
    }
}

// ---------------------------------------------------------------------------
// InMemoryBusinessStore
// ---------------------------------------------------------------------------

/// Business store held in a map. Holds no snapshots, so deletes cascade to
/// nothing.
#[derive(Default)]
pub struct InMemoryBusinessStore {
    businesses: Mutex<HashMap<BusinessId, Business>>,
}

impl InMemoryBusinessStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BusinessStore for InMemoryBusinessStore {
    async fn save(&self, business: &Business) -> Result<()> {
        self.businesses
            .lock()
            .insert(business.id.clone(), business.clone());
        Ok(())
    }

    async fn get(&self, id: &BusinessId) -> Result<Option<Business>> {
        Ok(self.businesses.lock().get(id).cloned())
    }

    async fn list(&self, tenant: Option<&TenantId>) -> Result<Vec<Business>> {
        let mut businesses: Vec<Business> = self
            .businesses
            .lock()
            .values()
            .filter(|b| tenant.map_or(true, |t| b.is_owned_by(t)))
            .cloned()
            .collect();
        businesses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(businesses)
    }

    async fn delete(&self, id: &BusinessId) -> Result<bool> {
        Ok(self.businesses.lock().remove(id).is_some())
    }
}
