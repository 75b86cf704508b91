//! Persistence ports for businesses and grid snapshots.

use std::future::Future;

use crate::domain::{
    business::Business, id::BusinessId, id::SnapshotId, id::TenantId, snapshot::GridSnapshot,
};
use crate::error::Result;

/// Storage operations for tracked businesses.
pub trait BusinessStore: Send + Sync {
    /// Save a business, replacing if it exists.
    fn save(&self, business: &Business) -> impl Future<Output = Result<()>> + Send;

    /// Get a business by ID.
    fn get(&self, id: &BusinessId) -> impl Future<Output = Result<Option<Business>>> + Send;

    /// List businesses, optionally restricted to one tenant, oldest first.
    fn list(
        &self,
        tenant: Option<&TenantId>,
    ) -> impl Future<Output = Result<Vec<Business>>> + Send;

    /// Delete a business and, by cascade, all of its snapshots.
    fn delete(&self, id: &BusinessId) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for grid snapshots.
///
/// A run writes a pending shell first and commits the full point set later.
/// Readers only ever see committed snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Insert a pending shell (no points).
    fn create_shell(&self, snapshot: &GridSnapshot) -> impl Future<Output = Result<()>> + Send;

    /// Finalize a shell and insert all of its points as one atomic unit.
    ///
    /// Either every point and the final fields become visible, or nothing
    /// changes.
    fn commit(&self, snapshot: &GridSnapshot) -> impl Future<Output = Result<()>> + Send;

    /// Remove a shell that will never be committed. Returns whether it existed.
    fn discard(&self, id: &SnapshotId) -> impl Future<Output = Result<bool>> + Send;

    /// Get a committed snapshot with its points.
    fn get(&self, id: &SnapshotId) -> impl Future<Output = Result<Option<GridSnapshot>>> + Send;

    /// Committed snapshots for a business, newest first, each with its points.
    fn history(
        &self,
        business_id: &BusinessId,
    ) -> impl Future<Output = Result<Vec<GridSnapshot>>> + Send;
}
