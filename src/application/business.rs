//! Tenant-scoped business registry.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    business::Business,
    id::{BusinessId, PlaceId, TenantId},
};
use crate::error::{AnalysisError, Result};
use crate::port::outbound::store::BusinessStore;

/// Registers, looks up and removes tracked businesses.
///
/// Lookups scoped to a tenant treat another tenant's business as missing.
pub struct BusinessRegistry<B> {
    store: Arc<B>,
}

impl<B: BusinessStore> BusinessRegistry<B> {
    #[must_use]
    pub fn new(store: Arc<B>) -> Self {
        Self { store }
    }

    /// Register a new business.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub async fn register(
        &self,
        tenant_id: TenantId,
        name: impl Into<String>,
        place_id: Option<PlaceId>,
    ) -> Result<Business> {
        let business = Business::new(tenant_id, name, place_id);
        self.store.save(&business).await?;
        info!(
            business_id = %business.id,
            tenant_id = %business.tenant_id,
            "Registered business"
        );
        Ok(business)
    }

    /// Fetch a business, optionally requiring it to belong to `tenant`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::BusinessNotFound`] when the business does not
    /// exist or belongs to another tenant.
    pub async fn find(&self, id: &BusinessId, tenant: Option<&TenantId>) -> Result<Business> {
        match self.store.get(id).await? {
            Some(business) if tenant.map_or(true, |t| business.is_owned_by(t)) => Ok(business),
            _ => Err(AnalysisError::BusinessNotFound(id.clone()).into()),
        }
    }

    /// Businesses oldest first, optionally for one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list(&self, tenant: Option<&TenantId>) -> Result<Vec<Business>> {
        self.store.list(tenant).await
    }

    /// Remove a business and its snapshot history.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::BusinessNotFound`] when nothing was removed.
    pub async fn remove(&self, id: &BusinessId, tenant: Option<&TenantId>) -> Result<()> {
        self.find(id, tenant).await?;
        if !self.store.delete(id).await? {
            return Err(AnalysisError::BusinessNotFound(id.clone()).into());
        }
        info!(business_id = %id, "Removed business");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::store::InMemoryBusinessStore;

    fn registry() -> BusinessRegistry<InMemoryBusinessStore> {
        BusinessRegistry::new(Arc::new(InMemoryBusinessStore::new()))
    }

    #[tokio::test]
    async fn register_then_find() {
        let registry = registry();
        let business = registry
            .register(TenantId::new("acme"), "Dental", Some(PlaceId::new("p1")))
            .await
            .unwrap();

        let found = registry
            .find(&business.id, Some(&TenantId::new("acme")))
            .await
            .unwrap();
        assert_eq!(found, business);
    }

    #[tokio::test]
    async fn other_tenant_sees_not_found() {
        let registry = registry();
        let business = registry
            .register(TenantId::new("acme"), "Dental", None)
            .await
            .unwrap();

        let err = registry
            .find(&business.id, Some(&TenantId::new("globex")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Analysis(AnalysisError::BusinessNotFound(ref id)) if *id == business.id
        ));
        assert!(registry.find(&business.id, None).await.is_ok());
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let registry = registry();
        assert!(registry.remove(&BusinessId::new(), None).await.is_err());
    }

    #[tokio::test]
    async fn remove_deletes() {
        let registry = registry();
        let business = registry
            .register(TenantId::new("acme"), "Dental", None)
            .await
            .unwrap();
        registry.remove(&business.id, None).await.unwrap();
        assert!(registry.list(None).await.unwrap().is_empty());
    }
}
