//! Tracked business profiles.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BusinessId, PlaceId, TenantId};

/// A business registered by a tenant for rank tracking.
///
/// The grid engine only reads businesses: it needs the external place id to
/// resolve a coordinate and to recognize the business in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Unique identifier.
    pub id: BusinessId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// Maps provider place id, if the business has been matched to one.
    pub place_id: Option<PlaceId>,
    /// When the business was registered.
    pub created_at: DateTime<Utc>,
}

impl Business {
    /// Register a new business with a generated id.
    pub fn new(tenant_id: TenantId, name: impl Into<String>, place_id: Option<PlaceId>) -> Self {
        Self {
            id: BusinessId::new(),
            tenant_id,
            name: name.into(),
            place_id,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// True when `tenant` owns this business.
    #[must_use]
    pub fn is_owned_by(&self, tenant: &TenantId) -> bool {
        &self.tenant_id == tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_business_gets_unique_id() {
        let a = Business::new(TenantId::from("t1"), "Cafe", None);
        let b = Business::new(TenantId::from("t1"), "Cafe", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn ownership_is_by_tenant() {
        let business = Business::new(TenantId::from("t1"), "Cafe", Some(PlaceId::from("p1")));
        assert!(business.is_owned_by(&TenantId::from("t1")));
        assert!(!business.is_owned_by(&TenantId::from("t2")));
    }
}
