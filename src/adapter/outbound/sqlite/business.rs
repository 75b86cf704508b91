//! SQLite business store implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::BusinessRow;
use crate::adapter::outbound::sqlite::database::schema::businesses;
use crate::domain::{
    business::Business,
    id::{BusinessId, PlaceId, TenantId},
};
use crate::error::{Error, Result};
use crate::port::outbound::store::BusinessStore;

/// SQLite-backed business store.
pub struct SqliteBusinessStore {
    pool: DbPool,
}

impl SqliteBusinessStore {
    /// Create a new SQLite business store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(business: &Business) -> BusinessRow {
        BusinessRow {
            id: business.id.to_string(),
            tenant_id: business.tenant_id.to_string(),
            name: business.name.clone(),
            place_id: business.place_id.as_ref().map(ToString::to_string),
            created_at: business
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    fn from_row(row: BusinessRow) -> Result<Business> {
        Ok(Business {
            id: BusinessId::from(row.id),
            tenant_id: TenantId::from(row.tenant_id),
            name: row.name,
            place_id: row.place_id.map(PlaceId::from),
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

impl BusinessStore for SqliteBusinessStore {
    async fn save(&self, business: &Business) -> Result<()> {
        let row = Self::to_row(business);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        // Upsert instead of REPLACE: REPLACE deletes the old row first, which
        // would cascade to the business's snapshots.
        diesel::insert_into(businesses::table)
            .values(&row)
            .on_conflict(businesses::id)
            .do_update()
            .set((
                businesses::tenant_id.eq(&row.tenant_id),
                businesses::name.eq(&row.name),
                businesses::place_id.eq(&row.place_id),
            ))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &BusinessId) -> Result<Option<Business>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<BusinessRow> = businesses::table
            .find(id.as_str())
            .select(BusinessRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list(&self, tenant: Option<&TenantId>) -> Result<Vec<Business>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let mut query = businesses::table
            .select(BusinessRow::as_select())
            .order((businesses::created_at.asc(), businesses::id.asc()))
            .into_boxed();
        if let Some(tenant) = tenant {
            query = query.filter(businesses::tenant_id.eq(tenant.as_str().to_string()));
        }

        let rows: Vec<BusinessRow> = query
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn delete(&self, id: &BusinessId) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let deleted = diesel::delete(businesses::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }
}
