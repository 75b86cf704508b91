//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{businesses, grid_points, grid_snapshots};

/// Database row for a business.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = businesses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BusinessRow {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub place_id: Option<String>,
    pub created_at: String,
}

/// Database row for a grid snapshot.
#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = grid_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotRow {
    pub id: String,
    pub business_id: String,
    pub keyword: String,
    pub radius_km: f64,
    pub grid_size: i32,
    pub center_lat: f64,
    pub center_lng: f64,
    pub average_rank: Option<f64>,
    pub visibility_score: Option<f64>,
    pub status: String,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Database row for a grid point.
#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = grid_points)]
#[diesel(belongs_to(SnapshotRow, foreign_key = snapshot_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PointRow {
    pub id: String,
    pub snapshot_id: String,
    pub position: i32,
    pub lat: f64,
    pub lng: f64,
    pub rank_position: Option<i32>,
    pub competitor_winner: Option<String>,
    pub metadata: String,
}
