//! SQLite snapshot store implementation.
//!
//! A snapshot is written in two steps: a pending shell row when sampling
//! starts, then a single immediate transaction that inserts every point and
//! finalizes the shell. Reads only return committed snapshots.

use chrono::SecondsFormat;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::business::parse_timestamp;
use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{PointRow, SnapshotRow};
use crate::adapter::outbound::sqlite::database::schema::{grid_points, grid_snapshots};
use crate::domain::{
    geo::Coordinate,
    id::{BusinessId, PointId, SnapshotId},
    score::Rank,
    snapshot::{GridPoint, GridSnapshot, PointMetadata, SnapshotStatus},
};
use crate::error::{Error, Result};
use crate::port::outbound::store::SnapshotStore;

const COMMITTED_STATUSES: [&str; 2] = ["complete", "cancelled"];

/// SQLite-backed snapshot store.
pub struct SqliteSnapshotStore {
    pool: DbPool,
}

impl SqliteSnapshotStore {
    /// Create a new SQLite snapshot store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(snapshot: &GridSnapshot) -> Result<SnapshotRow> {
        Ok(SnapshotRow {
            id: snapshot.id.to_string(),
            business_id: snapshot.business_id.to_string(),
            keyword: snapshot.keyword.clone(),
            radius_km: snapshot.radius_km,
            grid_size: to_i32(snapshot.grid_size)?,
            center_lat: snapshot.center.lat,
            center_lng: snapshot.center.lng,
            average_rank: snapshot.average_rank,
            visibility_score: snapshot.visibility_score,
            status: snapshot.status.as_str().to_string(),
            created_at: snapshot
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            completed_at: snapshot
                .completed_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Micros, true)),
        })
    }

    fn point_to_row(snapshot_id: &SnapshotId, point: &GridPoint) -> Result<PointRow> {
        let rank_position = point.rank.position().map(to_i32).transpose()?;
        Ok(PointRow {
            id: point.id.to_string(),
            snapshot_id: snapshot_id.to_string(),
            position: to_i32(point.position)?,
            lat: point.coordinate.lat,
            lng: point.coordinate.lng,
            rank_position,
            competitor_winner: point.competitor_winner.clone(),
            metadata: serde_json::to_string(&point.metadata)?,
        })
    }

    fn point_from_row(row: PointRow) -> Result<GridPoint> {
        let metadata: PointMetadata =
            serde_json::from_str(&row.metadata).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(GridPoint {
            id: PointId::from(row.id),
            position: to_u32(row.position)?,
            coordinate: Coordinate::new(row.lat, row.lng),
            rank: Rank::from_stored(row.rank_position),
            competitor_winner: row.competitor_winner,
            metadata,
        })
    }

    fn from_rows(row: SnapshotRow, points: Vec<PointRow>) -> Result<GridSnapshot> {
        let status = SnapshotStatus::parse(&row.status)
            .ok_or_else(|| Error::Parse(format!("unknown snapshot status: {}", row.status)))?;
        let mut points = points
            .into_iter()
            .map(Self::point_from_row)
            .collect::<Result<Vec<_>>>()?;
        points.sort_by_key(|p| p.position);

        Ok(GridSnapshot {
            id: SnapshotId::from(row.id),
            business_id: BusinessId::from(row.business_id),
            keyword: row.keyword,
            radius_km: row.radius_km,
            grid_size: to_u32(row.grid_size)?,
            center: Coordinate::new(row.center_lat, row.center_lng),
            average_rank: row.average_rank,
            visibility_score: row.visibility_score,
            status,
            created_at: parse_timestamp(&row.created_at)?,
            completed_at: row.completed_at.as_deref().map(parse_timestamp).transpose()?,
            points,
        })
    }

    fn load_with_points(
        conn: &mut SqliteConnection,
        rows: Vec<SnapshotRow>,
    ) -> Result<Vec<GridSnapshot>> {
        let points: Vec<PointRow> = PointRow::belonging_to(&rows)
            .select(PointRow::as_select())
            .load(conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        points
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(points, row)| Self::from_rows(row, points))
            .collect()
    }
}

fn to_i32(value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|e| Error::Parse(e.to_string()))
}

fn to_u32(value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|e| Error::Parse(e.to_string()))
}

impl SnapshotStore for SqliteSnapshotStore {
    async fn create_shell(&self, snapshot: &GridSnapshot) -> Result<()> {
        let row = Self::to_row(snapshot)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::insert_into(grid_snapshots::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn commit(&self, snapshot: &GridSnapshot) -> Result<()> {
        if !snapshot.status.is_committed() {
            return Err(Error::Database(format!(
                "snapshot {} is still pending",
                snapshot.id
            )));
        }
        if !snapshot.has_full_point_set() {
            return Err(Error::Database(format!(
                "snapshot {} has {} points, expected {}",
                snapshot.id,
                snapshot.points.len(),
                snapshot.expected_point_count()
            )));
        }
        let row = Self::to_row(snapshot)?;
        let points = snapshot
            .points
            .iter()
            .map(|p| Self::point_to_row(&snapshot.id, p))
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
            let updated = diesel::update(
                grid_snapshots::table
                    .find(&row.id)
                    .filter(grid_snapshots::status.eq(SnapshotStatus::Pending.as_str())),
            )
            .set((
                grid_snapshots::average_rank.eq(row.average_rank),
                grid_snapshots::visibility_score.eq(row.visibility_score),
                grid_snapshots::status.eq(&row.status),
                grid_snapshots::completed_at.eq(&row.completed_at),
            ))
            .execute(conn)?;
            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            for point in &points {
                diesel::insert_into(grid_points::table)
                    .values(point)
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(|e| match e {
            diesel::result::Error::NotFound => Error::Database(format!(
                "no pending snapshot {} to commit",
                snapshot.id
            )),
            other => Error::Database(other.to_string()),
        })
    }

    async fn discard(&self, id: &SnapshotId) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let deleted = diesel::delete(
            grid_snapshots::table
                .find(id.as_str())
                .filter(grid_snapshots::status.eq(SnapshotStatus::Pending.as_str())),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn get(&self, id: &SnapshotId) -> Result<Option<GridSnapshot>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<SnapshotRow> = grid_snapshots::table
            .find(id.as_str())
            .filter(grid_snapshots::status.eq_any(COMMITTED_STATUSES))
            .select(SnapshotRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some(row) => Ok(Self::load_with_points(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    async fn history(&self, business_id: &BusinessId) -> Result<Vec<GridSnapshot>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<SnapshotRow> = grid_snapshots::table
            .filter(grid_snapshots::business_id.eq(business_id.as_str()))
            .filter(grid_snapshots::status.eq_any(COMMITTED_STATUSES))
            .order((grid_snapshots::created_at.desc(), grid_snapshots::id.desc()))
            .select(SnapshotRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::load_with_points(&mut conn, rows)
    }
}
