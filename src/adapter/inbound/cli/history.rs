//! Handler for the `history` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::HistoryArgs;
use super::{output, render, tenant};
use crate::domain::id::BusinessId;
use crate::domain::snapshot::GridSnapshot;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_business_registry, build_pool, build_snapshot_store};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::SnapshotStore;

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Keyword")]
    keyword: String,
    #[tabled(rename = "Grid")]
    grid: String,
    #[tabled(rename = "Radius")]
    radius: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Avg Rank")]
    average_rank: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&GridSnapshot> for SnapshotRow {
    fn from(snapshot: &GridSnapshot) -> Self {
        Self {
            created: snapshot.created_at.format("%Y-%m-%d %H:%M").to_string(),
            keyword: snapshot.keyword.clone(),
            grid: format!("{n}x{n}", n = snapshot.grid_size),
            radius: format!("{:.1} km", snapshot.radius_km),
            score: format!("{:.1}", snapshot.visibility_score.unwrap_or_default()),
            average_rank: format!("{:.2}", snapshot.average_rank.unwrap_or_default()),
            status: snapshot.status.as_str(),
            id: snapshot.id.to_string(),
        }
    }
}

/// Execute `history`.
pub async fn execute(config: &Config, args: HistoryArgs) -> Result<()> {
    let pool = build_pool(config)?;
    let business_id = BusinessId::from(args.business_id);
    let business = build_business_registry(&pool)
        .find(&business_id, tenant(args.tenant).as_ref())
        .await?;

    let mut snapshots = build_snapshot_store(&pool).history(&business.id).await?;
    if let Some(limit) = args.limit {
        snapshots.truncate(limit);
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "business_id": business.id,
            "snapshots": serde_json::to_value(&snapshots)?,
        }));
        return Ok(());
    }

    output::section(&format!("History for {}", business.name));
    if snapshots.is_empty() {
        output::note("(no analyses yet)");
        output::hint(&format!(
            "run {} to create one",
            output::highlight(format!("gridrank analyze {} --keyword <keyword>", business.id))
        ));
        return Ok(());
    }

    let rows: Vec<SnapshotRow> = snapshots.iter().map(SnapshotRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    if args.points {
        for snapshot in &snapshots {
            output::section(&format!("Snapshot {}", snapshot.id));
            render::summary(snapshot);
            render::grid(snapshot);
        }
    }
    Ok(())
}
