//! Snapshot rendering shared by `analyze` and `history`.

use crate::adapter::inbound::cli::output;
use crate::domain::score::Rank;
use crate::domain::snapshot::{GridSnapshot, ProbeOutcome, SnapshotStatus};

/// Print a snapshot's summary fields.
pub fn summary(snapshot: &GridSnapshot) {
    output::field("Snapshot", &snapshot.id);
    output::field("Keyword", &snapshot.keyword);
    output::field(
        "Grid",
        format!(
            "{n}x{n} over {:.2} km radius",
            snapshot.radius_km,
            n = snapshot.grid_size
        ),
    );
    output::field("Center", snapshot.center);
    output::field(
        "Created",
        snapshot.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    output::field(
        "Visibility",
        output::score(snapshot.visibility_score.unwrap_or_default()),
    );
    output::field(
        "Average rank",
        format!("{:.2}", snapshot.average_rank.unwrap_or_default()),
    );
    output::field(
        "Found",
        format!("{}/{}", snapshot.found_count(), snapshot.points.len()),
    );

    let degraded = snapshot
        .points
        .iter()
        .filter(|p| matches!(p.metadata.outcome, ProbeOutcome::Failed | ProbeOutcome::TimedOut))
        .count();
    if degraded > 0 {
        output::warning(&format!("{degraded} probe(s) failed or timed out"));
    }
    if snapshot.status == SnapshotStatus::Cancelled {
        let skipped = snapshot
            .points
            .iter()
            .filter(|p| p.metadata.outcome == ProbeOutcome::Skipped)
            .count();
        output::warning(&format!(
            "analysis was cancelled; {skipped} point(s) were not probed"
        ));
    }
}

/// Text rows of the rank grid, north row first.
#[must_use]
pub fn grid_lines(snapshot: &GridSnapshot) -> Vec<String> {
    const CELL_WIDTH: usize = 4;
    (0..snapshot.grid_size)
        .map(|row| {
            (0..snapshot.grid_size)
                .map(|col| {
                    let rank = snapshot
                        .point_at(row, col)
                        .map_or(Rank::NotFound, |p| p.rank);
                    output::rank_cell(rank, CELL_WIDTH)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Print the rank grid with a legend.
pub fn grid(snapshot: &GridSnapshot) {
    output::section("Rank grid (north at top)");
    output::lines(&grid_lines(snapshot).join("\n"));
    output::note("#n = rank n, - = not in the top 20");

    let mut winners: Vec<&str> = snapshot
        .points
        .iter()
        .filter_map(|p| p.competitor_winner.as_deref())
        .collect();
    winners.sort_unstable();
    winners.dedup();
    if !winners.is_empty() {
        output::field("Competitors", winners.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{generate_grid, Coordinate};
    use crate::domain::id::{BusinessId, PointId};
    use crate::domain::snapshot::{AnalysisRequest, GridPoint, PointMetadata};

    #[test]
    fn grid_lines_follow_row_major_positions() {
        let request = AnalysisRequest::new(BusinessId::new(), "dentist", 1.0, 3);
        let center = Coordinate::new(41.0, 29.0);
        let points = generate_grid(center, 1.0, 3)
            .into_iter()
            .enumerate()
            .map(|(i, coordinate)| GridPoint {
                id: PointId::new(),
                position: i as u32,
                coordinate,
                rank: if i == 4 { Rank::at(1) } else { Rank::NotFound },
                competitor_winner: None,
                metadata: PointMetadata::ok(1),
            })
            .collect();
        let snapshot = GridSnapshot::pending(&request, center)
            .finalize(points, SnapshotStatus::Complete);

        let lines = grid_lines(&snapshot);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("#1"));
        assert!(!lines[0].contains('#'));
        assert!(!lines[2].contains('#'));
    }
}
