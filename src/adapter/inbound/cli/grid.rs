//! Handler for the `grid` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::GridPreviewArgs;
use super::output;
use crate::domain::geo::{generate_grid, grid_cell, Coordinate};
use crate::domain::snapshot::{validate_grid_size, validate_radius};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Row")]
    row: u32,
    #[tabled(rename = "Col")]
    col: u32,
    #[tabled(rename = "Lat")]
    lat: String,
    #[tabled(rename = "Lng")]
    lng: String,
}

/// Execute `grid preview`.
pub fn execute_preview(config: &Config, args: &GridPreviewArgs) -> Result<()> {
    let radius_km = args.radius_km.unwrap_or(config.analysis.default_radius_km);
    let grid_size = args.grid_size.unwrap_or(config.analysis.default_grid_size);
    validate_radius(radius_km)?;
    validate_grid_size(grid_size)?;

    let center = Coordinate::new(args.lat, args.lng);
    let points = generate_grid(center, radius_km, grid_size);

    if output::is_json() {
        output::json_output(json!({
            "command": "grid.preview",
            "center": center,
            "radius_km": radius_km,
            "grid_size": grid_size,
            "points": points,
        }));
        return Ok(());
    }

    output::section("Grid Preview");
    output::field("Center", center);
    output::field(
        "Grid",
        format!("{grid_size}x{grid_size} over {radius_km:.2} km radius"),
    );
    let rows: Vec<PointRow> = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let (row, col) = grid_cell(i as u32, grid_size);
            PointRow {
                position: i,
                row,
                col,
                lat: format!("{:.6}", point.lat),
                lng: format!("{:.6}", point.lng),
            }
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
