//! Handler for the `analyze` command.

use serde_json::json;
use tokio::signal;
use tracing::info;

use super::command::AnalyzeArgs;
use super::{output, render, tenant};
use crate::application::grid::CancelSignal;
use crate::domain::id::BusinessId;
use crate::domain::snapshot::AnalysisRequest;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_business_registry, build_orchestrator, build_pool};
use crate::infrastructure::config::settings::Config;

/// Execute `analyze`.
pub async fn execute(config: &Config, args: AnalyzeArgs) -> Result<()> {
    let request = AnalysisRequest::new(
        BusinessId::from(args.business_id),
        args.keyword,
        args.radius_km.unwrap_or(config.analysis.default_radius_km),
        args.grid_size.unwrap_or(config.analysis.default_grid_size),
    );
    request.validate()?;

    let pool = build_pool(config)?;
    let business = build_business_registry(&pool)
        .find(&request.business_id, tenant(args.tenant).as_ref())
        .await?;
    let orchestrator = build_orchestrator(config, &pool)?;

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Business", &business.name);
        output::field(
            "Probes",
            format!(
                "{} ({} in flight)",
                request.point_count(),
                config.analysis.max_concurrent_probes
            ),
        );
        output::note("press Ctrl-C to stop early and keep partial results");
    }

    let (handle, cancel) = CancelSignal::pair();
    let run = orchestrator.run_analysis_with_cancel(&business, &request, &cancel);
    tokio::pin!(run);

    let snapshot = tokio::select! {
        result = &mut run => result?,
        _ = signal::ctrl_c() => {
            info!("Interrupt received, finishing in-flight probes");
            output::warning("Stopping: waiting for in-flight probes");
            handle.cancel();
            run.await?
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "analyze",
            "snapshot": serde_json::to_value(&snapshot)?,
        }));
        return Ok(());
    }

    output::section("Result");
    render::summary(&snapshot);
    render::grid(&snapshot);
    Ok(())
}
