//! Handlers for the `business` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{BusinessAddArgs, BusinessRemoveArgs, TenantArg};
use super::{output, tenant};
use crate::domain::business::Business;
use crate::domain::id::{BusinessId, PlaceId, TenantId};
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_business_registry, build_pool};
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct BusinessRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Place ID")]
    place_id: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Business> for BusinessRow {
    fn from(business: &Business) -> Self {
        Self {
            id: business.id.to_string(),
            tenant: business.tenant_id.to_string(),
            name: business.name.clone(),
            place_id: business
                .place_id
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            created: business.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute `business add`.
pub async fn execute_add(config: &Config, args: BusinessAddArgs) -> Result<()> {
    let pool = build_pool(config)?;
    let registry = build_business_registry(&pool);
    let business = registry
        .register(
            TenantId::new(args.tenant),
            args.name,
            args.place_id.map(PlaceId::new),
        )
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "business.add",
            "business": serde_json::to_value(&business)?,
        }));
        return Ok(());
    }

    output::success("Registered business");
    output::field("ID", &business.id);
    output::field("Name", &business.name);
    output::field("Tenant", &business.tenant_id);
    match &business.place_id {
        Some(place_id) => output::field("Place ID", place_id),
        None => output::hint("no place id set; analyses will fail until one is registered"),
    }
    Ok(())
}

/// Execute `business list`.
pub async fn execute_list(config: &Config, args: TenantArg) -> Result<()> {
    let pool = build_pool(config)?;
    let registry = build_business_registry(&pool);
    let tenant = tenant(args.tenant);
    let businesses = registry.list(tenant.as_ref()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "business.list",
            "businesses": serde_json::to_value(&businesses)?,
        }));
        return Ok(());
    }

    output::section("Businesses");
    if businesses.is_empty() {
        output::note("(none registered)");
        output::hint(&format!(
            "run {} to add one",
            output::highlight("gridrank business add --tenant <id> --name <name>")
        ));
        return Ok(());
    }

    let rows: Vec<BusinessRow> = businesses.iter().map(BusinessRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Execute `business remove`.
pub async fn execute_remove(config: &Config, args: BusinessRemoveArgs) -> Result<()> {
    let pool = build_pool(config)?;
    let registry = build_business_registry(&pool);
    let id = BusinessId::from(args.business_id);
    registry.remove(&id, tenant(args.tenant).as_ref()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "business.remove",
            "business_id": id,
            "removed": true,
        }));
        return Ok(());
    }

    output::success(&format!("Removed business {id} and its analysis history"));
    Ok(())
}
