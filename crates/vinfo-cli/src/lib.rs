//! # vinfo-cli - CLI Tool for Custom Vehicle Data
//!
//! Provides the `vinfo` command-line interface over the schema engine.
//! Every subcommand loads a policy file first, then runs one engine
//! operation against it.
//!
//! ## Subcommands
//!
//! - `vinfo validate`: Validate a message against the policy schema.
//! - `vinfo canonicalize`: Rename head-unit parameters to app-facing names.
//! - `vinfo to-head-unit`: Rename app-facing parameters to head-unit keys.
//! - `vinfo presence`: Build the head-unit presence map for item names.
//! - `vinfo type`: Print the type of a custom item.
//! - `vinfo lookup`: Print the item a name or key resolves to.
//!
//! ```bash
//! vinfo --policy sdl_preloaded_pt.json validate request.json
//! vinfo --policy policy.yaml canonicalize hmi_response.json
//! vinfo --policy policy.yaml lookup --key --recursive OEM_REF_FAN
//! ```

pub mod inspect;
pub mod message;

use std::path::Path;

use anyhow::{Context, Result};

use vinfo_core::{EnumCatalog, RpcSpecVehicleData};
use vinfo_schema::{load_enum_catalog, load_policy_file, SchemaStore, VehicleDataManager};

/// The engine configuration the CLI runs with.
pub type Manager = VehicleDataManager<SchemaStore, EnumCatalog, RpcSpecVehicleData>;

/// Load a policy file, and optionally an extra enum catalog merged over
/// the base-spec enums, into a ready manager.
pub fn open_manager(policy: &Path, enums: Option<&Path>) -> Result<Manager> {
    let section = load_policy_file(policy)
        .with_context(|| format!("failed to load policy: {}", policy.display()))?;

    let mut catalog = EnumCatalog::rpc_spec();
    if let Some(path) = enums {
        let extra = load_enum_catalog(path)
            .with_context(|| format!("failed to load enum catalog: {}", path.display()))?;
        tracing::debug!(enums = extra.len(), path = %path.display(), "merging enum catalog");
        catalog.merge(extra);
    }

    tracing::info!(
        schema_version = section.schema_version.as_deref().unwrap_or("-"),
        items = section.schema_items.len(),
        "loaded vehicle data schema"
    );
    let store = SchemaStore::with_items(section.schema_items)
        .context("policy contains a malformed schema item")?;
    Ok(VehicleDataManager::new(store, catalog, RpcSpecVehicleData))
}
