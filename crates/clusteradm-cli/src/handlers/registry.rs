//! Registry command handlers.

use anyhow::Result;

use clusteradm_registry::{AddRegistry, RemoveRegistry};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute `registry add`.
pub async fn add(ctx: &CliContext, request: AddRegistry) -> Result<()> {
    ctx.registry()
        .add(&request)
        .await
        .map_err(CliError::from)?;
    Ok(())
}

/// Execute `registry remove`.
///
/// Succeeds when nothing matched; the workflow prints a notice instead.
pub async fn remove(ctx: &CliContext, request: RemoveRegistry) -> Result<()> {
    ctx.registry()
        .remove(&request)
        .await
        .map_err(CliError::from)?;
    Ok(())
}

/// Execute `registry list`.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let entries = ctx.registry().list().await.map_err(CliError::from)?;

    if entries.is_empty() {
        ctx.output().line("No registry found");
        return Ok(());
    }

    for entry in entries {
        ctx.output().line(&format!(
            "{}  {}  {}",
            entry.secret, entry.server, entry.username
        ));
    }
    Ok(())
}
