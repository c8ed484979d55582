//! `spmb export [--search TERM] [--status STATUS]`

use std::io::Write;
use std::sync::Arc;

use spmb_core::Settings;
use spmb_portal::{fixtures, InMemoryRepository, RegistrantTable, StatusFilter};

use crate::Outcome;

/// Prints the filtered seed registrants as CSV.
pub async fn run(
    search: Option<&str>,
    status: &str,
    settings: &Settings,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let filter: StatusFilter = status.parse()?;
    let repo = Arc::new(InMemoryRepository::with_items(fixtures::registrations()));
    let mut table = RegistrantTable::load(repo, settings.items_per_page).await?;
    if let Some(term) = search {
        table.set_search(term);
    }
    table.set_status_filter(filter);
    writeln!(out, "{}", table.export_csv()?)?;
    tracing::info!(rows = table.export_rows().len(), "exported registrants");
    Ok(Outcome::Success)
}
