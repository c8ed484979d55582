//! `spmb check-template <template.json>`

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use spmb_forms::RendererRegistry;

use super::read_template;
use crate::Outcome;

/// Prints the render spec of every field as a JSON array.
pub fn run(template: &Path, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let template = read_template(template)?;
    let specs = RendererRegistry::default().render_template(&template, &HashMap::new())?;
    serde_json::to_writer_pretty(&mut *out, &specs)?;
    writeln!(out)?;
    tracing::info!(template = template.id(), fields = specs.len(), "template is valid");
    Ok(Outcome::Success)
}
