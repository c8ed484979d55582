//! One module per subcommand.

pub mod check_template;
pub mod export;
pub mod regnum;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use spmb_forms::FormTemplate;

/// Reads and validates a template JSON file.
pub(crate) fn read_template(path: &Path) -> anyhow::Result<FormTemplate> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read template {}", path.display()))?;
    FormTemplate::from_json(&json).with_context(|| format!("invalid template {}", path.display()))
}
