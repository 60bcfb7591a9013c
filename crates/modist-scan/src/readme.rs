//! README model-table templating
//!
//! The distribution repo's README carries a `## Models` section listing the
//! published models. The scanner regenerates that table after every update
//! so it never drifts from the manifest.

use modist_manifest::Model;
use std::fs;
use std::io;
use std::path::Path;

const MODELS_HEADING: &str = "## Models";

/// Render the `## Models` section for a set of models
pub fn render_models_table(models: &[Model]) -> String {
    let mut section = String::new();
    section.push_str(MODELS_HEADING);
    section.push_str("\n\n| ID | Name | Size |\n|----|------|------|\n");

    for model in models {
        let size_mb = model.total_size() as f64 / (1024.0 * 1024.0);
        section.push_str(&format!(
            "| {} | {} | {:.1}MB |\n",
            model.id, model.name, size_mb
        ));
    }

    section
}

/// Replace the `## Models` section of a README with a regenerated table
///
/// The section runs from the heading to the next `## ` heading (or end of
/// file). Returns `false` without touching anything when the README or the
/// heading is absent; a repo without the section simply doesn't get one.
pub fn update_readme(path: &Path, models: &[Model]) -> io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let Some(start) = content.find(MODELS_HEADING) else {
        return Ok(false);
    };

    let after_heading = start + MODELS_HEADING.len();
    let section_end = content[after_heading..]
        .find("\n## ")
        .map(|i| after_heading + i)
        .unwrap_or(content.len());

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..start]);
    updated.push_str(&render_models_table(models));
    updated.push_str(&content[section_end..]);

    fs::write(path, updated)?;
    Ok(true)
}
