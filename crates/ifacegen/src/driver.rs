//! Render configured targets and write them out.
//!
//! Every target is rendered before any file is touched, so a bad schema or an
//! unknown syntax leaves existing headers as they were.

use crate::config::{GeneratorConfig, TargetConfig};
use anyhow::Context as _;
use ifacegen_emit::EmitOptions;
use ifacegen_schema::Schema;
use std::path::{Path, PathBuf};

/// A fully assembled header waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTarget {
    pub syntax: String,
    pub output: PathBuf,
    pub contents: String,
}

/// Load a schema document from disk.
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let schema = ifacegen_schema::from_json(&text)
        .with_context(|| format!("invalid schema {}", path.display()))?;
    Ok(schema)
}

/// Wrap generated declarations in the optional preamble and epilogue.
///
/// A footer wins over an include guard; the guard only closes output that
/// has no footer of its own.
pub fn assemble(
    generated: &str,
    header: Option<&str>,
    footer: Option<&str>,
    include_guard: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(header) = header {
        out.push_str(header.trim_end());
        out.push_str("\n\n");
    }
    out.push_str(generated);
    match (footer, include_guard) {
        (Some(footer), _) => {
            out.push('\n');
            out.push_str(footer.trim_end());
            out.push('\n');
        }
        (None, Some(guard)) => {
            out.push_str(&format!("#endif // #ifndef {guard}\n"));
        }
        (None, None) => {}
    }
    out
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
    })
    .transpose()
}

fn render_target(
    schema: &Schema,
    options: &EmitOptions,
    target: &TargetConfig,
) -> anyhow::Result<RenderedTarget> {
    let generated = ifacegen_emit::generate(schema, &target.syntax, options)
        .with_context(|| format!("failed to render {}", target.output.display()))?;
    let header = read_optional(target.header.as_deref())?;
    let footer = read_optional(target.footer.as_deref())?;
    Ok(RenderedTarget {
        syntax: target.syntax.clone(),
        output: target.output.clone(),
        contents: assemble(
            &generated,
            header.as_deref(),
            footer.as_deref(),
            target.include_guard.as_deref(),
        ),
    })
}

/// Render the targets whose syntax is in `only` (all targets if empty).
pub fn render_targets(
    config: &GeneratorConfig,
    only: &[String],
) -> anyhow::Result<Vec<RenderedTarget>> {
    let schema = load_schema(&config.schema)?;
    let options = config.emit_options();
    config
        .targets
        .iter()
        .filter(|t| only.is_empty() || only.contains(&t.syntax))
        .map(|t| render_target(&schema, &options, t))
        .collect()
}

/// Write rendered targets, creating parent directories as needed.
pub fn write_targets(rendered: &[RenderedTarget]) -> anyhow::Result<()> {
    for target in rendered {
        if let Some(parent) = target.output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&target.output, &target.contents)
            .with_context(|| format!("failed to write {}", target.output.display()))?;
        tracing::info!(
            syntax = %target.syntax,
            path = %target.output.display(),
            bytes = target.contents.len(),
            "wrote header"
        );
    }
    Ok(())
}

/// Render then write every selected target. Returns the number written.
pub fn generate(config: &GeneratorConfig, only: &[String]) -> anyhow::Result<usize> {
    let rendered = render_targets(config, only)?;
    if rendered.is_empty() {
        tracing::warn!("no targets selected");
    }
    write_targets(&rendered)?;
    Ok(rendered.len())
}
