//! Generator configuration.
//!
//! Example `ifacegen.toml`:
//! ```toml
//! schema = "scripts/omm.json"
//! prefix = "omm"
//!
//! [[target]]
//! syntax = "c"
//! output = "include/omm.h"
//! header = "scripts/omm_header_c.txt"
//! include_guard = "INCLUDE_OMM_SDK_C"
//!
//! [[target]]
//! syntax = "cpp"
//! output = "include/omm.hpp"
//! header = "scripts/omm_header_cpp.txt"
//! footer = "scripts/omm_footer_cpp.txt"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use anyhow::Context as _;
use ifacegen_emit::EmitOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "ifacegen.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Schema document.
    pub schema: PathBuf,
    /// Library prefix the macro names and bool alias derive from.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub export_macro: Option<String>,
    pub flag_macro: Option<String>,
    pub bool_alias: Option<String>,
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetConfig>,
}

/// One generated header.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Registry name of the syntax (`c`, `cpp`).
    pub syntax: String,
    pub output: PathBuf,
    /// File whose text precedes the generated declarations.
    pub header: Option<PathBuf>,
    /// File whose text follows the generated declarations.
    pub footer: Option<PathBuf>,
    /// Macro closed with `#endif` when there is no footer.
    pub include_guard: Option<String>,
}

fn default_prefix() -> String {
    "lib".to_string()
}

impl GeneratorConfig {
    /// Load a config file and resolve its paths.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(path = %path.display(), targets = config.targets.len(), "loaded config");
        Ok(config.resolve(base))
    }

    /// Make every relative path relative to `base`.
    pub fn resolve(mut self, base: &Path) -> Self {
        self.schema = base.join(&self.schema);
        for target in &mut self.targets {
            target.output = base.join(&target.output);
            target.header = target.header.take().map(|p| base.join(p));
            target.footer = target.footer.take().map(|p| base.join(p));
        }
        self
    }

    /// Emitter names, prefix-derived unless overridden.
    pub fn emit_options(&self) -> EmitOptions {
        let mut options = EmitOptions::for_prefix(&self.prefix);
        if let Some(export_macro) = &self.export_macro {
            options.export_macro = export_macro.clone();
        }
        if let Some(flag_macro) = &self.flag_macro {
            options.flag_macro = flag_macro.clone();
        }
        if let Some(bool_alias) = &self.bool_alias {
            options.bool_alias = bool_alias.clone();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn paths_resolve_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
schema = "scripts/omm.json"
prefix = "omm"

[[target]]
syntax = "c"
output = "include/omm.h"
header = "scripts/omm_header_c.txt"
include_guard = "INCLUDE_OMM_SDK_C"
"#
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.schema, tmp.path().join("scripts/omm.json"));
        let target = &config.targets[0];
        assert_eq!(target.output, tmp.path().join("include/omm.h"));
        assert_eq!(
            target.header.as_deref(),
            Some(tmp.path().join("scripts/omm_header_c.txt").as_path())
        );
        assert_eq!(target.footer, None);
        assert_eq!(target.include_guard.as_deref(), Some("INCLUDE_OMM_SDK_C"));
    }

    #[test]
    fn overrides_replace_derived_names() {
        let config: GeneratorConfig = toml::from_str(
            r#"
schema = "s.json"
prefix = "omm"
export_macro = "OMM_EXPORT"
"#,
        )
        .unwrap();
        let options = config.emit_options();
        assert_eq!(options.export_macro, "OMM_EXPORT");
        assert_eq!(options.flag_macro, "OMM_DEFINE_ENUM_FLAG_OPERATORS");
        assert_eq!(options.bool_alias, "ommBool");
        assert!(config.targets.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<GeneratorConfig, _> = toml::from_str("schema = \"s.json\"\nlayout = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/ifacegen.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ifacegen.toml"));
    }
}
