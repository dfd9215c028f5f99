//! JSON configuration with environment overrides.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    catalog::{
        product::ProductKind,
        template::{TemplateCatalog, TemplateSpec},
    },
    encode::raster::ExportFormat,
    foundation::error::{MockupError, MockupResult},
};

pub const ENV_ASSETS_DIR: &str = "PRINTMOCK_ASSETS_DIR";
pub const ENV_JPEG_QUALITY: &str = "PRINTMOCK_JPEG_QUALITY";
pub const ENV_THREADS: &str = "PRINTMOCK_THREADS";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSettings {
    #[serde(default)]
    pub format: ExportFormat,
    /// Worker threads for multi-product export. `None` lets rayon decide.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl ExportSettings {
    pub fn validate(&self) -> MockupResult<()> {
        self.format.validate()?;
        if self.threads == Some(0) {
            return Err(MockupError::validation(
                "export 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockupConfig {
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    #[serde(default)]
    pub export: ExportSettings,
    /// Replacements for built-in templates, keyed by product.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub templates: BTreeMap<ProductKind, TemplateSpec>,
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            export: ExportSettings::default(),
            templates: BTreeMap::new(),
        }
    }
}

impl MockupConfig {
    pub fn load(path: &Path) -> MockupResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> MockupResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| MockupError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `PRINTMOCK_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparseable or out-of-range values are ignored.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_ASSETS_DIR).filter(|s| !s.trim().is_empty()) {
            self.assets_root = PathBuf::from(dir);
        }
        if let Some(q) = lookup(ENV_JPEG_QUALITY)
            .and_then(|s| s.trim().parse::<u8>().ok())
            .filter(|q| (1..=100).contains(q))
        {
            self.export.format = ExportFormat::Jpeg { quality: q };
        }
        if let Some(n) = lookup(ENV_THREADS)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            self.export.threads = Some(n);
        }
        self
    }

    pub fn validate(&self) -> MockupResult<()> {
        self.export.validate()?;
        self.catalog().map(|_| ())
    }

    /// Built-in templates with this config's overrides applied.
    pub fn catalog(&self) -> MockupResult<TemplateCatalog> {
        let catalog = self
            .templates
            .iter()
            .try_fold(TemplateCatalog::builtin(), |cat, (kind, spec)| {
                cat.with_override(*kind, spec.clone())
            })?;
        catalog.validate()?;
        Ok(catalog)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/config.rs"]
mod tests;
