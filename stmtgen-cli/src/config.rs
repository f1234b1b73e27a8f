use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stmtgen_core::{Catalog, DEFAULT_PERIOD_PADDING_DAYS, TransactionCategory};
use tracing::info;

use crate::output::OutputFormat;
use crate::state::{ensure_stmtgen_home, stmtgen_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Synthetic transactions when `--count` is not given
    pub default_count: i64,
    /// Upper bound accepted for `--count`
    pub max_count: i64,
    /// Fixed seed for every run (optional)
    pub seed: Option<u64>,
    /// TOML file replacing the built-in catalog (optional)
    pub catalog: Option<PathBuf>,
    pub period_padding_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub default_format: OutputFormat,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            default_count: 10,
            max_count: 50,
            seed: None,
            catalog: None,
            period_padding_days: DEFAULT_PERIOD_PADDING_DAYS,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(stmtgen_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_stmtgen_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

impl Config {
    /// Resolve the requested count against the configured default and cap.
    pub fn effective_count(&self, requested: Option<i64>) -> Result<i64> {
        let count = requested.unwrap_or(self.generator.default_count);
        if count > self.generator.max_count {
            bail!(
                "count {} exceeds max_count {} (raise it in {})",
                count,
                self.generator.max_count,
                config_path().map(|p| p.display().to_string()).unwrap_or_default()
            );
        }
        Ok(count)
    }

    /// The catalog to generate from: the configured file, else the built-in table.
    pub fn catalog(&self) -> Result<CatalogChoice> {
        match &self.generator.catalog {
            Some(path) => Ok(CatalogChoice::Custom(load_catalog(path)?)),
            None => {
                Catalog::builtin()
                    .self_check()
                    .context("built-in catalog failed its self-check")?;
                Ok(CatalogChoice::Builtin)
            }
        }
    }
}

pub enum CatalogChoice {
    Builtin,
    Custom(Catalog),
}

impl CatalogChoice {
    pub fn get(&self) -> &Catalog {
        match self {
            CatalogChoice::Builtin => Catalog::builtin(),
            CatalogChoice::Custom(c) => c,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    category: Vec<TransactionCategory>,
}

/// Catalog file: one `[[category]]` table per entry.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: CatalogFile = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    let catalog = Catalog::new(file.category).with_context(|| format!("validate {}", path.display()))?;
    info!(path = %path.display(), categories = catalog.list_categories().len(), "loaded custom catalog");
    Ok(catalog)
}
