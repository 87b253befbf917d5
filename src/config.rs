// File: src/config.rs
//! Run configuration. TOML-based, resolved as: CLI > config file > defaults.

use crate::core::classifier::{Modulus, DAYS_OF_THE_WEEK};
use crate::core::encoder::{FinalLetterTable, SchemeRegistry};
use crate::errors::ConfigError;
use crate::persistence::OutputFormat;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "data/strongs-hebrew-dictionary.json";
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Everything a run can be told. Unset fields fall back to their defaults
/// when the config is resolved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MisparConfig {
    /// Equivalence base. Default: 7.
    pub base: Option<i64>,
    /// Schemes to compute and emit. Default: every registered scheme.
    pub schemes: Option<Vec<String>>,
    /// Output formats. Default: json.
    pub formats: Option<Vec<OutputFormat>>,
    /// Strong's dictionary JSON.
    pub input: Option<PathBuf>,
    /// Directory the output documents are written to.
    pub output_dir: Option<PathBuf>,
    /// Gadol values for final letters, e.g. `"ם" = 600`.
    pub final_letters: BTreeMap<String, u32>,
}

impl MisparConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: origin.to_string(), source })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: origin.clone(), source })?;
        Self::from_toml_str(&text, &origin)
    }

    /// Layers `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn merge(mut self, overrides: MisparConfig) -> Self {
        self.base = overrides.base.or(self.base);
        self.schemes = overrides.schemes.or(self.schemes);
        self.formats = overrides.formats.or(self.formats);
        self.input = overrides.input.or(self.input);
        self.output_dir = overrides.output_dir.or(self.output_dir);
        self.final_letters.extend(overrides.final_letters);
        self
    }

    pub fn effective_base(&self) -> i64 {
        self.base.unwrap_or(i64::from(DAYS_OF_THE_WEEK))
    }

    pub fn effective_formats(&self) -> Vec<OutputFormat> {
        match &self.formats {
            Some(formats) if !formats.is_empty() => formats.clone(),
            _ => vec![OutputFormat::Json],
        }
    }

    pub fn effective_input(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn final_letter_table(&self) -> Result<FinalLetterTable, ConfigError> {
        self.final_letters.iter().try_fold(FinalLetterTable::default(), |table, (key, &value)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => Ok(table.with_override(letter, value)),
                _ => Err(ConfigError::InvalidFinalLetter { key: key.clone() }),
            }
        })
    }

    /// Validates every setting. Nothing is read from disk here, so a bad
    /// config fails before the input is touched.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let modulus = Modulus::new(self.effective_base())?;
        let registry = SchemeRegistry::standard(self.final_letter_table()?);
        let registry = match &self.schemes {
            Some(names) => registry.select(names)?,
            None => registry,
        };
        Ok(ResolvedConfig {
            modulus,
            registry,
            formats: self.effective_formats(),
            input: self.effective_input(),
            output_dir: self.effective_output_dir(),
        })
    }
}

/// A validated configuration, ready to drive a pipeline.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub modulus: Modulus,
    pub registry: SchemeRegistry,
    pub formats: Vec<OutputFormat>,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}
