// ==============================================================================
// config.rs - Load Configuration
// ==============================================================================
// Description: Discrepancy thresholds, load arguments and JSON load manifests
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Manifest example:
//   {
//     "name": "User662",
//     "raw_data": ["genome_v4.txt", "ancestry.zip"],
//     "thresholds": { "positions": 100, "genotypes": 10000 },
//     "output": "user662.csv"
//   }
// ==============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default number of rsids whose position may disagree before a load is
/// treated as a genome build mismatch
pub const DEFAULT_POSITION_THRESHOLD: usize = 100;

/// Default number of rsids whose genotype may disagree before a load is
/// treated as a different individual
pub const DEFAULT_GENOTYPE_THRESHOLD: usize = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid load argument: {0}")]
    InvalidLoadArgument(String),

    #[error("Failed to read manifest {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Discrepancy limits applied when merging a new source into existing data.
///
/// Counts strictly below a limit are reconciled with a warning; counts at or
/// above it reject the whole source, so a zero limit rejects every merge
/// into existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Limit for rsids whose chromosome or position differ
    pub positions: usize,
    /// Limit for rsids whose genotypes differ
    pub genotypes: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positions: DEFAULT_POSITION_THRESHOLD,
            genotypes: DEFAULT_GENOTYPE_THRESHOLD,
        }
    }
}

/// One path or an ordered list of paths to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawData {
    Single(PathBuf),
    Many(Vec<PathBuf>),
}

impl RawData {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            RawData::Single(path) => std::slice::from_ref(path),
            RawData::Many(paths) => paths,
        }
    }

    /// Interpret a dynamically typed value: a string or an array of strings.
    ///
    /// Anything else is rejected as an invalid load argument.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(path) => Ok(RawData::Single(PathBuf::from(path))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(path) => Ok(PathBuf::from(path)),
                    other => Err(ConfigError::InvalidLoadArgument(format!(
                        "expected a file path, found {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RawData::Many),
            other => Err(ConfigError::InvalidLoadArgument(format!(
                "expected a path or a list of paths, found {}",
                other
            ))),
        }
    }
}

impl From<PathBuf> for RawData {
    fn from(path: PathBuf) -> Self {
        RawData::Single(path)
    }
}

impl From<&Path> for RawData {
    fn from(path: &Path) -> Self {
        RawData::Single(path.to_path_buf())
    }
}

impl From<&str> for RawData {
    fn from(path: &str) -> Self {
        RawData::Single(PathBuf::from(path))
    }
}

impl From<String> for RawData {
    fn from(path: String) -> Self {
        RawData::Single(PathBuf::from(path))
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for RawData {
    fn from(paths: Vec<P>) -> Self {
        RawData::Many(paths.into_iter().map(Into::into).collect())
    }
}

/// Declarative description of one individual's load
#[derive(Debug, Clone, Deserialize)]
pub struct LoadManifest {
    pub name: String,
    /// Kept untyped so malformed shapes surface as an invalid load argument
    #[serde(default)]
    pub raw_data: Value,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl LoadManifest {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn raw_data(&self) -> Result<RawData, ConfigError> {
        RawData::from_value(&self.raw_data)
    }
}
