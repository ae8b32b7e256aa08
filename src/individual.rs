// ==============================================================================
// individual.rs - Individual Genotype Record
// ==============================================================================
// Description: Owns one individual's accumulated SNP table and sequences
//              classify -> parse -> normalize -> reconcile for each source
// Author: Matt Barham
// Created: 2026-10-15
// Modified: 2026-10-17
// Version: 1.1.0
// ==============================================================================

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::alleles::{double_single_alleles, HEMIZYGOUS_CHROMOSOME};
use crate::config::{RawData, Thresholds};
use crate::models::SnpTable;
use crate::output::{self, ExportError};
use crate::parsers::SourceFormat;
use crate::reconciler::{reconcile, MergeOutcome};
use crate::source::{self, SourceError};

/// Result of loading one source file
#[derive(Debug)]
pub enum SourceOutcome {
    /// File was parsed and went through reconciliation (which may still
    /// have rejected it; see `MergeOutcome::status`)
    Reconciled {
        format: SourceFormat,
        outcome: MergeOutcome,
    },
    /// File contributed nothing
    Skipped(SourceError),
}

#[derive(Debug)]
pub struct SourceReport {
    pub path: PathBuf,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    /// Whether this source changed the accumulated table
    pub fn applied(&self) -> bool {
        match &self.outcome {
            SourceOutcome::Reconciled { outcome, .. } => outcome.applied(),
            SourceOutcome::Skipped(_) => false,
        }
    }

    pub fn merge_outcome(&self) -> Option<&MergeOutcome> {
        match &self.outcome {
            SourceOutcome::Reconciled { outcome, .. } => Some(outcome),
            SourceOutcome::Skipped(_) => None,
        }
    }
}

/// Per-source results of one `load_snps` call, in load order
#[derive(Debug, Default)]
pub struct LoadReport {
    pub sources: Vec<SourceReport>,
}

impl LoadReport {
    pub fn applied(&self) -> usize {
        self.sources.iter().filter(|s| s.applied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.sources.len() - self.applied()
    }
}

/// An individual and their genetic data
#[derive(Debug, Clone)]
pub struct Individual {
    name: String,
    snps: Option<SnpTable>,
}

impl Individual {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snps: None,
        }
    }

    /// Create an individual and load raw data with default thresholds
    pub fn with_raw_data(name: impl Into<String>, raw_data: impl Into<RawData>) -> Self {
        let mut individual = Self::new(name);
        individual.load_snps(raw_data, &Thresholds::default());
        individual
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the accumulated table; None until a source has been loaded
    pub fn snps(&self) -> Option<SnpTable> {
        self.snps.clone()
    }

    pub fn snp_count(&self) -> usize {
        self.snps.as_ref().map_or(0, SnpTable::len)
    }

    /// Name cleaned into an identifier: non-word characters become `_` and a
    /// leading digit is prefixed with `_`
    pub fn var_name(&self) -> String {
        let mut cleaned: String = self
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if cleaned.chars().next().is_some_and(|c| c.is_numeric()) {
            cleaned.insert(0, '_');
        }
        cleaned
    }

    /// Load one or more raw data files in order.
    ///
    /// Every file is attempted; a missing, unrecognized, malformed or
    /// rejected file only forfeits its own contribution.
    pub fn load_snps(&mut self, raw_data: impl Into<RawData>, thresholds: &Thresholds) -> LoadReport {
        let raw_data = raw_data.into();
        let mut report = LoadReport::default();

        for path in raw_data.paths() {
            let outcome = self.load_source(path, thresholds);
            report.sources.push(SourceReport {
                path: path.clone(),
                outcome,
            });
        }

        info!(
            "{}: {} of {} sources applied, {} SNPs",
            self.name,
            report.applied(),
            report.sources.len(),
            self.snp_count()
        );
        report
    }

    fn load_source(&mut self, path: &Path, thresholds: &Thresholds) -> SourceOutcome {
        let (format, mut candidate) = match source::read_raw_data(path) {
            Ok(parsed) => parsed,
            Err(err) => {
                match &err {
                    SourceError::MissingSource(_) => warn!("{}; skipping", err),
                    SourceError::UnrecognizedFormat(_) => debug!("{}; skipping", err),
                    _ => warn!("{}", err),
                }
                return SourceOutcome::Skipped(err);
            }
        };

        let doubled = double_single_alleles(&mut candidate, HEMIZYGOUS_CHROMOSOME);
        debug!("Doubled {} single {} alleles from {}", doubled, HEMIZYGOUS_CHROMOSOME, path.display());

        let accumulated = self.snps.take().unwrap_or_default();
        let (table, outcome) = reconcile(accumulated, candidate, thresholds);
        self.snps = Some(table);

        SourceOutcome::Reconciled { format, outcome }
    }

    /// Save the accumulated table as CSV; writes nothing when no SNPs are loaded
    pub fn save_snps(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        match &self.snps {
            Some(snps) => output::save_snps(snps, path.as_ref()),
            None => {
                warn!("{}: no SNPs to save", self.name);
                Ok(0)
            }
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Individual('{}')", self.name)
    }
}
