// ==============================================================================
// reconciler.rs - Multi-Source SNP Reconciliation
// ==============================================================================
// Description: Merges a freshly parsed table into an individual's accumulated
//              table, detecting build and identity mismatches
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-17
// Version: 1.2.0
// ==============================================================================
// Algorithm:
//   1. Nothing accumulated yet -> adopt the candidate as-is
//   2. For rsids present in both tables:
//      - chromosome/position mismatches: < threshold keep existing locus,
//        >= threshold reject the candidate (likely a different genome build)
//      - genotype mismatches (non-null, allele order ignored): < threshold
//        null them after merging, >= threshold reject the candidate (likely a
//        different individual)
//   3. Merge: existing values win, the candidate only fills gaps
//   4. Re-sort by chromosome rank and position
// ==============================================================================

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::alleles::genotypes_discrepant;
use crate::chromosome::sort_snps;
use crate::config::Thresholds;
use crate::models::SnpTable;

/// What happened to a candidate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStatus {
    /// No prior data; the candidate became the accumulated table
    Adopted,
    /// Candidate merged into existing data
    Merged,
    /// Too many position discrepancies; existing data left untouched
    PositionsRejected,
    /// Too many genotype discrepancies; existing data left untouched
    GenotypesRejected,
}

/// Structured result of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub status: MergeStatus,
    /// Rsids present in both tables
    pub common_snps: usize,
    /// Rows new to the accumulated table
    pub added_snps: usize,
    /// Null genotypes filled from the candidate
    pub filled_genotypes: usize,
    /// Rsids whose chromosome or position differ, in accumulated order
    pub discrepant_positions: Vec<String>,
    /// Rsids whose genotypes differ, in accumulated order
    pub discrepant_genotypes: Vec<String>,
}

impl MergeOutcome {
    fn new(status: MergeStatus) -> Self {
        Self {
            status,
            common_snps: 0,
            added_snps: 0,
            filled_genotypes: 0,
            discrepant_positions: Vec::new(),
            discrepant_genotypes: Vec::new(),
        }
    }

    /// Whether the candidate changed the accumulated table
    pub fn applied(&self) -> bool {
        matches!(self.status, MergeStatus::Adopted | MergeStatus::Merged)
    }
}

/// Reconcile `candidate` into `accumulated`.
///
/// Both tables are taken by value and the resulting accumulated table is
/// returned. On rejection the returned table is `accumulated`, unmodified.
pub fn reconcile(
    accumulated: SnpTable,
    candidate: SnpTable,
    thresholds: &Thresholds,
) -> (SnpTable, MergeOutcome) {
    if accumulated.is_empty() {
        let mut adopted = candidate;
        sort_snps(&mut adopted);

        let mut outcome = MergeOutcome::new(MergeStatus::Adopted);
        outcome.added_snps = adopted.len();
        return (adopted, outcome);
    }

    let mut outcome = MergeOutcome::new(MergeStatus::Merged);

    for existing in accumulated.iter() {
        let Some(added) = candidate.get(&existing.rsid) else {
            continue;
        };
        outcome.common_snps += 1;

        if existing.locus_differs(added) {
            outcome.discrepant_positions.push(existing.rsid.clone());
        }
    }

    let positions = outcome.discrepant_positions.len();
    if exceeds(positions, thresholds.positions) {
        warn!(
            "Too many SNPs differ in position ({} >= {}); ensure same genome build is being used",
            positions, thresholds.positions
        );
        outcome.status = MergeStatus::PositionsRejected;
        return (accumulated, outcome);
    }
    if positions > 0 {
        warn!(
            "{} SNP positions being added differ; keeping original positions",
            positions
        );
        debug!("Discrepant positions: {:?}", outcome.discrepant_positions);
    }

    for existing in accumulated.iter() {
        let Some(added) = candidate.get(&existing.rsid) else {
            continue;
        };
        if let (Some(a), Some(b)) = (&existing.genotype, &added.genotype) {
            if genotypes_discrepant(a, b) {
                outcome.discrepant_genotypes.push(existing.rsid.clone());
            }
        }
    }

    let genotypes = outcome.discrepant_genotypes.len();
    if exceeds(genotypes, thresholds.genotypes) {
        warn!(
            "Too many SNPs differ in their genotype ({} >= {}); ensure file is for same individual",
            genotypes, thresholds.genotypes
        );
        outcome.status = MergeStatus::GenotypesRejected;
        return (accumulated, outcome);
    }
    if genotypes > 0 {
        warn!(
            "{} genotypes were discrepant; marking those as null",
            genotypes
        );
        debug!("Discrepant genotypes: {:?}", outcome.discrepant_genotypes);
    }

    let mut merged = accumulated;
    for record in candidate.into_records() {
        match merged.get_mut(&record.rsid) {
            Some(existing) => {
                if existing.genotype.is_none() && record.genotype.is_some() {
                    existing.genotype = record.genotype;
                    outcome.filled_genotypes += 1;
                }
            }
            None => {
                merged.insert(record);
                outcome.added_snps += 1;
            }
        }
    }

    for rsid in &outcome.discrepant_genotypes {
        if let Some(record) = merged.get_mut(rsid) {
            record.genotype = None;
        }
    }

    sort_snps(&mut merged);

    info!(
        "Merged {} new SNPs ({} shared, {} genotypes filled)",
        outcome.added_snps, outcome.common_snps, outcome.filled_genotypes
    );
    (merged, outcome)
}

/// A discrepancy count at or above its limit; a zero limit rejects every merge
fn exceeds(count: usize, threshold: usize) -> bool {
    count >= threshold
}
