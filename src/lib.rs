// ==============================================================================
// lib.rs - Genotype Reconciler Library
// ==============================================================================
// Description: Raw genotype ingestion and multi-source reconciliation for
//              per-individual SNP tables
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod alleles;
pub mod chromosome;
pub mod config;
pub mod individual;
pub mod models;
pub mod output;
pub mod parsers;
pub mod reconciler;
pub mod source;

pub use config::{RawData, Thresholds};
pub use individual::{Individual, LoadReport, SourceOutcome};
pub use models::{SnpRecord, SnpTable};
pub use reconciler::{reconcile, MergeOutcome, MergeStatus};
