// ==============================================================================
// main.rs - Genotype Reconciler Entry Point
// ==============================================================================
// Description: Loads raw genotype files for one individual, reconciles them
//              and optionally exports the consolidated SNP table
// Author: Matt Barham
// Created: 2026-10-15
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genotype_reconciler::config::{
    LoadManifest, DEFAULT_GENOTYPE_THRESHOLD, DEFAULT_POSITION_THRESHOLD,
};
use genotype_reconciler::{Individual, LoadReport, RawData, SourceOutcome, Thresholds};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Individual's display name (required unless --manifest is given)
    #[arg(short, long)]
    name: Option<String>,

    /// Raw data files, loaded in the order given
    #[arg(short, long = "raw-data", num_args = 1..)]
    raw_data: Vec<PathBuf>,

    /// JSON load manifest (name, raw_data, thresholds, output)
    #[arg(short, long, conflicts_with_all = ["name", "raw_data"])]
    manifest: Option<PathBuf>,

    /// Write the consolidated SNP table to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Position discrepancies at which a source is rejected
    #[arg(long, env = "POSITION_THRESHOLD", default_value_t = DEFAULT_POSITION_THRESHOLD)]
    position_threshold: usize,

    /// Genotype discrepancies at which a source is rejected
    #[arg(long, env = "GENOTYPE_THRESHOLD", default_value_t = DEFAULT_GENOTYPE_THRESHOLD)]
    genotype_threshold: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genotype_reconciler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let (name, raw_data, thresholds, output) = match &args.manifest {
        Some(path) => {
            let manifest = LoadManifest::from_path(path)
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            let raw_data = manifest.raw_data()?;
            let output = args.output.clone().or(manifest.output);
            (manifest.name, raw_data, manifest.thresholds, output)
        }
        None => {
            let name = args
                .name
                .clone()
                .context("--name is required without --manifest")?;
            if args.raw_data.is_empty() {
                anyhow::bail!("--raw-data is required without --manifest");
            }
            let thresholds = Thresholds {
                positions: args.position_threshold,
                genotypes: args.genotype_threshold,
            };
            (name, RawData::Many(args.raw_data.clone()), thresholds, args.output.clone())
        }
    };

    info!("Loading {} source(s) for {}", raw_data.paths().len(), name);

    let mut individual = Individual::new(name);
    let report = individual.load_snps(raw_data, &thresholds);

    println!("{}", serde_json::to_string_pretty(&summarize(&individual, &report))?);

    if let Some(path) = output {
        individual
            .save_snps(&path)
            .with_context(|| format!("Failed to save SNPs to {}", path.display()))?;
    }

    Ok(())
}

fn summarize(individual: &Individual, report: &LoadReport) -> serde_json::Value {
    let sources: Vec<serde_json::Value> = report
        .sources
        .iter()
        .map(|source| match &source.outcome {
            SourceOutcome::Reconciled { format, outcome } => serde_json::json!({
                "path": source.path,
                "format": format.as_str(),
                "status": outcome.status,
                "common_snps": outcome.common_snps,
                "added_snps": outcome.added_snps,
                "filled_genotypes": outcome.filled_genotypes,
                "discrepant_positions": outcome.discrepant_positions.len(),
                "discrepant_genotypes": outcome.discrepant_genotypes.len(),
            }),
            SourceOutcome::Skipped(err) => serde_json::json!({
                "path": source.path,
                "status": "skipped",
                "reason": err.to_string(),
            }),
        })
        .collect();

    serde_json::json!({
        "individual": individual.name(),
        "var_name": individual.var_name(),
        "snps": individual.snp_count(),
        "sources": sources,
    })
}
