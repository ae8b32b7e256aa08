// ==============================================================================
// output.rs - SNP Table Export
// ==============================================================================
// Description: Writes the canonical SNP table as a flat CSV file
// Author: Matt Barham
// Created: 2026-10-15
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Format:
//   rsid,chromosome,position,genotype
//   rs3094315,1,752566,AA
//   rs3131972,1,752721,--
// ==============================================================================

use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::SnpTable;
use crate::parsers::MISSING_GENOTYPE;

pub const HEADER: [&str; 4] = ["rsid", "chromosome", "position", "genotype"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Write every row, in table order, to `writer`
pub fn write_snps<W: Write>(table: &SnpTable, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for record in table {
        let position = record.position.to_string();
        csv_writer.write_record([
            record.rsid.as_str(),
            record.chromosome.as_str(),
            position.as_str(),
            record.genotype.as_deref().unwrap_or(MISSING_GENOTYPE),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the table to `path`, returning the number of rows written
pub fn save_snps(table: &SnpTable, path: &Path) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    write_snps(table, file)?;
    info!("Saved {} SNPs to {}", table.len(), path.display());
    Ok(table.len())
}
