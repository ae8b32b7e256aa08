// ==============================================================================
// parsers/mod.rs - Raw genotype file parsers
// ==============================================================================
// Description: Vendor format classification and dispatch to per-vendor parsers
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-17
// Version: 1.2.0
// ==============================================================================

pub mod ancestry;
pub mod ftdna;
pub mod genome23andme;

pub use ancestry::AncestryParser;
pub use ftdna::FtdnaParser;
pub use genome23andme::Genome23Parser;

use std::fmt;
use std::io::BufRead;
use thiserror::Error;
use tracing::warn;

use crate::models::{SnpRecord, SnpTable};

/// No-call marker used by 23andMe and FTDNA exports
pub const MISSING_GENOTYPE: &str = "--";

/// Errors that can occur while parsing a recognized raw data file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid line format at line {line}: {details}")]
    InvalidFormat { line: usize, details: String },

    #[error("Invalid position value at line {line}: {value}")]
    InvalidPosition { line: usize, value: String },

    #[error("Missing header row")]
    MissingHeader,

    #[error("File is empty or contains only comments")]
    EmptyFile,
}

/// Raw data vendors recognized from the first line of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// 23andMe: tab-separated, `#` comments, `--` no-calls
    TwentyThreeAndMe,
    /// Family Tree DNA: one header row, comma (or tab) separated
    FamilyTreeDna,
    /// AncestryDNA: split allele columns, numeric sex/mito chromosome codes
    AncestryDna,
}

impl SourceFormat {
    /// Pick a parser from the first line of a (decompressed) file.
    ///
    /// Returns `None` for content that matches no known vendor signature.
    pub fn classify(first_line: &str) -> Option<Self> {
        if first_line.contains("23andMe") {
            Some(SourceFormat::TwentyThreeAndMe)
        } else if first_line.contains("Ancestry") {
            Some(SourceFormat::AncestryDna)
        } else if first_line.starts_with("RSID") {
            Some(SourceFormat::FamilyTreeDna)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::TwentyThreeAndMe => "23andMe",
            SourceFormat::FamilyTreeDna => "FTDNA",
            SourceFormat::AncestryDna => "AncestryDNA",
        }
    }

    /// Parse a complete file of this format into a canonical table
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<SnpTable, ParseError> {
        match self {
            SourceFormat::TwentyThreeAndMe => Genome23Parser::new().parse_reader(reader),
            SourceFormat::FamilyTreeDna => FtdnaParser::new().parse_reader(reader),
            SourceFormat::AncestryDna => AncestryParser::new().parse_reader(reader),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn parse_position(value: &str, line: usize) -> Result<u64, ParseError> {
    value.parse::<u64>().map_err(|_| ParseError::InvalidPosition {
        line,
        value: value.to_string(),
    })
}

/// Map a genotype field to None when it is empty or a vendor no-call marker
pub(crate) fn genotype_or_missing(value: &str, missing: &str) -> Option<String> {
    if value.is_empty() || value == missing {
        None
    } else {
        Some(value.to_string())
    }
}

/// Add a parsed row, dropping later duplicates of an rsid
pub(crate) fn push_record(table: &mut SnpTable, record: SnpRecord, line: usize) {
    let rsid = record.rsid.clone();
    if !table.insert(record) {
        warn!("Duplicate rsid {} at line {}; keeping first occurrence", rsid, line);
    }
}
