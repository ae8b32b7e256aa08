// ==============================================================================
// ftdna.rs - Family Tree DNA Raw Data Parser
// ==============================================================================
// Description: Parser for FTDNA raw data exports (one header row, quoted CSV)
// Author: Matt Barham
// Created: 2026-10-13
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================
// Format: Comma-delimited text with a single header row
// Example:
//   RSID,CHROMOSOME,POSITION,RESULT
//   "rs4477212","1","82154","AA"
//   "rs3094315","1","752566","--"
// ==============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{genotype_or_missing, parse_position, push_record, ParseError, MISSING_GENOTYPE};
use crate::models::{SnpRecord, SnpTable};

/// Parser for Family Tree DNA raw data files
#[derive(Debug, Clone, Default)]
pub struct FtdnaParser;

impl FtdnaParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: impl AsRef<Path>) -> Result<SnpTable, ParseError> {
        let file = File::open(path.as_ref())?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse FTDNA content from any buffered reader.
    ///
    /// The first row is a header and is skipped. Rows are comma separated
    /// unless the header is tab separated.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<SnpTable, ParseError> {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(ParseError::MissingHeader);
        }

        let delimiter = if header.contains('\t') && !header.contains(',') {
            b'\t'
        } else {
            b','
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = SnpTable::new();
        for result in csv_reader.records() {
            let row = result?;
            // +1 for the header consumed above
            let line_number = row.position().map_or(0, |p| p.line() as usize) + 1;

            if row.len() != 4 {
                return Err(ParseError::InvalidFormat {
                    line: line_number,
                    details: format!("Expected 4 fields, found {}", row.len()),
                });
            }

            let record = SnpRecord {
                rsid: row[0].to_string(),
                chromosome: row[1].to_string(),
                position: parse_position(&row[2], line_number)?,
                genotype: genotype_or_missing(&row[3], MISSING_GENOTYPE),
            };
            push_record(&mut table, record, line_number);
        }

        if table.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(table)
    }
}
