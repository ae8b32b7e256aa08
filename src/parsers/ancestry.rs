// ==============================================================================
// ancestry.rs - AncestryDNA Raw Data Parser
// ==============================================================================
// Description: Parser for AncestryDNA raw data files (split allele columns)
// Author: Matt Barham
// Created: 2026-10-13
// Modified: 2026-10-15
// Version: 1.0.1
// ==============================================================================
// Format: Tab-delimited text, '#' comments, then one header row
// Example:
//   #AncestryDNA raw data download
//   rsid    chromosome    position    allele1    allele2
//   rs4477212    1    82154    T    T
//   rs2040411    23    1000    0    0
// Chromosome codes: 23 = X, 24 = Y, 25 = PAR, 26 = MT
// Allele "0" is a no-call
// ==============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{parse_position, push_record, ParseError};
use crate::models::{SnpRecord, SnpTable};

const MISSING_ALLELE: &str = "0";

/// Parser for AncestryDNA raw data files
#[derive(Debug, Clone, Default)]
pub struct AncestryParser;

impl AncestryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: impl AsRef<Path>) -> Result<SnpTable, ParseError> {
        let file = File::open(path.as_ref())?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse AncestryDNA content from any buffered reader.
    ///
    /// The two allele columns are concatenated into one genotype; a no-call in
    /// either column makes the whole genotype null.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<SnpTable, ParseError> {
        let mut table = SnpTable::new();
        let mut header_seen = false;
        let mut line_number = 0;

        for line_result in reader.lines() {
            line_number += 1;
            let line = line_result?;

            if line.trim().starts_with('#') || line.trim().is_empty() {
                continue;
            }

            if !header_seen {
                header_seen = true;
                continue;
            }

            let record = self.parse_line(&line, line_number)?;
            push_record(&mut table, record, line_number);
        }

        if table.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(table)
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<SnpRecord, ParseError> {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if fields.len() != 5 {
            return Err(ParseError::InvalidFormat {
                line: line_number,
                details: format!("Expected 5 tab-delimited fields, found {}", fields.len()),
            });
        }

        Ok(SnpRecord {
            rsid: fields[0].to_string(),
            chromosome: remap_chromosome(fields[1]).to_string(),
            position: parse_position(fields[2], line_number)?,
            genotype: join_alleles(fields[3], fields[4]),
        })
    }
}

/// Translate AncestryDNA numeric codes for sex, pseudo-autosomal and
/// mitochondrial chromosomes
pub fn remap_chromosome(code: &str) -> &str {
    match code {
        "23" => "X",
        "24" => "Y",
        "25" => "PAR",
        "26" => "MT",
        other => other,
    }
}

fn join_alleles(allele1: &str, allele2: &str) -> Option<String> {
    let missing = |a: &str| a.is_empty() || a == MISSING_ALLELE;
    if missing(allele1) || missing(allele2) {
        None
    } else {
        Some(format!("{}{}", allele1, allele2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
#AncestryDNA raw data download
#This file was generated by AncestryDNA
rsid\tchromosome\tposition\tallele1\tallele2
rs4477212\t1\t82154\tT\tT
rs3094315\t1\t752566\tA\tG
rs2040411\t23\t1000\tC\tC
rs2040412\t24\t2000\tG\tG
rs2040413\t25\t3000\tA\tT
rs2040414\t26\t4000\t0\t0
rs2040415\t2\t5000\tA\t0
";

    #[test]
    fn test_parse_sample() {
        let table = AncestryParser::new().parse_reader(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(table.len(), 7);
        assert_eq!(table.get("rs4477212").unwrap().genotype.as_deref(), Some("TT"));
        assert_eq!(table.get("rs3094315").unwrap().genotype.as_deref(), Some("AG"));
        assert_eq!(table.get("rs3094315").unwrap().position, 752566);
    }

    #[test]
    fn test_chromosome_codes_remapped() {
        let table = AncestryParser::new().parse_reader(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(table.get("rs2040411").unwrap().chromosome, "X");
        assert_eq!(table.get("rs2040412").unwrap().chromosome, "Y");
        assert_eq!(table.get("rs2040413").unwrap().chromosome, "PAR");
        assert_eq!(table.get("rs2040414").unwrap().chromosome, "MT");
        assert_eq!(table.get("rs4477212").unwrap().chromosome, "1");
    }

    #[test]
    fn test_zero_allele_is_no_call() {
        let table = AncestryParser::new().parse_reader(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(table.get("rs2040414").unwrap().genotype, None);
        assert_eq!(table.get("rs2040415").unwrap().genotype, None);
    }

    #[test]
    fn test_header_row_is_not_data() {
        let table = AncestryParser::new().parse_reader(Cursor::new(SAMPLE)).unwrap();
        assert!(!table.contains("rsid"));

        let header_only = "#AncestryDNA\nrsid\tchromosome\tposition\tallele1\tallele2\n";
        let result = AncestryParser::new().parse_reader(Cursor::new(header_only));
        assert!(matches!(result, Err(ParseError::EmptyFile)));
    }

    #[test]
    fn test_too_few_columns() {
        let contents = "#AncestryDNA\nrsid\tchromosome\tposition\tallele1\tallele2\nrs1\t1\t100\tA\n";
        let result = AncestryParser::new().parse_reader(Cursor::new(contents));
        assert!(matches!(result, Err(ParseError::InvalidFormat { line: 3, .. })));
    }
}
