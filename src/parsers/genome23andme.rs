// ==============================================================================
// genome23andme.rs - 23andMe Raw Data Parser
// ==============================================================================
// Description: Parser for 23andMe raw genome data files
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-14
// Version: 1.1.0
// ==============================================================================
// Format: Tab-delimited text with header comments
// Example:
//   # This data file generated by 23andMe at: ...
//   # rsid    chromosome    position    genotype
//   rs548049170    1    69869    TT
//   rs13328684    1    74792    --
//   rs9283150    X    565508    A
// ==============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{genotype_or_missing, parse_position, push_record, ParseError, MISSING_GENOTYPE};
use crate::models::{SnpRecord, SnpTable};

/// Parser for 23andMe raw genome files
#[derive(Debug, Clone, Default)]
pub struct Genome23Parser;

impl Genome23Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a plain-text 23andMe genome file
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<SnpTable, ParseError> {
        let file = File::open(path.as_ref())?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse 23andMe content from any buffered reader
    ///
    /// # Format
    /// The content is tab-delimited with 4 columns:
    /// - rsid: SNP identifier
    /// - chromosome: Chromosome number or name
    /// - position: Base pair position
    /// - genotype: One or two allele calls, or "--" for no-call
    ///
    /// Lines starting with '#' are treated as comments and skipped.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<SnpTable, ParseError> {
        let mut table = SnpTable::new();
        let mut line_number = 0;

        for line_result in reader.lines() {
            line_number += 1;
            let line = line_result?;

            if line.trim().starts_with('#') || line.trim().is_empty() {
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

        if fields.len() != 4 {
            return Err(ParseError::InvalidFormat {
                line: line_number,
                details: format!("Expected 4 tab-delimited fields, found {}", fields.len()),
            });
        }

        Ok(SnpRecord {
            rsid: fields[0].to_string(),
            chromosome: fields[1].to_string(),
            position: parse_position(fields[2], line_number)?,
            genotype: genotype_or_missing(fields[3], MISSING_GENOTYPE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with sample 23andMe data
    fn create_test_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_valid_file() {
        let contents = "\
# This data file generated by 23andMe
# rsid\tchromosome\tposition\tgenotype
rs548049170\t1\t69869\tTT
rs13328684\t1\t74792\t--
rs9283150\t1\t565508\tAA
rs12345678\t2\t100000\tAG
";
        let file = create_test_file(contents);
        let table = Genome23Parser::new().parse(file.path()).unwrap();

        assert_eq!(table.len(), 4);

        let first = &table.records()[0];
        assert_eq!(first.rsid, "rs548049170");
        assert_eq!(first.chromosome, "1");
        assert_eq!(first.position, 69869);
        assert_eq!(first.genotype.as_deref(), Some("TT"));

        // No-call becomes a null genotype
        assert_eq!(table.get("rs13328684").unwrap().genotype, None);
        assert_eq!(table.get("rs12345678").unwrap().chromosome, "2");
    }

    #[test]
    fn test_single_allele_calls_kept_verbatim() {
        let contents = "\
# 23andMe
rs1\tX\t100\tA
rs2\tY\t200\tG
rs3\tMT\t300\tC
";
        let file = create_test_file(contents);
        let table = Genome23Parser::new().parse(file.path()).unwrap();

        assert_eq!(table.get("rs1").unwrap().genotype.as_deref(), Some("A"));
        assert_eq!(table.get("rs2").unwrap().genotype.as_deref(), Some("G"));
        assert_eq!(table.get("rs3").unwrap().chromosome, "MT");
    }

    #[test]
    fn test_invalid_format_too_few_fields() {
        let contents = "\
# rsid\tchromosome\tposition\tgenotype
rs548049170\t1\t69869
";
        let file = create_test_file(contents);
        let result = Genome23Parser::new().parse(file.path());

        match result.unwrap_err() {
            ParseError::InvalidFormat { line, .. } => {
                assert_eq!(line, 2); // Line 1 is comment
            }
            other => panic!("Expected InvalidFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_position() {
        let contents = "\
# rsid\tchromosome\tposition\tgenotype
rs548049170\t1\tNOT_A_NUMBER\tTT
";
        let file = create_test_file(contents);
        let result = Genome23Parser::new().parse(file.path());

        match result.unwrap_err() {
            ParseError::InvalidPosition { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "NOT_A_NUMBER");
            }
            other => panic!("Expected InvalidPosition error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file() {
        let contents = "\
# rsid\tchromosome\tposition\tgenotype
# Just comments, no data
";
        let file = create_test_file(contents);
        let result = Genome23Parser::new().parse(file.path());
        assert!(matches!(result, Err(ParseError::EmptyFile)));
    }

    #[test]
    fn test_whitespace_and_crlf_handling() {
        let contents = "# 23andMe\r\n  rs548049170  \t  1  \t  69869  \t  TT\r\n";
        let file = create_test_file(contents);

        let table = Genome23Parser::new().parse(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        let record = table.get("rs548049170").unwrap();
        assert_eq!(record.chromosome, "1");
        assert_eq!(record.position, 69869);
        assert_eq!(record.genotype.as_deref(), Some("TT"));
    }

    #[test]
    fn test_duplicate_rsid_keeps_first() {
        let contents = "\
# 23andMe
rs1\t1\t100\tAA
rs1\t1\t100\tCC
";
        let file = create_test_file(contents);
        let table = Genome23Parser::new().parse(file.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("rs1").unwrap().genotype.as_deref(), Some("AA"));
    }
}
