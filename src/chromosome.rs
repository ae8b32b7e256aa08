// ==============================================================================
// chromosome.rs - Chromosome Ordering
// ==============================================================================
// Description: Natural-sort ranking of chromosome labels and canonical
//              (chromosome, position) ordering of SNP tables
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Ordering:
//   1, 2, ..., 10, ..., 22, X, Y, PAR, MT
//   Digit runs compare numerically, other text case-insensitively. PAR and MT
//   always take the last two ranks, in that order.
// ==============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::SnpTable;

/// Pseudo-autosomal region label
pub const PAR: &str = "PAR";
/// Mitochondrial chromosome label
pub const MT: &str = "MT";

/// One piece of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Text(String),
    Number(Digits),
}

/// Decimal digit run compared by numeric value without overflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits(String);

impl Digits {
    fn new(run: &str) -> Self {
        Digits(run.trim_start_matches('0').to_string())
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a label into alternating text and digit runs.
///
/// The key always starts with a (possibly empty) text part, so parts at the
/// same index of two keys are always the same kind.
pub fn natural_sort_key(label: &str) -> Vec<KeyPart> {
    let mut key = Vec::new();
    let mut text = String::new();
    let mut chars = label.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            key.push(KeyPart::Text(std::mem::take(&mut text).to_lowercase()));
            key.push(KeyPart::Number(Digits::new(&label[start..end])));
        } else {
            text.push(c);
        }
    }
    key.push(KeyPart::Text(text.to_lowercase()));
    key
}

/// Distinct labels in canonical order: natural sort, then PAR and MT last
pub fn chromosome_order<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<&str> = labels.into_iter().collect();
    ordered.sort_by(|a, b| {
        natural_sort_key(a)
            .cmp(&natural_sort_key(b))
            .then_with(|| a.cmp(b))
    });
    ordered.dedup();

    for tail in [PAR, MT] {
        if let Some(i) = ordered.iter().position(|&c| c == tail) {
            let label = ordered.remove(i);
            ordered.push(label);
        }
    }

    ordered.into_iter().map(str::to_string).collect()
}

/// Rank of every label present, 0 being the first in canonical order
pub fn chromosome_ranks<'a, I>(labels: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    chromosome_order(labels)
        .into_iter()
        .enumerate()
        .map(|(rank, label)| (label, rank))
        .collect()
}

/// Sort rows by chromosome rank, then position. Ties fall back to rsid so the
/// order never depends on load history.
pub fn sort_snps(table: &mut SnpTable) {
    let ranks = chromosome_ranks(table.chromosomes());

    table.sort_by(|a, b| {
        let rank_a = ranks.get(&a.chromosome).copied().unwrap_or(usize::MAX);
        let rank_b = ranks.get(&b.chromosome).copied().unwrap_or(usize::MAX);
        rank_a
            .cmp(&rank_b)
            .then_with(|| a.position.cmp(&b.position))
            .then_with(|| a.rsid.cmp(&b.rsid))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnpRecord;

    #[test]
    fn test_natural_then_forced_tail() {
        let order = chromosome_order(["2", "1", "10", "X", "MT", "PAR"]);
        assert_eq!(order, vec!["1", "2", "10", "X", "PAR", "MT"]);
    }

    #[test]
    fn test_full_human_karyotype() {
        let mut labels: Vec<String> = (1..=22).rev().map(|n| n.to_string()).collect();
        labels.extend(["MT", "Y", "PAR", "X"].iter().map(|s| s.to_string()));

        let order = chromosome_order(labels.iter().map(String::as_str));

        let mut expected: Vec<String> = (1..=22).map(|n| n.to_string()).collect();
        expected.extend(["X", "Y", "PAR", "MT"].iter().map(|s| s.to_string()));
        assert_eq!(order, expected);
    }

    #[test]
    fn test_mt_last_even_without_par() {
        assert_eq!(chromosome_order(["MT", "Y", "3"]), vec!["3", "Y", "MT"]);
    }

    #[test]
    fn test_natural_key_mixed_labels() {
        // "chr2" sorts before "chr10"; text compares case-insensitively
        assert!(natural_sort_key("chr2") < natural_sort_key("chr10"));
        assert_eq!(natural_sort_key("Chr7"), natural_sort_key("chr7"));
        assert!(natural_sort_key("22") < natural_sort_key("X"));
        assert!(natural_sort_key("007") == natural_sort_key("7"));
    }

    #[test]
    fn test_very_long_digit_runs() {
        assert!(natural_sort_key("99999999999999999999999") < natural_sort_key("100000000000000000000000"));
    }

    #[test]
    fn test_sort_snps_by_rank_then_position() {
        let mut table: SnpTable = vec![
            SnpRecord::new("rs5", "MT", 10, Some("A")),
            SnpRecord::new("rs4", "PAR", 20, Some("AG")),
            SnpRecord::new("rs3", "10", 5, Some("CC")),
            SnpRecord::new("rs2", "2", 300, Some("TT")),
            SnpRecord::new("rs1", "2", 100, Some("GG")),
            SnpRecord::new("rs0", "X", 1, Some("AA")),
        ]
        .into_iter()
        .collect();

        sort_snps(&mut table);

        let rsids: Vec<&str> = table.iter().map(|r| r.rsid.as_str()).collect();
        assert_eq!(rsids, vec!["rs1", "rs2", "rs3", "rs0", "rs4", "rs5"]);
        assert_eq!(table.get("rs3").unwrap().chromosome, "10");
    }

    #[test]
    fn test_sort_ties_on_rsid() {
        let mut table: SnpTable = vec![
            SnpRecord::new("rs9", "1", 100, None),
            SnpRecord::new("rs10", "1", 100, None),
        ]
        .into_iter()
        .collect();

        sort_snps(&mut table);

        assert_eq!(table.records()[0].rsid, "rs10");
    }
}
