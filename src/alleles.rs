// ==============================================================================
// alleles.rs - Allele Normalization and Comparison
// ==============================================================================
// Description: Hemizygous allele doubling and allele-order-insensitive
//              genotype comparison
// Author: Matt Barham
// Created: 2026-10-13
// Modified: 2026-10-15
// Version: 1.0.0
// ==============================================================================

use crate::models::SnpTable;

/// Chromosome whose single-allele calls are doubled before comparison
pub const HEMIZYGOUS_CHROMOSOME: &str = "X";

/// Double every single-allele genotype on `chromosome` ("A" -> "AA").
///
/// Returns the number of genotypes rewritten.
pub fn double_single_alleles(table: &mut SnpTable, chromosome: &str) -> usize {
    let mut doubled = 0;
    for record in table.iter_mut().filter(|r| r.chromosome == chromosome) {
        if let Some(genotype) = record.genotype.as_mut() {
            if genotype.chars().count() == 1 {
                *genotype = genotype.repeat(2);
                doubled += 1;
            }
        }
    }
    doubled
}

/// Whether two non-null genotypes disagree, ignoring allele order.
///
/// Only like-length pairs are compared: one allele against one, or two
/// against two (direct or swapped). Any other combination, including a
/// single call against a pair, is never reported as discrepant.
pub fn genotypes_discrepant(existing: &str, added: &str) -> bool {
    let existing: Vec<char> = existing.chars().collect();
    let added: Vec<char> = added.chars().collect();

    match (existing.as_slice(), added.as_slice()) {
        ([a], [b]) => a != b,
        ([a0, a1], [b0, b1]) => {
            let direct = a0 == b0 && a1 == b1;
            let swapped = a0 == b1 && a1 == b0;
            !direct && !swapped
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnpRecord;

    #[test]
    fn test_double_single_x_alleles() {
        let mut table: SnpTable = vec![
            SnpRecord::new("rs1", "X", 100, Some("A")),
            SnpRecord::new("rs2", "X", 200, Some("AG")),
            SnpRecord::new("rs3", "X", 300, None),
            SnpRecord::new("rs4", "Y", 400, Some("T")),
            SnpRecord::new("rs5", "1", 500, Some("C")),
        ]
        .into_iter()
        .collect();

        let doubled = double_single_alleles(&mut table, HEMIZYGOUS_CHROMOSOME);

        assert_eq!(doubled, 1);
        assert_eq!(table.get("rs1").unwrap().genotype.as_deref(), Some("AA"));
        assert_eq!(table.get("rs2").unwrap().genotype.as_deref(), Some("AG"));
        assert_eq!(table.get("rs3").unwrap().genotype, None);
        // Only the designated chromosome is touched
        assert_eq!(table.get("rs4").unwrap().genotype.as_deref(), Some("T"));
        assert_eq!(table.get("rs5").unwrap().genotype.as_deref(), Some("C"));
    }

    #[test]
    fn test_allele_order_insensitive() {
        assert!(!genotypes_discrepant("AG", "GA"));
        assert!(!genotypes_discrepant("AG", "AG"));
        assert!(!genotypes_discrepant("TT", "TT"));
        assert!(genotypes_discrepant("AG", "AC"));
        assert!(genotypes_discrepant("AA", "GG"));
    }

    #[test]
    fn test_single_allele_comparison() {
        assert!(!genotypes_discrepant("A", "A"));
        assert!(genotypes_discrepant("A", "G"));
    }

    #[test]
    fn test_mixed_lengths_never_discrepant() {
        assert!(!genotypes_discrepant("A", "GG"));
        assert!(!genotypes_discrepant("CT", "A"));
    }
}
