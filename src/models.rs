// ==============================================================================
// models.rs - Canonical SNP Table Models
// ==============================================================================
// Description: SNP record and the per-individual canonical table keyed by rsid
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-16
// Version: 1.1.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A single genotyped marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnpRecord {
    /// SNP identifier (e.g., "rs548049170")
    pub rsid: String,
    /// Chromosome label ("1"-"22", "X", "Y", "PAR", "MT")
    pub chromosome: String,
    /// Base pair position (build-specific)
    pub position: u64,
    /// One or two allele calls (e.g., "AG", "A"); None for a no-call
    pub genotype: Option<String>,
}

impl SnpRecord {
    pub fn new(
        rsid: impl Into<String>,
        chromosome: impl Into<String>,
        position: u64,
        genotype: Option<&str>,
    ) -> Self {
        Self {
            rsid: rsid.into(),
            chromosome: chromosome.into(),
            position,
            genotype: genotype.map(str::to_string),
        }
    }

    /// True when chromosome or position differ from `other`
    pub fn locus_differs(&self, other: &SnpRecord) -> bool {
        self.chromosome != other.chromosome || self.position != other.position
    }
}

/// Canonical genotype table: at most one record per rsid.
///
/// Row order is whatever the last sort (or insertion sequence) produced; the
/// index is rebuilt whenever rows move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnpTable {
    records: Vec<SnpRecord>,
    index: HashMap<String, usize>,
}

impl SnpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert a record, keeping the existing row if the rsid is already present.
    ///
    /// Returns `false` when the record was rejected as a duplicate.
    pub fn insert(&mut self, record: SnpRecord) -> bool {
        if self.index.contains_key(&record.rsid) {
            return false;
        }
        self.index.insert(record.rsid.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, rsid: &str) -> Option<&SnpRecord> {
        self.index.get(rsid).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, rsid: &str) -> Option<&mut SnpRecord> {
        match self.index.get(rsid) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    pub fn contains(&self, rsid: &str) -> bool {
        self.index.contains_key(rsid)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnpRecord> {
        self.records.iter()
    }

    /// Mutable access to every row. Rsids must not be changed through this.
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, SnpRecord> {
        self.records.iter_mut()
    }

    pub fn records(&self) -> &[SnpRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SnpRecord> {
        self.records
    }

    /// Distinct chromosome labels in first-seen row order
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.chromosome.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Reorder rows and rebuild the rsid index
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&SnpRecord, &SnpRecord) -> Ordering,
    {
        self.records.sort_by(compare);
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.rsid.clone(), i))
            .collect();
    }
}

impl FromIterator<SnpRecord> for SnpTable {
    fn from_iter<I: IntoIterator<Item = SnpRecord>>(iter: I) -> Self {
        let mut table = SnpTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

impl<'a> IntoIterator for &'a SnpTable {
    type Item = &'a SnpRecord;
    type IntoIter = std::slice::Iter<'a, SnpRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_occurrence() {
        let mut table = SnpTable::new();
        assert!(table.insert(SnpRecord::new("rs1", "1", 100, Some("AA"))));
        assert!(!table.insert(SnpRecord::new("rs1", "2", 200, Some("CC"))));

        assert_eq!(table.len(), 1);
        let record = table.get("rs1").unwrap();
        assert_eq!(record.chromosome, "1");
        assert_eq!(record.genotype.as_deref(), Some("AA"));
    }

    #[test]
    fn test_sort_rebuilds_index() {
        let mut table: SnpTable = vec![
            SnpRecord::new("rs2", "1", 200, Some("TT")),
            SnpRecord::new("rs1", "1", 100, None),
        ]
        .into_iter()
        .collect();

        table.sort_by(|a, b| a.position.cmp(&b.position));

        assert_eq!(table.records()[0].rsid, "rs1");
        assert_eq!(table.get("rs2").unwrap().position, 200);
        table.get_mut("rs1").unwrap().genotype = Some("GG".to_string());
        assert_eq!(table.records()[0].genotype.as_deref(), Some("GG"));
    }

    #[test]
    fn test_distinct_chromosomes() {
        let table: SnpTable = vec![
            SnpRecord::new("rs1", "2", 1, None),
            SnpRecord::new("rs2", "X", 1, None),
            SnpRecord::new("rs3", "2", 5, None),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.chromosomes(), vec!["2", "X"]);
    }

    #[test]
    fn test_locus_differs() {
        let a = SnpRecord::new("rs1", "1", 100, Some("AA"));
        assert!(!a.locus_differs(&SnpRecord::new("rs1", "1", 100, Some("CC"))));
        assert!(a.locus_differs(&SnpRecord::new("rs1", "1", 101, Some("AA"))));
        assert!(a.locus_differs(&SnpRecord::new("rs1", "2", 100, Some("AA"))));
    }
}
