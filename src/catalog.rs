//! In-memory catalog of product records.
//!
//! The catalog owns its records and keeps them sorted by shop after every
//! insertion. Queries hand out borrows; the only bulk mutation is
//! `replace_all`, used once a load has been accepted.

use crate::record::Record;

/// Ordered collection of records, sorted ascending by shop after inserts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and restore the shop ordering.
    ///
    /// The sort is stable, so records from the same shop keep the order in
    /// which they were added.
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
        if self.records.len() > 1 {
            self.records.sort_by(|a, b| a.shop().cmp(b.shop()));
        }
    }

    /// Records whose shop equals `shop` exactly, in catalog order.
    pub fn filter_by_shop(&self, shop: &str) -> Vec<&Record> {
        select(&self.records, shop)
    }

    /// Replace the whole collection, keeping the given order.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Catalog {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

/// Pick the records of one shop out of any record sequence.
///
/// Matching is exact and case-sensitive; order is preserved.
pub fn select<'a, I>(records: I, shop: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| record.shop() == shop)
        .collect()
}
