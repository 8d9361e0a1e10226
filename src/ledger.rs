//! The state object behind the interactive commands.
//!
//! A `Ledger` owns the catalog and the validator and exposes the five
//! operations the shell needs: add, list, select, save and load. Nothing here
//! touches the console; the shell renders whatever these calls return.

use crate::catalog::Catalog;
use crate::config::LoadPolicy;
use crate::error::{StoreError, ValidationError};
use crate::record::Record;
use crate::schema::{COST, PRODUCT, SHOP};
use crate::store;
use crate::validation::Validator;
use anyhow::Result;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

/// A candidate that did not make it into the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    /// Zero-based position of the candidate in the loaded file.
    pub index: usize,
    pub error: ValidationError,
}

/// Outcome of a load that got past reading and decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadReport {
    /// Every candidate that passed validation, in file order.
    pub admitted: Vec<Record>,
    pub rejected: Vec<Rejection>,
    /// Whether the catalog was replaced.
    pub applied: bool,
}

impl LoadReport {
    pub fn candidates(&self) -> usize {
        self.admitted.len() + self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct Ledger {
    catalog: Catalog,
    validator: Validator,
    policy: LoadPolicy,
}

impl Ledger {
    pub fn new(policy: LoadPolicy) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::new(),
            validator: Validator::new()?,
            policy,
        })
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validate and insert a record built from typed parts.
    ///
    /// A non-finite cost is rejected as not being a number.
    pub fn add(&mut self, product: &str, shop: &str, cost: f64) -> Result<Record, ValidationError> {
        let mut candidate = Map::new();
        candidate.insert(PRODUCT.to_string(), Value::from(product));
        candidate.insert(SHOP.to_string(), Value::from(shop));
        // `Value::from` maps NaN and infinities to null.
        candidate.insert(COST.to_string(), Value::from(cost));
        self.add_candidate(&Value::Object(candidate))
    }

    /// Validate and insert a raw candidate.
    pub fn add_candidate(&mut self, candidate: &Value) -> Result<Record, ValidationError> {
        let record = self.validator.validate(candidate)?;
        info!(product = record.product(), shop = record.shop(), "added record");
        self.catalog.insert(record.clone());
        Ok(record)
    }

    pub fn list(&self) -> &[Record] {
        self.catalog.records()
    }

    pub fn select(&self, shop: &str) -> Vec<&Record> {
        self.catalog.filter_by_shop(shop)
    }

    /// Write the catalog to `path`, returning the number of records written.
    pub fn save(&self, path: &Path) -> Result<usize, StoreError> {
        store::save(path, self.catalog.records())?;
        Ok(self.catalog.len())
    }

    /// Load `path`, validate every candidate and apply the load policy.
    ///
    /// Read and decode failures return early and leave the catalog alone.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport, StoreError> {
        let candidates = store::load(path)?;

        let mut admitted = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            match self.validator.validate(candidate) {
                Ok(record) => admitted.push(record),
                Err(error) => {
                    warn!(path = %path.display(), index, %error, "rejected record");
                    rejected.push(Rejection { index, error });
                }
            }
        }

        let applied = match self.policy {
            LoadPolicy::SkipInvalid => true,
            LoadPolicy::RejectBatch => rejected.is_empty(),
        };
        if applied {
            self.catalog.replace_all(admitted.clone());
        }

        info!(
            path = %path.display(),
            admitted = admitted.len(),
            rejected = rejected.len(),
            applied,
            "loaded catalog"
        );
        Ok(LoadReport {
            admitted,
            rejected,
            applied,
        })
    }
}
