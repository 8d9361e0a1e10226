//! The product record held by the catalog.
//!
//! A `Record` can only be built by the validator, so every value of this type
//! has passed the record schema. Fields are private and read through
//! accessors; nothing mutates a record after construction.

use serde::Serialize;
use std::fmt;

/// One validated product entry.
///
/// Serializes with the field order `product`, `shop`, `cost`, which is the
/// order written to data files.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    product: String,
    shop: String,
    cost: f64,
}

impl Record {
    /// Assemble a record from parts that already passed validation.
    pub(crate) fn from_validated(product: String, shop: String, cost: f64) -> Self {
        Self {
            product,
            shop,
            cost,
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn shop(&self) -> &str {
        &self.shop
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({})", self.product, self.shop, self.cost)
    }
}
