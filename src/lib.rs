//! Shared library for the shopcat product catalog.
//!
//! The crate keeps a list of product records (product, shop, cost), persists
//! it as pretty-printed JSON and checks every record read back from disk
//! against a declared schema before it reaches the catalog. The binary is a
//! thin interactive shell over [`Ledger`]; everything with correctness
//! requirements lives in `validation`, `store` and `catalog`.

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod record;
pub mod render;
pub mod schema;
pub mod shell;
pub mod store;
pub mod validation;

pub use catalog::{Catalog, select};
pub use command::Command;
pub use config::{Config, LoadPolicy};
pub use error::{FieldViolation, ShellError, StoreError, ValidationError, Violation};
pub use ledger::{Ledger, LoadReport, Rejection};
pub use record::Record;
pub use schema::{FieldKind, FieldSpec, RECORD_FIELDS, record_schema_document};
pub use shell::{Flow, Shell};
pub use validation::Validator;
