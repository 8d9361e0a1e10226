use anyhow::{Context, Result};
use shopcat::{Ledger, LoadPolicy, Record};
use std::fs;
use std::path::{Path, PathBuf};

pub fn empty_ledger(policy: LoadPolicy) -> Ledger {
    Ledger::new(policy).expect("record schema compiles")
}

/// Ledger populated through `add`, in the given order.
pub fn ledger_with(entries: &[(&str, &str, f64)]) -> Result<Ledger> {
    let mut ledger = empty_ledger(LoadPolicy::SkipInvalid);
    for (product, shop, cost) in entries {
        ledger
            .add(product, shop, *cost)
            .with_context(|| format!("adding fixture {product}"))?;
    }
    Ok(ledger)
}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn summary(records: &[Record]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.product().to_string(), r.shop().to_string()))
        .collect()
}
