//! Console rendering: the record table and the help text.

use crate::record::Record;
use std::io::{self, Write};

const NO_WIDTH: usize = 4;
const PRODUCT_WIDTH: usize = 30;
const SHOP_WIDTH: usize = 20;
const COST_WIDTH: usize = 12;

const HELP: &str = "\
Commands:
  add            add a product (prompts for name, shop and cost)
  list           show all products
  select [SHOP]  show the products of one shop
  save [FILE]    save the products to a JSON file
  load [FILE]    load products from a JSON file
  help           show this help
  exit           quit
";

fn separator() -> String {
    format!(
        "+-{}-+-{}-+-{}-+-{}-+",
        "-".repeat(NO_WIDTH),
        "-".repeat(PRODUCT_WIDTH),
        "-".repeat(SHOP_WIDTH),
        "-".repeat(COST_WIDTH)
    )
}

/// Write records as a bordered table, numbering rows from 1.
pub fn write_table<'a, W, I>(out: &mut W, records: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let line = separator();
    writeln!(out, "{line}")?;
    writeln!(
        out,
        "| {:^NO_WIDTH$} | {:^PRODUCT_WIDTH$} | {:^SHOP_WIDTH$} | {:^COST_WIDTH$} |",
        "No", "Product", "Shop", "Cost"
    )?;
    writeln!(out, "{line}")?;
    for (idx, record) in records.into_iter().enumerate() {
        writeln!(
            out,
            "| {:>NO_WIDTH$} | {:<PRODUCT_WIDTH$} | {:<SHOP_WIDTH$} | {:>COST_WIDTH$.2} |",
            idx + 1,
            record.product(),
            record.shop(),
            record.cost()
        )?;
    }
    writeln!(out, "{line}")
}

pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{HELP}")
}
