//! Interactive command loop.
//!
//! The shell reads one line at a time, parses it into a [`Command`] and runs
//! it against the [`Ledger`] it owns. Reader and writers are generic so tests
//! can drive a whole session from a string. Command failures are printed to
//! the error stream and the loop continues; only console I/O failures end it.

use crate::command::Command;
use crate::error::ShellError;
use crate::ledger::{Ledger, LoadReport};
use crate::render::{write_help, write_table};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROMPT: &str = ">>> ";

/// Whether the loop should keep reading after a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W, E> {
    ledger: Ledger,
    input: R,
    out: W,
    err: E,
    data_file: Option<PathBuf>,
}

impl<R: BufRead, W: Write, E: Write> Shell<R, W, E> {
    pub fn new(ledger: Ledger, input: R, out: W, err: E) -> Self {
        Self {
            ledger,
            input,
            out,
            err,
            data_file: None,
        }
    }

    /// Default file for `save`/`load` without an argument.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        self.data_file = data_file;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Load the default data file if one is configured and exists.
    pub fn load_data_file(&mut self) -> Result<(), ShellError> {
        let Some(path) = self.data_file.clone() else {
            return Ok(());
        };
        if !path.exists() {
            debug!(path = %path.display(), "data file not present yet; starting empty");
            return Ok(());
        }
        self.report(|shell| shell.load(&path))
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let Some(line) = self.prompt(PROMPT)? else {
                writeln!(self.out)?;
                return Ok(());
            };
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            debug!(?command, "dispatching");
            let mut flow = Flow::Continue;
            self.report(|shell| {
                flow = shell.execute(command)?;
                Ok(())
            })?;
            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute a single command.
    pub fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Add => self.add()?,
            Command::List => write_table(&mut self.out, self.ledger.list())?,
            Command::Select(shop) => self.select(shop)?,
            Command::Save(path) => {
                let path = self.resolve_path(path, "save")?;
                let written = self.ledger.save(&path)?;
                writeln!(self.out, "Saved {written} records to {}", path.display())?;
            }
            Command::Load(path) => {
                let path = self.resolve_path(path, "load")?;
                self.load(&path)?;
            }
            Command::Help => write_help(&mut self.out)?,
            Command::Unknown(raw) => return Err(ShellError::UnknownCommand(raw)),
        }
        Ok(Flow::Continue)
    }

    /// Run `action`, printing recoverable errors and passing fatal ones up.
    fn report<F>(&mut self, action: F) -> Result<(), ShellError>
    where
        F: FnOnce(&mut Self) -> Result<(), ShellError>,
    {
        match action(self) {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                writeln!(self.err, "{err}")?;
                Ok(())
            }
        }
    }

    fn add(&mut self) -> Result<(), ShellError> {
        let Some(product) = self.prompt("Product: ")? else {
            return Ok(());
        };
        let Some(shop) = self.prompt("Shop: ")? else {
            return Ok(());
        };
        let Some(cost) = self.prompt("Cost: ")? else {
            return Ok(());
        };

        let record = match cost.trim().parse::<f64>() {
            Ok(cost) => self.ledger.add(product.trim(), shop.trim(), cost)?,
            Err(_) => {
                // Hand the raw text to the validator so the message names the field.
                let candidate = serde_json::json!({
                    "product": product.trim(),
                    "shop": shop.trim(),
                    "cost": cost.trim(),
                });
                self.ledger.add_candidate(&candidate)?
            }
        };
        writeln!(self.out, "Added {record}")?;
        Ok(())
    }

    fn select(&mut self, shop: Option<String>) -> Result<(), ShellError> {
        let shop = match shop {
            Some(shop) => shop,
            None => match self.prompt("Shop: ")? {
                Some(shop) => shop.trim().to_string(),
                None => return Ok(()),
            },
        };
        let selected = self.ledger.select(&shop);
        write_table(&mut self.out, selected)?;
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<(), ShellError> {
        let report = self.ledger.load(path)?;
        self.write_load_report(path, &report)
    }

    fn write_load_report(&mut self, path: &Path, report: &LoadReport) -> Result<(), ShellError> {
        // Rejections are sorted by index, so one pass pairs them up.
        let mut rejected = report.rejected.iter().peekable();
        let outcome = if report.applied { "loaded" } else { "valid" };
        for index in 0..report.candidates() {
            match rejected.next_if(|rejection| rejection.index == index) {
                Some(rejection) => writeln!(self.err, "record {}: {}", index + 1, rejection.error)?,
                None => writeln!(self.out, "record {}: {outcome}", index + 1)?,
            }
        }
        if report.applied {
            writeln!(
                self.out,
                "Loaded {} of {} records from {}",
                report.admitted.len(),
                report.candidates(),
                path.display()
            )?;
        } else {
            writeln!(
                self.out,
                "Nothing loaded from {}: {} of {} records are invalid",
                path.display(),
                report.rejected.len(),
                report.candidates()
            )?;
        }
        Ok(())
    }

    fn resolve_path(
        &self,
        path: Option<PathBuf>,
        command: &'static str,
    ) -> Result<PathBuf, ShellError> {
        path.or_else(|| self.data_file.clone())
            .ok_or(ShellError::MissingPath { command })
    }

    /// Print `label` and read one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, ShellError> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadPolicy;
    use std::io::Cursor;

    type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn shell(script: &str) -> TestShell {
        let ledger = Ledger::new(LoadPolicy::SkipInvalid).unwrap();
        Shell::new(
            ledger,
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            Vec::new(),
        )
    }

    fn stderr(shell: &TestShell) -> String {
        String::from_utf8_lossy(&shell.err).into_owned()
    }

    #[test]
    fn load_reports_every_candidate_then_a_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"[{"product": "Tea", "shop": "Corner", "cost": 3},
                {"product": "Milk", "shop": "Z-Mart", "cost": "cheap"}]"#,
        )
        .unwrap();

        let mut shell = shell(&format!("load {}\nexit\n", path.display()));
        shell.run().unwrap();
        let out = String::from_utf8_lossy(&shell.out).into_owned();
        let first = out.find("record 1: loaded").expect("line for the valid record");
        let summary = out.find("Loaded 1 of 2 records").expect("summary line");
        assert!(first < summary);
        assert!(!out.contains("record 2"));
        assert!(stderr(&shell).contains("record 2: cost must be a number"));
    }

    #[test]
    fn add_prompts_and_inserts() {
        let mut shell = shell("add\nMilk\nZ-Mart\n2.5\nadd\nBread\nA-Mart\n1.2\nexit\n");
        shell.run().unwrap();
        let products: Vec<&str> = shell.ledger().list().iter().map(|r| r.product()).collect();
        assert_eq!(products, vec!["Bread", "Milk"]);
    }

    #[test]
    fn bad_cost_is_reported_and_loop_continues() {
        let mut shell = shell("add\nMilk\nZ-Mart\ncheap\nlist\n");
        shell.run().unwrap();
        assert!(stderr(&shell).contains("cost must be a number"));
        assert!(shell.ledger().list().is_empty());
        assert!(String::from_utf8_lossy(&shell.out).contains("Product"));
    }

    #[test]
    fn unknown_command_goes_to_error_stream() {
        let mut shell = shell("dance\nexit\n");
        shell.run().unwrap();
        assert_eq!(stderr(&shell).trim(), "unknown command: dance");
    }

    #[test]
    fn bare_save_without_data_file_is_reported() {
        let mut shell = shell("save\n");
        shell.run().unwrap();
        assert!(stderr(&shell).contains("save needs a file name"));
    }

    #[test]
    fn end_of_input_mid_add_stops_cleanly() {
        let mut shell = shell("add\nMilk\n");
        shell.run().unwrap();
        assert!(shell.ledger().list().is_empty());
    }

    #[test]
    fn exit_stops_reading() {
        let mut shell = shell("exit\nadd\nMilk\nZ-Mart\n2.5\n");
        shell.run().unwrap();
        assert!(shell.ledger().list().is_empty());
    }
}
