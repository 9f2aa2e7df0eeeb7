//! rin2id CLI Library
//!
//! Argument handling and the load => remap => save driver behind the
//! `gedcom-rin2id` binary.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use rin2id_core::error::Result;
use rin2id_core::{remap_ids, GedcomDocument, RemapConfig, RemapReport, Rin2IdError};


/// Replace the ID of every top-level GEDCOM record that has a RIN with that RIN,
/// updating all pointers. Writes the result to stdout.
#[derive(Debug, Clone, Parser)]
#[command(name = "gedcom-rin2id", version)]
pub struct Cli {
    /// GEDCOM file to read
    pub input: PathBuf,

    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tag holding the new identifier (overrides the config file)
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Write a JSON report of the applied mappings to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn remap_config(&self) -> Result<RemapConfig> {
        let mut config = match &self.config {
            Some(path) => RemapConfig::load(path)?,
            None => RemapConfig::default(),
        };
        if let Some(tag) = &self.tag {
            config.alternate_tag = tag.clone();
        }
        Ok(config)
    }
}

/// Load the input file, remap its identifiers and write it to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<RemapReport> {
    let config = cli.remap_config()?;

    let mut doc = GedcomDocument::load(&cli.input)?;
    log::debug!("loaded {:?} ({} records)", cli.input, doc.tree.len());

    let report = remap_ids(&mut doc.tree, &config);
    log_report(&report, &config);

    doc.write_to(out)?;

    if let Some(path) = &cli.report {
        std::fs::write(path, report.to_json()?).map_err(|source| Rin2IdError::Io {
            path: path.clone(),
            source,
        })?;
    }

    Ok(report)
}

fn log_report(report: &RemapReport, config: &RemapConfig) {
    if config.logging.show_mappings {
        for (old, new) in &report.mappings {
            log::info!("@{}@ => @{}@", old, new);
        }
    }
    if config.logging.show_remap_stats {
        log::info!(
            "{} records, {} {} ids: rewrote {} xrefs and {} pointers",
            report.records,
            report.mappings.len(),
            report.alternate_tag,
            report.stats.xrefs_rewritten,
            report.stats.pointers_rewritten
        );
    }
}
