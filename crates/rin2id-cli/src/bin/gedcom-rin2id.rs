//! gedcom-rin2id Binary Entry Point

use std::io::{self, BufWriter};

use clap::Parser;
use rin2id_cli::{run, Cli};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&cli, &mut out)?;

    Ok(())
}
