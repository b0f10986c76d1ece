//! Main entry point for the tinyunzip CLI application.
//!
//! Extracts one named entry from a ZIP file into an output file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use tinyunzip::cli::USAGE;
use tinyunzip::{Cli, ZipArchive};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(cli) = Cli::parse_or_usage() else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut archive = ZipArchive::open_path(&cli.zip_file)
        .with_context(|| format!("failed to open {}", cli.zip_file.display()))?;

    let mut reader = archive.extract(&cli.entry)?;
    let entry = reader.entry();
    if !cli.quiet {
        println!(
            "Extracting {} ({} bytes, modified {}) to {}",
            entry.file_name,
            entry.uncompressed_size,
            entry.modified,
            cli.output.display()
        );
    }

    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let mut writer = BufWriter::new(output);

    let written = if cli.verify {
        io::copy(&mut reader.verified(), &mut writer)
    } else {
        io::copy(&mut reader, &mut writer)
    }
    .with_context(|| format!("failed to extract {}", cli.entry))?;
    writer.flush()?;

    if !cli.quiet {
        println!("Finished. {} bytes written.", written);
    }

    Ok(())
}
