//! Entry point for elf2mem.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap` and set up logging.
//! 2. Map the executable into memory.
//! 3. Locate its sections, from the dumper, a saved listing, or the ELF itself.
//! 4. Build and write every requested memory file.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::{self, File};
use tracing_subscriber::EnvFilter;

use elf2mem::config::Config;
use elf2mem::converter::Converter;
use elf2mem::tool;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let binfile = &config.binfile;
    let file = File::open(binfile).with_context(|| format!("failed to open {}", binfile.display()))?;
    let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("failed to map {}", binfile.display()))?;

    let converter = if config.native {
        Converter::from_elf(&mmap)
    } else {
        let metadata = match &config.metadata {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read section headers from {}", path.display()))?,
            None => tool::dump_section_headers(&config.objdump, binfile)?,
        };
        tracing::debug!("Section headers:\n{}", metadata);
        Converter::from_metadata(&mmap, &metadata, &config.columns())
    }
    .with_context(|| format!("failed to locate sections in {}", binfile.display()))?;

    let destinations = config.destinations();
    converter
        .convert(&destinations, &config.layout_options())
        .with_context(|| format!("failed to convert {}", binfile.display()))?;

    println!("Converted {} to {}", binfile.display(), config.output.display());
    Ok(())
}
