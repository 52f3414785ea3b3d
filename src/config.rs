//! Configuration module.
//!
//! This module defines the command-line interface (CLI) using `clap` and maps the parsed
//! arguments onto the locator, layout and destination settings.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::converter::Destination;
use crate::layout::{GapPolicy, LayoutOptions, Origin};
use crate::locator::ColumnLayout;
use crate::section::AddressMode;
use crate::tool::DEFAULT_OBJDUMP;

/// How section placement addresses are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Addressing {
    /// Virtual addresses when the metadata has them, file offsets otherwise
    Auto,
    /// Virtual (run-time) addresses
    Vma,
    /// Offsets within the binary file
    FileOffset,
}

/// Converts a RISC-V executable into a `readmemh` memory initialization file.
///
/// The `.text`, `.data` and `.got` sections are laid out by address, gaps are filled with
/// zero words, and every word is written as eight hex digits per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Executable to convert
    pub binfile: PathBuf,

    /// Memory file to write
    pub output: PathBuf,

    /// Section-header dumper to run
    #[arg(long, default_value = DEFAULT_OBJDUMP)]
    pub objdump: String,

    /// Read section headers from this file instead of running the dumper
    #[arg(long, conflicts_with = "native")]
    pub metadata: Option<PathBuf>,

    /// Read section headers from the ELF directly
    #[arg(long)]
    pub native: bool,

    /// Addresses used to place sections
    #[arg(long, value_enum, default_value_t = Addressing::Auto)]
    pub addressing: Addressing,

    /// Column holding the section size
    #[arg(long, default_value_t = 2)]
    pub size_column: usize,

    /// Column holding the virtual address
    #[arg(long, default_value_t = 3)]
    pub vma_column: usize,

    /// Column holding the file offset
    #[arg(long, default_value_t = 5)]
    pub offset_column: usize,

    /// Treat the metadata as having no virtual address column
    #[arg(long)]
    pub ignore_vma: bool,

    /// Round gaps that are not whole words down instead of failing
    #[arg(long)]
    pub round_gaps: bool,

    /// Start the memory file at the first section instead of address 0
    #[arg(long)]
    pub skip_leading_gap: bool,

    /// Also write `.text` alone to this file
    #[arg(long)]
    pub text_out: Option<PathBuf>,

    /// Also write `.data` and `.got` to this file
    #[arg(long)]
    pub data_out: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}

impl Config {
    pub fn columns(&self) -> ColumnLayout {
        ColumnLayout {
            size: self.size_column,
            load_address: (!self.ignore_vma).then_some(self.vma_column),
            file_offset: self.offset_column,
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            mode: match self.addressing {
                Addressing::Auto => None,
                Addressing::Vma => Some(AddressMode::Virtual),
                Addressing::FileOffset => Some(AddressMode::FileOffset),
            },
            gap_policy: if self.round_gaps {
                GapPolicy::RoundDown
            } else {
                GapPolicy::Strict
            },
            origin: Origin::Zero,
        }
    }

    pub fn destinations(&self) -> Vec<Destination> {
        let origin = if self.skip_leading_gap {
            Origin::FirstSection
        } else {
            Origin::Zero
        };
        let mut destinations = vec![Destination::memory(&self.output, origin)];
        destinations.extend(self.text_out.as_ref().map(Destination::text));
        destinations.extend(self.data_out.as_ref().map(Destination::data));
        destinations
    }
}
