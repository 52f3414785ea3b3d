//! Conversion orchestration.
//!
//! `Converter` holds a mapped binary and its located sections and drives the rest:
//! 1. Locate: from dumper text or straight from the ELF.
//! 2. Build every destination's image in memory.
//! 3. Discard stale outputs, now that every image is known to build.
//! 4. Write the images.

use std::path::PathBuf;

use crate::error::Result;
use crate::image::{ImageBuilder, MemoryImage};
use crate::layout::{LayoutOptions, Origin};
use crate::locator::{self, ColumnLayout};
use crate::section::{SectionName, SectionTable};
use crate::writer;

/// An output file and the sections it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: PathBuf,
    pub sections: Vec<SectionName>,
    pub origin: Origin,
}

impl Destination {
    /// The combined memory image: every section, laid out from `origin`.
    pub fn memory(path: impl Into<PathBuf>, origin: Origin) -> Self {
        Self {
            path: path.into(),
            sections: SectionName::ALL.to_vec(),
            origin,
        }
    }

    /// Instruction memory: `.text` alone.
    pub fn text(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sections: vec![SectionName::Text],
            origin: Origin::FirstSection,
        }
    }

    /// Data memory: `.data` and `.got`.
    pub fn data(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sections: vec![SectionName::Data, SectionName::GlobalOffsetTable],
            origin: Origin::FirstSection,
        }
    }
}

pub struct Converter<'a> {
    binary: &'a [u8],
    sections: SectionTable,
}

impl<'a> Converter<'a> {
    /// Locates sections from captured section-header text.
    pub fn from_metadata(binary: &'a [u8], metadata: &str, columns: &ColumnLayout) -> Result<Self> {
        let sections = locator::locate_sections(metadata, columns)?;
        Ok(Self { binary, sections })
    }

    /// Locates sections by parsing `binary` as an ELF file.
    pub fn from_elf(binary: &'a [u8]) -> Result<Self> {
        let sections = locator::locate_sections_in_elf(binary)?;
        Ok(Self { binary, sections })
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    /// Builds the image for one destination without writing it.
    pub fn build(&self, destination: &Destination, options: &LayoutOptions) -> Result<MemoryImage> {
        let options = LayoutOptions {
            origin: destination.origin,
            ..*options
        };
        ImageBuilder::new(options).build(self.binary, &self.sections, &destination.sections)
    }

    /// Replaces every destination with its freshly built image.
    ///
    /// Existing outputs are left untouched unless every image builds.
    pub fn convert(&self, destinations: &[Destination], options: &LayoutOptions) -> Result<()> {
        let images = destinations
            .iter()
            .map(|d| self.build(d, options))
            .collect::<Result<Vec<_>>>()?;

        writer::discard_stale(destinations.iter().map(|d| d.path.as_path()))?;

        for (destination, image) in destinations.iter().zip(&images) {
            writer::write_image(&destination.path, image)?;
        }
        Ok(())
    }
}
