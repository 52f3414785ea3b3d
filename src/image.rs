//! Memory image assembly.
//!
//! `ImageBuilder` turns a planned `Layout` into the words of a memory image. Sections are
//! read from the binary in file order through a forward-only cursor and then emitted in
//! address order, each preceded by its filler run.

use std::io::{self, Read, Write};

use crate::encoder::{encode_words, FILLER};
use crate::error::Result;
use crate::layout::{Layout, LayoutOptions, Origin};
use crate::reader::ByteCursor;
use crate::section::{AddressMode, SectionName, SectionTable};

/// A stretch of consecutive output words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// `words` filler words.
    Fill { words: u64 },
    /// Encoded words of one section, starting at `address`.
    Content {
        section: SectionName,
        address: u64,
        words: Vec<String>,
    },
}

impl Run {
    pub fn word_count(&self) -> u64 {
        match self {
            Run::Fill { words } => *words,
            Run::Content { words, .. } => words.len() as u64,
        }
    }

    fn lines(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Run::Fill { words } => Box::new(std::iter::repeat(FILLER).take(*words as usize)),
            Run::Content { words, .. } => Box::new(words.iter().map(String::as_str)),
        }
    }
}

/// A complete memory image, one word per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    /// Address of the first word.
    pub origin: u64,
    pub mode: AddressMode,
    pub runs: Vec<Run>,
}

impl MemoryImage {
    pub fn word_count(&self) -> u64 {
        self.runs.iter().map(Run::word_count).sum()
    }

    /// Every output line, in address order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.runs.iter().flat_map(Run::lines)
    }

    /// Writes one word per line to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Builds memory images from a section table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageBuilder {
    options: LayoutOptions,
}

impl ImageBuilder {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Builds the image holding the `requested` sections of `table`, reading their
    /// contents from `source`.
    pub fn build<R: Read>(
        &self,
        source: R,
        table: &SectionTable,
        requested: &[SectionName],
    ) -> Result<MemoryImage> {
        let layout = Layout::plan(table, requested, &self.options)?;
        let contents = read_sections(source, &layout)?;

        let origin = match (self.options.origin, layout.placements.first()) {
            (Origin::FirstSection, Some(first)) => first.address,
            _ => 0,
        };
        let mut runs = Vec::with_capacity(layout.placements.len() * 2);
        for (placement, bytes) in layout.placements.iter().zip(contents) {
            if placement.fill_words > 0 {
                runs.push(Run::Fill {
                    words: placement.fill_words,
                });
            }
            runs.push(Run::Content {
                section: placement.section.name,
                address: placement.address,
                words: encode_words(&bytes),
            });
        }

        Ok(MemoryImage {
            origin,
            mode: layout.mode,
            runs,
        })
    }
}

/// Reads every planned section in ascending file offset order. The result is in
/// placement order.
fn read_sections<R: Read>(source: R, layout: &Layout) -> Result<Vec<Vec<u8>>> {
    let mut order: Vec<usize> = (0..layout.placements.len()).collect();
    order.sort_by_key(|&i| layout.placements[i].section.file_offset);

    let mut cursor = ByteCursor::new(source);
    let mut read = order
        .into_iter()
        .map(|i| {
            let section = &layout.placements[i].section;
            Ok((i, cursor.read_span(section.name, section.file_span())?))
        })
        .collect::<Result<Vec<_>>>()?;
    read.sort_by_key(|(i, _)| *i);
    Ok(read.into_iter().map(|(_, bytes)| bytes).collect())
}
