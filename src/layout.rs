//! Layout management.
//!
//! This module decides where each located section lands in the word-addressed memory
//! image and how many filler words separate it from whatever precedes it.
//! No bytes are read here; `image` does that once the plan is known to be valid.

use crate::encoder::WORD_BYTES;
use crate::error::{Error, Result};
use crate::section::{AddressMode, AddressSpan, Section, SectionName, SectionTable};
use crate::utils::align_up;

/// What to do with a gap that is not a whole number of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Fail with `InvalidLayout`.
    #[default]
    Strict,
    /// Drop the partial word and warn.
    RoundDown,
}

/// Where the first word of an image sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Address 0; the leading gap up to the first section is filled.
    #[default]
    Zero,
    /// The first section's own address; no leading filler.
    FirstSection,
}

/// Knobs for planning a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Forced addressing mode. `None` picks virtual addresses when every section has one.
    pub mode: Option<AddressMode>,
    pub gap_policy: GapPolicy,
    pub origin: Origin,
}

/// A section together with its place in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub section: Section,
    /// Address of the section's first word.
    pub address: u64,
    /// Filler words emitted immediately before the section.
    pub fill_words: u64,
}

/// The planned image: sections in address order with the gaps between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The addressing mode the plan was computed in.
    pub mode: AddressMode,
    pub placements: Vec<Placement>,
}

impl AddressMode {
    /// Virtual addresses when all `sections` carry one, file offsets otherwise.
    pub fn detect<'a>(sections: impl IntoIterator<Item = &'a Section>) -> Self {
        let mut sections = sections.into_iter();
        if sections.all(|s| s.load_address.is_some()) {
            AddressMode::Virtual
        } else {
            AddressMode::FileOffset
        }
    }
}

impl Layout {
    /// Plans the requested sections of `table` in text, data, got order.
    pub fn plan(table: &SectionTable, requested: &[SectionName], options: &LayoutOptions) -> Result<Self> {
        let selected: Vec<&Section> = table.iter().filter(|s| requested.contains(&s.name)).collect();
        let mode = options
            .mode
            .unwrap_or_else(|| AddressMode::detect(selected.iter().copied()));
        tracing::debug!("Planning {:?} in {:?} mode from {:?}", requested, mode, options.origin);

        // End of the last emitted word; `None` until the origin is fixed.
        let mut cursor = match options.origin {
            Origin::Zero => Some(0),
            Origin::FirstSection => None,
        };
        let mut placements = Vec::with_capacity(selected.len());

        for section in selected {
            let address = section
                .placement(mode)
                .ok_or_else(|| Error::layout(section.name, "no load address available"))?;

            let gap = match cursor {
                None => 0,
                Some(end) => address.checked_sub(end).ok_or_else(|| {
                    Error::layout(
                        section.name,
                        format!("starts at {address:#x}, before the preceding content ends at {end:#x}"),
                    )
                })?,
            };
            let fill_words = gap_words(section.name, gap, options.gap_policy)?;

            // Padded to the words actually emitted.
            let end = align_up(section.size, WORD_BYTES)
                .and_then(|length| AddressSpan::new(address, length).end())
                .ok_or_else(|| Error::layout(section.name, "section extends past the address space"))?;
            cursor = Some(end);

            tracing::debug!(
                "{} at {:#x}, {} filler words before it",
                section.name,
                address,
                fill_words
            );
            placements.push(Placement {
                section: *section,
                address,
                fill_words,
            });
        }

        Ok(Self { mode, placements })
    }
}

fn gap_words(section: SectionName, gap: u64, policy: GapPolicy) -> Result<u64> {
    let remainder = gap % WORD_BYTES;
    if remainder != 0 {
        match policy {
            GapPolicy::Strict => {
                return Err(Error::layout(
                    section,
                    format!("gap of {gap:#x} bytes before it is not a whole number of words"),
                ));
            }
            GapPolicy::RoundDown => {
                tracing::warn!(
                    "Gap of {:#x} bytes before {} is not word aligned; dropping {} bytes",
                    gap,
                    section,
                    remainder
                );
            }
        }
    }
    Ok(gap / WORD_BYTES)
}
