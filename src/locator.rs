//! Section location.
//!
//! Finds `.text`, `.data` and `.got` either in captured section-header text from an
//! external dumper (`objdump -h` style) or directly in the ELF via the `object` crate.
//! In both cases the first section whose name contains the token wins.

use object::{Architecture, Object, ObjectSection};

use crate::error::{Error, Result};
use crate::section::{Section, SectionName, SectionTable};

/// Column positions, counted from zero after splitting a header line on whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub size: usize,
    /// `None` when the metadata does not expose virtual addresses.
    pub load_address: Option<usize>,
    pub file_offset: usize,
}

impl ColumnLayout {
    /// `Idx Name Size VMA LMA File-off Algn`
    pub const OBJDUMP: ColumnLayout = ColumnLayout {
        size: 2,
        load_address: Some(3),
        file_offset: 5,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::OBJDUMP
    }
}

/// Locates sections in section-header text.
pub fn locate_sections(metadata: &str, columns: &ColumnLayout) -> Result<SectionTable> {
    let mut slots = SectionTable::empty_slots();

    for line in metadata.lines() {
        for name in SectionName::ALL {
            let slot = SectionTable::slot_mut(&mut slots, name);
            if slot.is_none() && line.contains(name.token()) {
                let section = parse_header_line(name, line, columns)?;
                tracing::info!(
                    "{}: size {:#x}, vma {}, file offset {:#x}",
                    name,
                    section.size,
                    section
                        .load_address
                        .map_or_else(|| "n/a".to_string(), |a| format!("{a:#x}")),
                    section.file_offset
                );
                *slot = Some(section);
            }
        }
    }

    SectionTable::from_slots(slots).ok_or(Error::SectionNotFound(SectionName::Text))
}

fn parse_header_line(name: SectionName, line: &str, columns: &ColumnLayout) -> Result<Section> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let hex_field = |field: &'static str, column: usize| -> Result<u64> {
        let raw = fields.get(column).copied().unwrap_or_default();
        u64::from_str_radix(raw, 16).map_err(|_| Error::MetadataParseError {
            section: name,
            field,
            value: raw.to_string(),
        })
    };

    Ok(Section {
        name,
        size: hex_field("size", columns.size)?,
        file_offset: hex_field("file offset", columns.file_offset)?,
        load_address: columns
            .load_address
            .map(|column| hex_field("load address", column))
            .transpose()?,
    })
}

/// Locates sections by reading the ELF section headers directly.
pub fn locate_sections_in_elf(binary: &[u8]) -> Result<SectionTable> {
    let elf = object::File::parse(binary)?;
    if !matches!(elf.architecture(), Architecture::Riscv32 | Architecture::Riscv64) {
        return Err(Error::UnsupportedArchitecture(format!("{:?}", elf.architecture())));
    }

    let mut slots = SectionTable::empty_slots();
    for section in elf.sections() {
        let section_name = section.name()?;
        // NOBITS sections have nothing to read.
        let Some((file_offset, _)) = section.file_range() else {
            tracing::debug!("Skipping section {} without file contents", section_name);
            continue;
        };

        for name in SectionName::ALL {
            let slot = SectionTable::slot_mut(&mut slots, name);
            if slot.is_none() && section_name.contains(name.token()) {
                tracing::info!(
                    "{} ({}): size {:#x}, vma {:#x}, file offset {:#x}",
                    name,
                    section_name,
                    section.size(),
                    section.address(),
                    file_offset
                );
                *slot = Some(Section {
                    name,
                    size: section.size(),
                    file_offset,
                    load_address: Some(section.address()),
                });
            }
        }
    }

    SectionTable::from_slots(slots).ok_or(Error::SectionNotFound(SectionName::Text))
}
