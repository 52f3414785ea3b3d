//! Section table.
//!
//! The three sections the memory image is assembled from, as located in a binary.

use std::fmt;

/// The sections recognized in a binary, in the order they are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Text,
    Data,
    GlobalOffsetTable,
}

impl SectionName {
    pub const ALL: [SectionName; 3] = [
        SectionName::Text,
        SectionName::Data,
        SectionName::GlobalOffsetTable,
    ];

    /// The token searched for in section metadata and section names.
    pub fn token(self) -> &'static str {
        match self {
            SectionName::Text => ".text",
            SectionName::Data => ".data",
            SectionName::GlobalOffsetTable => ".got",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A contiguous byte range, either in the file or in the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpan {
    pub start: u64,
    pub length: u64,
}

impl AddressSpan {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// First address past the span, `None` if it would not fit in a `u64`.
    pub fn end(&self) -> Option<u64> {
        self.start.checked_add(self.length)
    }
}

/// Which address a section is placed at in the memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Run-time (virtual) load addresses.
    Virtual,
    /// Positions within the file.
    FileOffset,
}

/// A section located in a binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: SectionName,
    /// Size in bytes.
    pub size: u64,
    /// Offset of the section's contents within the file.
    pub file_offset: u64,
    /// Virtual load address, when the metadata exposes one.
    pub load_address: Option<u64>,
}

impl Section {
    pub fn file_span(&self) -> AddressSpan {
        AddressSpan::new(self.file_offset, self.size)
    }

    /// Address of the section under `mode`, `None` if the metadata lacked a load address.
    pub fn placement(&self, mode: AddressMode) -> Option<u64> {
        match mode {
            AddressMode::Virtual => self.load_address,
            AddressMode::FileOffset => Some(self.file_offset),
        }
    }
}

/// The located sections. `.text` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    pub text: Section,
    pub data: Option<Section>,
    pub got: Option<Section>,
}

impl SectionTable {
    /// Builds a table from first-match slots indexed by `SectionName`.
    pub(crate) fn from_slots(slots: [Option<Section>; 3]) -> Option<Self> {
        let [text, data, got] = slots;
        Some(Self {
            text: text?,
            data,
            got,
        })
    }

    pub(crate) fn empty_slots() -> [Option<Section>; 3] {
        [None; 3]
    }

    pub(crate) fn slot_mut(slots: &mut [Option<Section>; 3], name: SectionName) -> &mut Option<Section> {
        &mut slots[name.slot()]
    }

    pub fn get(&self, name: SectionName) -> Option<&Section> {
        match name {
            SectionName::Text => Some(&self.text),
            SectionName::Data => self.data.as_ref(),
            SectionName::GlobalOffsetTable => self.got.as_ref(),
        }
    }

    /// Present sections in layout order: text, data, got.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        SectionName::ALL.into_iter().filter_map(|name| self.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: SectionName, load_address: Option<u64>) -> Section {
        Section {
            name,
            size: 8,
            file_offset: 0x1000,
            load_address,
        }
    }

    #[test]
    fn placement_follows_mode() {
        let s = section(SectionName::Data, Some(0x8000));
        assert_eq!(s.placement(AddressMode::Virtual), Some(0x8000));
        assert_eq!(s.placement(AddressMode::FileOffset), Some(0x1000));
        assert_eq!(section(SectionName::Data, None).placement(AddressMode::Virtual), None);
    }

    #[test]
    fn table_requires_text() {
        let mut slots = SectionTable::empty_slots();
        *SectionTable::slot_mut(&mut slots, SectionName::Data) = Some(section(SectionName::Data, None));
        assert!(SectionTable::from_slots(slots).is_none());

        *SectionTable::slot_mut(&mut slots, SectionName::Text) = Some(section(SectionName::Text, None));
        let table = SectionTable::from_slots(slots).unwrap();
        let names: Vec<_> = table.iter().map(|s| s.name).collect();
        assert_eq!(names, vec![SectionName::Text, SectionName::Data]);
        assert!(table.get(SectionName::GlobalOffsetTable).is_none());
    }

    #[test]
    fn span_end() {
        assert_eq!(AddressSpan::new(0x10, 0x8).end(), Some(0x18));
        assert_eq!(AddressSpan::new(0x10, u64::MAX).end(), None);
        assert_eq!(section(SectionName::Text, None).file_span(), AddressSpan::new(0x1000, 8));
    }
}
