//! ELF to memory image conversion.
//!
//! This library turns the `.text`, `.data` and `.got` sections of a RISC-V executable into
//! a word-per-line hex file for `readmemh`-style memory models.
//! It is organized into several modules:
//! - `config`: CLI configuration.
//! - `tool`: Running the external section-header dumper.
//! - `locator`: Finding sections in dumper output or in the ELF itself.
//! - `reader`: Forward-only reads of section bytes.
//! - `encoder`: Byte-swapped hex words.
//! - `layout`: Placement and gap planning.
//! - `image`: Memory image assembly.
//! - `writer`: Staged output writes.
//! - `converter`: The conversion orchestration.

pub mod config;
pub mod converter;
pub mod encoder;
pub mod error;
pub mod image;
pub mod layout;
pub mod locator;
pub mod reader;
pub mod section;
pub mod tool;
pub mod utils;
pub mod writer;

pub use error::{Error, Result};
