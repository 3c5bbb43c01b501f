//! **ndsfnt** - a Rust library for the Nintendo DS ROM file name table.
//!
//! The FNT describes a ROM's directory tree and assigns file IDs to every
//! name in it; file contents live elsewhere (the FAT and the data region).
//!
//! # Supported formats
//! | Module | Format |
//! |--------|--------|
//! | [`formats::fnt`] | FNT - NDS File Name Table (`fnt.bin`) |
//!
//! # Features
//! * `serde` - derive the JSON interchange form on [`formats::fnt::Fnt`].
//! * `cli` - build the `fnttool` converter binary (enabled by default).

pub mod error;
pub mod formats;
pub mod utils;

pub use error::{Error, Result};
