//! Parsers for Nintendo DS binary formats.
//!
//! Each submodule targets one format. All parsers follow the same
//! conventions:
//!
//! * **Generic over** [`std::io::Read`] + [`std::io::Seek`] - pass a [`std::fs::File`], a
//!   [`std::io::Cursor`], or anything else that implements both traits.
//!   Offsets stored in the format are taken relative to the reader's
//!   position when `parse` is called.
//! * **Metadata only** - file data is never read.
//! * **Symmetric** - formats that can be rebuilt expose `to_bytes` / `write`
//!   producing exactly what `parse` consumes.
//!
//! ## Format overview
//!
//! | Module  | Format | Description |
//! |---------|--------|-------------|
//! | [`fnt`] | FNT    | Directory tree and file-ID assignment of an NDS ROM |

pub mod fnt;
