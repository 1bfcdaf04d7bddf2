//! RFC 2425 directory-information implementation.
//!
//! - `parse`: unfolding, content-line grammar and value decoders
//! - `build`: value encoders, line assembly and folding
//! - `core`: [`Field`], [`Params`], value types and [`Directory`]
//! - `expand`: BEGIN/END entity trees
//!
//! ## Example
//!
//! ```rust
//! use dirinfo_core::config::DecodeConfig;
//! use dirinfo_rfc::rfc::dirinfo::{Directory, Field, Params, expand};
//!
//! let text = "BEGIN:VCARD\r\nFN:John Doe\r\nTEL;WORK;VOICE:+1-555-0100\r\nEND:VCARD\r\n";
//! let mut card = Directory::decode(text, &DecodeConfig::strict()).unwrap();
//!
//! let tel = card.field("TEL").unwrap();
//! assert!(tel.is_type("work"));
//!
//! card.push(Field::create("NOTE", "Likes commas, semicolons; etc.", Params::new()).unwrap());
//! let tree = expand(card.fields().iter().cloned()).unwrap();
//! assert_eq!(tree.len(), 1);
//!
//! let output = card.encode(75, "\r\n").unwrap();
//! assert!(output.contains("NOTE:Likes commas\\, semicolons\\; etc."));
//! ```

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::fold;
pub use self::core::{
    DirDate, DirDateTime, DirTime, Directory, Field, FieldValue, Parameter, Params,
    TransferEncoding, Zone,
};
pub use expand::{Block, Entity, expand, split_outer_inner};
pub use parse::{GrammarError, decode_fields, unfold};
