//! RFC 2425 directory-information codec.
//!
//! Decodes folded content lines into [`Field`](rfc::dirinfo::Field)s, encodes
//! them back, and assembles BEGIN/END delimited entity trees.

pub mod error;
pub mod rfc;
