//! Directory-information parsing primitives (RFC 2425).
//!
//! - Lexer: line unfolding and content-line grammar
//! - Grammar: character classes and DATE, TIME, DATE-TIME, INTEGER matchers
//! - Values: TEXT unescaping, list splitting and transfer decoding
//! - Parser: whole-document decoding into fields

mod error;
pub mod grammar;
mod lexer;
mod parser;
mod values;

pub use error::{GrammarError, GrammarErrorKind, GrammarResult};
pub use lexer::{ContentLine, parse_content_line, unfold, unfold_numbered};
pub use parser::decode_fields;
pub use values::{
    decode_base64, decode_date_list, decode_date_time_list, decode_list, decode_quoted_printable,
    decode_text, decode_text_list, decode_time_list,
};
