//! Directory-information serialization.
//!
//! - Escape: TEXT, parameter value and date/time encoders
//! - Fold: line wrapping for output
//! - Line: content line assembly from components

mod escape;
mod fold;
mod line;

pub use escape::{
    encode_base64, encode_date, encode_date_time, encode_param_value, encode_quoted_printable,
    encode_text, encode_text_list, encode_time,
};
pub use fold::fold;
pub use line::encode_line;
