//! Directory-information document decoder.

use dirinfo_core::config::DecodeConfig;

use super::lexer::unfold_numbered;
use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::core::Field;

/// Decodes a document into its fields, in input order.
///
/// Lines are unfolded first; each logical line becomes one [`Field`].
///
/// ## Errors
///
/// Returns `InvalidEncoding`, naming the physical line number, if a line
/// does not match the content-line grammar and the policy says to raise.
#[tracing::instrument(skip(text, config), fields(text_len = text.len()))]
pub fn decode_fields(text: &str, config: &DecodeConfig) -> DirInfoResult<Vec<Field>> {
    tracing::debug!("Decoding directory information");

    let lines = unfold_numbered(text);
    tracing::trace!(count = lines.len(), "Unfolded lines");

    let fields = lines
        .into_iter()
        .map(|(line_num, line)| {
            Field::decode_with(&line, config).map_err(|err| at_line(err, line_num))
        })
        .collect::<DirInfoResult<Vec<_>>>()?;

    let invalid = fields.iter().filter(|f| !f.is_valid()).count();
    if invalid > 0 {
        tracing::warn!(invalid, "Kept invalid content lines");
    }

    tracing::debug!(count = fields.len(), "Decoded fields");

    Ok(fields)
}

fn at_line(err: DirInfoError, line_num: usize) -> DirInfoError {
    match err {
        DirInfoError::InvalidEncoding(msg) => {
            DirInfoError::InvalidEncoding(format!("line {line_num}: {msg}"))
        }
        other => other,
    }
}
