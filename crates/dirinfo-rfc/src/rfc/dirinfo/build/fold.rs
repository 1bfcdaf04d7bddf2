//! Content line folding.

use crate::error::{DirInfoError, DirInfoResult};

/// Folds a line to at most `width` octets per physical line.
///
/// Continuation lines start with `newline` followed by a single space, which
/// counts toward the width. Folds at UTF-8 character boundaries. A `width` of
/// 0 disables wrapping. The result is terminated by exactly one `newline`.
///
/// ## Errors
/// Returns `Unencodeable` if `width` is 1.
pub fn fold(line: &str, width: usize, newline: &str) -> DirInfoResult<String> {
    if width == 1 {
        return Err(DirInfoError::Unencodeable(format!(
            "wrap width {width} is too narrow"
        )));
    }

    let line = line.trim_end_matches(['\r', '\n']);

    if width == 0 || line.len() <= width {
        return Ok(format!("{line}{newline}"));
    }

    let mut result =
        String::with_capacity(line.len() + (line.len() / width + 1) * (newline.len() + 1));
    let mut current_len = 0;
    let mut first_segment = true;

    for c in line.chars() {
        let char_len = c.len_utf8();

        // Continuation lines spend one octet on the leading space
        let prefix_len = usize::from(!first_segment);

        if current_len > prefix_len && current_len + char_len > width {
            result.push_str(newline);
            result.push(' ');
            current_len = 1;
            first_segment = false;
        }

        result.push(c);
        current_len += char_len;
    }

    result.push_str(newline);
    Ok(result)
}
