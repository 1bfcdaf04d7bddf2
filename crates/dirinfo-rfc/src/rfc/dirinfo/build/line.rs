//! Content line assembly.

use super::escape::encode_param_value;
use crate::error::DirInfoResult;
use crate::rfc::dirinfo::core::Params;

/// Assembles an unfolded content line:
/// `[group "."] name *(";" pname "=" pvalue *("," pvalue)) ":" value`.
///
/// `value` is embedded verbatim; parameter values are quoted when needed.
/// The result is not validated here: callers re-parse it.
///
/// ## Errors
/// Returns `Unencodeable` if a parameter value cannot be represented.
pub fn encode_line(
    group: Option<&str>,
    name: &str,
    params: &Params,
    value: &str,
) -> DirInfoResult<String> {
    let mut line = String::with_capacity(name.len() + value.len() + 16);

    if let Some(group) = group {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(name);

    for param in params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        let encoded = param
            .values
            .iter()
            .map(|v| encode_param_value(v))
            .collect::<DirInfoResult<Vec<_>>>()?;
        line.push_str(&encoded.join(","));
    }

    line.push(':');
    line.push_str(value);

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirInfoError;

    #[test]
    fn line_without_params() {
        let line = encode_line(None, "FN", &Params::new(), "John Doe").unwrap();
        assert_eq!(line, "FN:John Doe");
    }

    #[test]
    fn line_with_group_and_params() {
        let params = Params::new()
            .with("TYPE", ["WORK", "VOICE"])
            .with("X-LABEL", ["a;b"]);
        let line = encode_line(Some("item1"), "TEL", &params, "+1-555-0100").unwrap();
        assert_eq!(line, "item1.TEL;TYPE=WORK,VOICE;X-LABEL=\"a;b\":+1-555-0100");
    }

    #[test]
    fn empty_param_value_list() {
        let params = Params::new().with("X-FLAG", Vec::<String>::new());
        let line = encode_line(None, "X-A", &params, "v").unwrap();
        assert_eq!(line, "X-A;X-FLAG=:v");
    }

    #[test]
    fn unencodeable_param_value() {
        let params = Params::new().with("X-P", ["has \"quote\""]);
        assert!(matches!(
            encode_line(None, "X-A", &params, "v"),
            Err(DirInfoError::Unencodeable(_))
        ));
    }
}
