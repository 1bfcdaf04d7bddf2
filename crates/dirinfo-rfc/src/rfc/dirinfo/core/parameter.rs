//! Content-line parameter types (RFC 2425 §5.8.2).

/// A parameter and its values.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, unquoted.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// Ordered mapping from upper-cased parameter name to its values.
///
/// Names are unique; order of first appearance is kept for re-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<Parameter>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::set`].
    #[must_use]
    pub fn with<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(name, values);
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all values of a parameter.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|p| p.values.as_slice())
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Parameter::value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces the values of a parameter, appending it if absent.
    pub fn set<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if let Some(param) = self.get_mut(name) {
            param.values = values;
        } else {
            self.entries.push(Parameter::multi(name, values));
        }
    }

    /// Appends values to a parameter, creating it if absent.
    ///
    /// Repeated parameters in a content line accumulate this way.
    pub fn append(&mut self, name: &str, values: Vec<String>) {
        if let Some(param) = self.get_mut(name) {
            param.values.extend(values);
        } else {
            self.entries.push(Parameter::multi(name, values));
        }
    }

    /// Removes a parameter, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let pos = self
            .entries
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.entries
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Parameter> for Params {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        let mut params = Self::new();
        for param in iter {
            params.append(&param.name, param.values);
        }
        params
    }
}

/// Common parameter names as constants.
pub mod names {
    pub const TYPE: &str = "TYPE";
    pub const VALUE: &str = "VALUE";
    pub const ENCODING: &str = "ENCODING";
    pub const CHARSET: &str = "CHARSET";
}

/// Well-known parameter values.
pub mod values {
    /// ENCODING value requesting base64 transformation on creation.
    pub const BASE64_REQUEST: &str = "b64";
    /// ENCODING value written for base64 payloads.
    pub const B: &str = "B";
    pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";
    pub const PREF: &str = "PREF";
}
