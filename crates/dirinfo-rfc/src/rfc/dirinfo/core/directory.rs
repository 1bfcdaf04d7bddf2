//! Profile-agnostic field container.

use dirinfo_core::config::{DecodeConfig, EncodeConfig};
use dirinfo_core::error::CoreError;

use super::field::Field;
use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::expand::{Entity, expand};
use crate::rfc::dirinfo::parse::decode_fields;

/// An ordered sequence of fields decoded from one document.
///
/// Typically a single BEGIN/END delimited entity such as a vCard, though no
/// profile is assumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    fields: Vec<Field>,
}

impl Directory {
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Decodes a document.
    ///
    /// ## Errors
    ///
    /// Returns `InvalidEncoding` for malformed lines under a raising policy.
    #[tracing::instrument(skip(text, config), fields(text_len = text.len()))]
    pub fn decode(text: &str, config: &DecodeConfig) -> DirInfoResult<Self> {
        let directory = Self::new(decode_fields(text, config)?);
        tracing::debug!(
            profile = directory.profile(),
            count = directory.len(),
            "Decoded directory"
        );
        Ok(directory)
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field named `name`, preferring one with `TYPE=PREF`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields_named(name)
            .find(|f| f.is_pref())
            .or_else(|| self.fields_named(name).next())
    }

    /// All fields named `name`, case-insensitively, in order.
    pub fn fields_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Field> + use<'a, 'n> {
        self.fields.iter().filter(move |f| f.is_name(name))
    }

    /// All fields in `group`, case-insensitively, in order.
    pub fn fields_in_group<'a, 'g>(
        &'a self,
        group: &'g str,
    ) -> impl Iterator<Item = &'a Field> + use<'a, 'g> {
        self.fields.iter().filter(move |f| f.is_group(group))
    }

    /// Distinct group names in order of first appearance, compared
    /// case-insensitively.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.fields.iter().filter_map(Field::group) {
            if !groups.iter().any(|g| g.eq_ignore_ascii_case(group)) {
                groups.push(group);
            }
        }
        groups
    }

    /// The BEGIN value of the first field, if it is a BEGIN.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.fields
            .first()
            .filter(|f| f.is_name("BEGIN"))
            .and_then(Field::raw_value)
    }

    /// Checks that the fields are wrapped in a BEGIN/END pair, optionally of
    /// the given profile.
    ///
    /// ## Errors
    ///
    /// - `InvalidEncoding` if the first field is not BEGIN, the last is not
    ///   END, or BEGIN names another profile.
    /// - `MismatchedBeginEnd` if the BEGIN and END values differ.
    pub fn check_begin_end(&self, profile: Option<&str>) -> DirInfoResult<()> {
        let begin = self
            .profile()
            .ok_or_else(|| DirInfoError::InvalidEncoding("BEGIN not found".to_string()))?;

        let end = self
            .fields
            .last()
            .filter(|f| f.is_name("END"))
            .and_then(Field::raw_value)
            .ok_or_else(|| DirInfoError::InvalidEncoding("END not found".to_string()))?;

        if !begin.eq_ignore_ascii_case(end) {
            return Err(DirInfoError::MismatchedBeginEnd {
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }

        if let Some(profile) = profile
            && !begin.eq_ignore_ascii_case(profile)
        {
            return Err(DirInfoError::InvalidEncoding(format!(
                "{profile} profile not found, BEGIN:{begin}"
            )));
        }

        Ok(())
    }

    /// Appends a field, keeping a trailing END last.
    pub fn push(&mut self, field: Field) {
        let at = match self.fields.last() {
            Some(last) if last.is_name("END") => self.fields.len() - 1,
            _ => self.fields.len(),
        };
        self.fields.insert(at, field);
    }

    /// Like [`Directory::push`], refusing a second field of the same name.
    ///
    /// ## Errors
    ///
    /// Returns a validation error if a field with that name already exists.
    pub fn push_unique(&mut self, field: Field) -> DirInfoResult<()> {
        if self.fields_named(field.name()).next().is_some() {
            return Err(CoreError::ValidationError(format!(
                "a {} field already exists",
                field.name()
            ))
            .into());
        }
        self.push(field);
        Ok(())
    }

    /// Removes the first field equal to `field`, returning whether one was
    /// found.
    ///
    /// ## Errors
    ///
    /// Returns a validation error for BEGIN and END fields.
    pub fn remove(&mut self, field: &Field) -> DirInfoResult<bool> {
        if field.is_name("BEGIN") || field.is_name("END") {
            return Err(CoreError::ValidationError(format!(
                "{} fields cannot be removed",
                field.name()
            ))
            .into());
        }

        let Some(pos) = self.fields.iter().position(|f| f == field) else {
            return Ok(false);
        };
        self.fields.remove(pos);
        Ok(true)
    }

    /// Mutable access to the first field named `name`.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.is_name(name))
    }

    /// Encodes every field, folded at `width` octets.
    ///
    /// ## Errors
    ///
    /// Returns `Unencodeable` if `width` is 1.
    pub fn encode(&self, width: usize, newline: &str) -> DirInfoResult<String> {
        self.fields
            .iter()
            .map(|f| f.encode(width, newline))
            .collect()
    }

    /// Encodes every field using configured width and newline.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn encode_with(&self, config: &EncodeConfig) -> DirInfoResult<String> {
        config.validate()?;
        self.encode(config.width, &config.newline)
    }

    /// The fields nested by BEGIN/END pairs.
    ///
    /// ## Errors
    ///
    /// Propagates [`expand`] errors.
    pub fn entities(&self) -> DirInfoResult<Vec<Entity>> {
        expand(self.fields.iter().cloned())
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<Field> for Directory {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::dirinfo::core::Params;

    const CARD: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:John Doe\r\n\
item1.EMAIL;TYPE=internet:john@work.example\r\n\
item2.EMAIL;TYPE=internet,pref:john@home.example\r\n\
ITEM1.X-ABLABEL:work\r\n\
END:VCARD\r\n";

    fn card() -> Directory {
        Directory::decode(CARD, &DecodeConfig::strict()).unwrap()
    }

    #[test]
    fn lookup_prefers_pref() {
        let dir = card();
        assert_eq!(dir.field("email").unwrap().raw_value(), Some("john@home.example"));
        assert_eq!(dir.fields_named("EMAIL").count(), 2);
        assert!(dir.field("NICKNAME").is_none());
    }

    #[test]
    fn lookup_result_outlives_name() {
        let dir = card();
        let found = {
            let name = String::from("fn");
            dir.field(&name)
        };
        assert_eq!(found.unwrap().raw_value(), Some("John Doe"));

        let in_group: Vec<&Field> = {
            let group = "ITEM2".to_lowercase();
            dir.fields_in_group(&group).collect()
        };
        assert_eq!(in_group.len(), 1);
    }

    #[test]
    fn quoted_printable_text_keeps_following_fields() {
        let mut dir =
            Directory::decode("BEGIN:VCARD\r\nFN:x\r\nEND:VCARD\r\n", &DecodeConfig::strict())
                .unwrap();
        dir.push(
            Field::create(
                "NOTE",
                "1+1=",
                Params::new().with("ENCODING", ["QUOTED-PRINTABLE"]),
            )
            .unwrap(),
        );
        dir.push(Field::decode("X-AFTER:y").unwrap());
        assert_eq!(dir.len(), 5);

        let encoded = dir.encode(75, "\r\n").unwrap();
        let again = Directory::decode(&encoded, &DecodeConfig::strict()).unwrap();
        assert_eq!(again.len(), 5);
        assert_eq!(again.field("NOTE").unwrap().value_str().unwrap(), "1+1=");
        assert_eq!(again.field("X-AFTER").unwrap().raw_value(), Some("y"));
        again.check_begin_end(Some("VCARD")).unwrap();
    }

    #[test]
    fn groups_are_case_insensitive() {
        let dir = card();
        assert_eq!(dir.groups(), ["item1", "item2"]);
        let names: Vec<&str> = dir.fields_in_group("item1").map(Field::name).collect();
        assert_eq!(names, ["EMAIL", "X-ABLABEL"]);
    }

    #[test]
    fn profile_and_begin_end_check() {
        let dir = card();
        assert_eq!(dir.profile(), Some("VCARD"));
        dir.check_begin_end(None).unwrap();
        dir.check_begin_end(Some("vcard")).unwrap();
        assert!(matches!(
            dir.check_begin_end(Some("VCALENDAR")),
            Err(DirInfoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn begin_end_check_failures() {
        let no_end = Directory::decode("BEGIN:VCARD\nFN:x\n", &DecodeConfig::strict()).unwrap();
        assert!(no_end.check_begin_end(None).is_err());

        let mismatched =
            Directory::decode("BEGIN:VCARD\nEND:VEVENT\n", &DecodeConfig::strict()).unwrap();
        assert!(matches!(
            mismatched.check_begin_end(None),
            Err(DirInfoError::MismatchedBeginEnd { .. })
        ));

        assert!(Directory::default().check_begin_end(None).is_err());
    }

    #[test]
    fn push_keeps_end_last() {
        let mut dir = card();
        dir.push(Field::create("NOTE", "added", Params::new()).unwrap());
        assert!(dir.fields().last().unwrap().is_name("END"));
        assert!(dir.fields()[dir.len() - 2].is_name("NOTE"));

        let mut bare = Directory::default();
        bare.push(Field::decode("FN:x").unwrap());
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn push_unique_refuses_duplicates() {
        let mut dir = card();
        let err = dir
            .push_unique(Field::decode("fn:Other").unwrap())
            .unwrap_err();
        assert!(matches!(err, DirInfoError::CoreError(CoreError::ValidationError(_))));
        dir.push_unique(Field::decode("NICKNAME:Jo").unwrap()).unwrap();
        assert!(dir.field("NICKNAME").is_some());
    }

    #[test]
    fn remove_fields() {
        let mut dir = card();
        let fn_field = dir.field("FN").unwrap().clone();
        assert!(dir.remove(&fn_field).unwrap());
        assert!(!dir.remove(&fn_field).unwrap());

        let begin = dir.fields()[0].clone();
        assert!(dir.remove(&begin).is_err());
        assert_eq!(dir.profile(), Some("VCARD"));
    }

    #[test]
    fn mutate_through_field_mut() {
        let mut dir = card();
        dir.field_mut("FN").unwrap().set_value("Jane Doe").unwrap();
        assert_eq!(dir.field("FN").unwrap().as_text().unwrap(), "Jane Doe");
    }

    #[test_log::test]
    fn encode_round_trip() {
        let dir = card();
        let encoded = dir.encode(75, "\r\n").unwrap();
        assert_eq!(encoded, CARD);

        let again = Directory::decode(&encoded, &DecodeConfig::strict()).unwrap();
        assert_eq!(again, dir);
        assert_eq!(dir.encode_with(&EncodeConfig::default()).unwrap(), CARD);
    }

    #[test]
    fn entities_nest() {
        let tree = card().entities().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].as_block().unwrap().children.len(), 5);
    }

    #[test]
    fn collect_from_fields() {
        let dir: Directory = ["FN:a", "NOTE:b"]
            .into_iter()
            .map(|l| Field::decode(l).unwrap())
            .collect();
        assert_eq!((&dir).into_iter().count(), 2);
    }
}
