//! Tag value object.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Wire representation of a tag. The numeric `type` classifies how the tag
/// was attached (0 = manual, 1 = automatic).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagData {
    pub tag: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<i64>,
}

/// A free-text label attachable to an item.
///
/// The name is always stored trimmed and never blank; the type classifier is
/// unrestricted.
#[derive(Clone, Debug)]
pub struct Tag {
    data: TagData,
}

impl Tag {
    /// Create a tag with the given name, trimmed. Fails when the trimmed
    /// name is empty.
    pub fn new(name: &str) -> Result<Self, Error> {
        let mut tag = Self {
            data: TagData::default(),
        };
        tag.set_name(name)?;
        Ok(tag)
    }

    /// Wrap tag data fetched from the API.
    pub fn from_data(data: TagData) -> Self {
        Self { data }
    }

    pub fn name(&self) -> &str {
        &self.data.tag
    }

    /// Rename the tag. Fails when the trimmed value is empty; the prior name
    /// is left unchanged on failure.
    pub fn set_name(&mut self, value: &str) -> Result<(), Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Tag name cannot be empty"));
        }
        self.data.tag = trimmed.to_string();
        Ok(())
    }

    pub fn tag_type(&self) -> Option<i64> {
        self.data.tag_type
    }

    pub fn set_tag_type(&mut self, value: Option<i64>) {
        self.data.tag_type = value;
    }

    /// Copy of the underlying data, independent of this tag.
    pub fn to_data(&self) -> TagData {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_trims_name() {
        let tag = Tag::new("  science  ").unwrap();
        assert_eq!(tag.name(), "science");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn new_rejects_blank_name(#[case] name: &str) {
        assert!(matches!(Tag::new(name), Err(Error::Validation { .. })));
    }

    #[test]
    fn set_name_failure_keeps_prior_value() {
        let mut tag = Tag::new("physics").unwrap();
        assert!(tag.set_name("   ").is_err());
        assert_eq!(tag.name(), "physics");
    }

    #[test]
    fn tag_type_set_and_unset() {
        let mut tag = Tag::new("science").unwrap();
        assert_eq!(tag.tag_type(), None);

        tag.set_tag_type(Some(1));
        assert_eq!(tag.tag_type(), Some(1));

        tag.set_tag_type(None);
        assert_eq!(tag.tag_type(), None);
    }

    #[test]
    fn to_data_is_independent() {
        let tag = Tag::new("science").unwrap();
        let mut copy = tag.to_data();
        copy.tag = "mutated".to_string();
        assert_eq!(tag.to_data().tag, "science");
    }

    #[test]
    fn wire_shape_omits_absent_type() {
        let tag = Tag::new("science").unwrap();
        let json = serde_json::to_string(&tag.to_data()).unwrap();
        assert_eq!(json, r#"{"tag":"science"}"#);
    }

    #[test]
    fn wire_shape_renames_type() {
        let data: TagData = serde_json::from_str(r#"{"tag":"science","type":1}"#).unwrap();
        assert_eq!(data.tag, "science");
        assert_eq!(data.tag_type, Some(1));
    }
}
