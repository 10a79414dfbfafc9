//! Creator value object.

use serde::{Deserialize, Serialize};

/// Wire representation of a creator. Individual creators use
/// `firstName`/`lastName`; organizations use the single `name` field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatorData {
    pub creator_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A contributor credited on an item (author, editor, translator, ...).
///
/// The two name representations are mutually exclusive: writing a first or
/// last name clears the organizational name, and writing the organizational
/// name clears both individual fields. Empty names are permitted.
#[derive(Clone, Debug)]
pub struct Creator {
    data: CreatorData,
}

impl Creator {
    /// Create a creator with the given role and no name yet.
    pub fn new(creator_type: &str) -> Self {
        Self {
            data: CreatorData {
                creator_type: creator_type.to_string(),
                ..CreatorData::default()
            },
        }
    }

    /// Wrap creator data fetched from the API.
    pub fn from_data(data: CreatorData) -> Self {
        Self { data }
    }

    pub fn creator_type(&self) -> &str {
        &self.data.creator_type
    }

    pub fn set_creator_type(&mut self, value: &str) {
        self.data.creator_type = value.to_string();
    }

    pub fn first_name(&self) -> Option<&str> {
        self.data.first_name.as_deref()
    }

    /// Set the first name. A present value clears the single name field.
    pub fn set_first_name(&mut self, value: Option<&str>) {
        self.data.first_name = value.map(str::to_string);
        if self.data.first_name.is_some() {
            self.data.name = None;
        }
    }

    pub fn last_name(&self) -> Option<&str> {
        self.data.last_name.as_deref()
    }

    /// Set the last name. A present value clears the single name field.
    pub fn set_last_name(&mut self, value: Option<&str>) {
        self.data.last_name = value.map(str::to_string);
        if self.data.last_name.is_some() {
            self.data.name = None;
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    /// Set the single name (for organizations). A present value clears both
    /// individual name fields.
    pub fn set_name(&mut self, value: Option<&str>) {
        self.data.name = value.map(str::to_string);
        if self.data.name.is_some() {
            self.data.first_name = None;
            self.data.last_name = None;
        }
    }

    /// Copy of the underlying data, independent of this creator.
    pub fn to_data(&self) -> CreatorData {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> Creator {
        let mut creator = Creator::new("author");
        creator.set_first_name(Some("John"));
        creator.set_last_name(Some("Doe"));
        creator
    }

    #[test]
    fn single_name_clears_individual_names() {
        let mut creator = individual();
        creator.set_name(Some("Acme Corp"));

        assert_eq!(creator.name(), Some("Acme Corp"));
        assert_eq!(creator.first_name(), None);
        assert_eq!(creator.last_name(), None);
    }

    #[test]
    fn first_name_clears_single_name() {
        let mut creator = Creator::new("author");
        creator.set_name(Some("Acme Corp"));
        creator.set_first_name(Some("John"));

        assert_eq!(creator.first_name(), Some("John"));
        assert_eq!(creator.name(), None);
    }

    #[test]
    fn last_name_clears_single_name() {
        let mut creator = Creator::new("author");
        creator.set_name(Some("Acme Corp"));
        creator.set_last_name(Some("Doe"));

        assert_eq!(creator.last_name(), Some("Doe"));
        assert_eq!(creator.name(), None);
    }

    #[test]
    fn clearing_a_field_leaves_the_others() {
        let mut creator = individual();
        creator.set_first_name(None);

        assert_eq!(creator.first_name(), None);
        assert_eq!(creator.last_name(), Some("Doe"));
    }

    #[test]
    fn empty_names_are_permitted() {
        let mut creator = Creator::new("author");
        creator.set_first_name(Some(""));
        assert_eq!(creator.first_name(), Some(""));
    }

    #[test]
    fn to_data_is_independent() {
        let creator = individual();
        let mut copy = creator.to_data();
        copy.first_name = Some("Mutated".to_string());
        assert_eq!(creator.first_name(), Some("John"));
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let json = serde_json::to_string(&individual().to_data()).unwrap();
        assert_eq!(
            json,
            r#"{"creatorType":"author","firstName":"John","lastName":"Doe"}"#
        );
    }
}
