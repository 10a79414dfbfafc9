//! Item aggregate: a single bibliographic record with remote sync.

use crate::api::{encode, ApiContext, VERSION_HEADER};
use crate::creator::{Creator, CreatorData};
use crate::error::Error;
use crate::http::HttpMethod;
use crate::tag::{Tag, TagData};
use serde::{Deserialize, Serialize};

/// Wire representation of an item's `data` payload.
///
/// `key` and `version` are server-assigned and default to empty/zero for
/// records built locally before creation. Unknown keys in API responses are
/// ignored; absent optional fields are omitted when serializing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemData {
    pub key: String,
    pub version: i64,
    pub item_type: String,
    pub title: String,
    pub creators: Vec<CreatorData>,
    pub tags: Vec<TagData>,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "ISBN", skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(rename = "ISSN", skip_serializing_if = "Option::is_none")]
    pub issn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<serde_json::Value>,
}

/// Envelope the API wraps around each item payload in list responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope {
    pub(crate) data: ItemData,
}

/// A bibliographic record that owns its data and syncs itself to the API.
///
/// Accessors hand out copies; `tags()` and `creators()` rebuild fresh value
/// wrappers on every call, so mutating a returned wrapper never touches the
/// item until it is added back.
pub struct Item {
    data: ItemData,
    context: ApiContext,
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl Item {
    pub(crate) fn new(data: ItemData, context: ApiContext) -> Self {
        Self { data, context }
    }

    pub fn key(&self) -> &str {
        &self.data.key
    }

    pub fn version(&self) -> i64 {
        self.data.version
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn item_type(&self) -> &str {
        &self.data.item_type
    }

    pub fn url(&self) -> Option<&str> {
        self.data.url.as_deref()
    }

    pub fn abstract_note(&self) -> Option<&str> {
        self.data.abstract_note.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.data.date.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.data.language.as_deref()
    }

    pub fn publication_title(&self) -> Option<&str> {
        self.data.publication_title.as_deref()
    }

    pub fn volume(&self) -> Option<&str> {
        self.data.volume.as_deref()
    }

    pub fn issue(&self) -> Option<&str> {
        self.data.issue.as_deref()
    }

    pub fn pages(&self) -> Option<&str> {
        self.data.pages.as_deref()
    }

    pub fn doi(&self) -> Option<&str> {
        self.data.doi.as_deref()
    }

    pub fn isbn(&self) -> Option<&str> {
        self.data.isbn.as_deref()
    }

    pub fn issn(&self) -> Option<&str> {
        self.data.issn.as_deref()
    }

    pub fn short_title(&self) -> Option<&str> {
        self.data.short_title.as_deref()
    }

    pub fn access_date(&self) -> Option<&str> {
        self.data.access_date.as_deref()
    }

    pub fn archive(&self) -> Option<&str> {
        self.data.archive.as_deref()
    }

    pub fn archive_location(&self) -> Option<&str> {
        self.data.archive_location.as_deref()
    }

    pub fn library_catalog(&self) -> Option<&str> {
        self.data.library_catalog.as_deref()
    }

    pub fn call_number(&self) -> Option<&str> {
        self.data.call_number.as_deref()
    }

    pub fn rights(&self) -> Option<&str> {
        self.data.rights.as_deref()
    }

    pub fn extra(&self) -> Option<&str> {
        self.data.extra.as_deref()
    }

    pub fn series(&self) -> Option<&str> {
        self.data.series.as_deref()
    }

    pub fn series_title(&self) -> Option<&str> {
        self.data.series_title.as_deref()
    }

    pub fn series_text(&self) -> Option<&str> {
        self.data.series_text.as_deref()
    }

    pub fn journal_abbreviation(&self) -> Option<&str> {
        self.data.journal_abbreviation.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.data.publisher.as_deref()
    }

    pub fn place(&self) -> Option<&str> {
        self.data.place.as_deref()
    }

    pub fn date_added(&self) -> Option<&str> {
        self.data.date_added.as_deref()
    }

    pub fn date_modified(&self) -> Option<&str> {
        self.data.date_modified.as_deref()
    }

    /// Keys of the collections this item belongs to (defensive copy).
    pub fn collections(&self) -> Vec<String> {
        self.data.collections.clone()
    }

    /// Fresh tag wrappers built from the current records.
    pub fn tags(&self) -> Vec<Tag> {
        self.data.tags.iter().cloned().map(Tag::from_data).collect()
    }

    /// Fresh creator wrappers built from the current records.
    pub fn creators(&self) -> Vec<Creator> {
        self.data
            .creators
            .iter()
            .cloned()
            .map(Creator::from_data)
            .collect()
    }

    /// Set the title, trimmed. Fails when the trimmed value is empty; the
    /// prior title is left unchanged on failure.
    pub fn set_title(&mut self, value: &str) -> Result<(), Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Title cannot be empty"));
        }
        self.data.title = trimmed.to_string();
        Ok(())
    }

    /// Set the item type, trimmed. Fails when the trimmed value is empty.
    pub fn set_item_type(&mut self, value: &str) -> Result<(), Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Item type cannot be empty"));
        }
        self.data.item_type = trimmed.to_string();
        Ok(())
    }

    pub fn set_url(&mut self, value: Option<&str>) {
        self.data.url = value.map(str::to_string);
    }

    pub fn set_abstract_note(&mut self, value: Option<&str>) {
        self.data.abstract_note = value.map(str::to_string);
    }

    pub fn set_date(&mut self, value: Option<&str>) {
        self.data.date = value.map(str::to_string);
    }

    pub fn set_language(&mut self, value: Option<&str>) {
        self.data.language = value.map(str::to_string);
    }

    pub fn add_creator(&mut self, creator: &Creator) {
        self.data.creators.push(creator.to_data());
    }

    /// Remove the creator at `index`. Out-of-range indices are ignored.
    pub fn remove_creator(&mut self, index: usize) {
        if index < self.data.creators.len() {
            self.data.creators.remove(index);
        }
    }

    pub fn add_tag(&mut self, tag: &Tag) {
        self.data.tags.push(tag.to_data());
    }

    /// Remove the tag at `index`. Out-of-range indices are ignored.
    pub fn remove_tag(&mut self, index: usize) {
        if index < self.data.tags.len() {
            self.data.tags.remove(index);
        }
    }

    // Live membership access reserved for Collection::attach_to_item.
    pub(crate) fn push_collection(&mut self, key: String) {
        self.data.collections.push(key);
    }

    /// Send the full current record as a PUT to the API.
    pub async fn update(&self) -> Result<(), Error> {
        let body = encode(&self.data)?;
        self.context
            .request(
                HttpMethod::Put,
                &format!("/items/{}", self.data.key),
                Some(body),
                &[],
                &format!("update item {}", self.data.key),
            )
            .await?;
        Ok(())
    }

    /// Delete the item, guarded by the version current at call time via
    /// `If-Unmodified-Since-Version`. A conflict surfaces as an ordinary
    /// failed-response error; re-fetch to resolve it.
    pub async fn delete(&self) -> Result<(), Error> {
        self.context
            .request(
                HttpMethod::Delete,
                &format!("/items/{}", self.data.key),
                None,
                &[(VERSION_HEADER, self.data.version.to_string())],
                &format!("delete item {}", self.data.key),
            )
            .await?;
        Ok(())
    }

    /// Copy of the underlying data, independent of this item.
    pub fn to_data(&self) -> ItemData {
        self.data.clone()
    }
}
