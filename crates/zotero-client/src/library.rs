//! Library gateway: connection identity plus collection/item/tag fetch and
//! creation, including the item field whitelist and creation-response
//! normalization.

use crate::api::{decode, encode, ApiContext};
use crate::collection::{Collection, CollectionData};
use crate::error::Error;
use crate::http::{HttpClient, HttpError, HttpMethod, Transport};
use crate::item::{Item, ItemData, ItemEnvelope};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const BASE_URL: &str = "https://api.zotero.org";

/// Item fields the API accepts on creation. Anything else is dropped with a
/// warning before the request is sent.
const ZOTERO_FIELDS: [&str; 30] = [
    "itemType",
    "title",
    "creators",
    "abstractNote",
    "publicationTitle",
    "url",
    "tags",
    "date",
    "pages",
    "volume",
    "issue",
    "publisher",
    "place",
    "ISBN",
    "series",
    "seriesTitle",
    "seriesText",
    "journalAbbreviation",
    "language",
    "DOI",
    "ISSN",
    "shortTitle",
    "accessDate",
    "archive",
    "archiveLocation",
    "libraryCatalog",
    "callNumber",
    "rights",
    "extra",
    "collections",
];

/// Personal vs. group library; selects the URL path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibraryType {
    Users,
    Groups,
}

impl LibraryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryType::Users => "users",
            LibraryType::Groups => "groups",
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub alternate: Option<Link>,
}

/// Library metadata returned by the API root resource.
#[derive(Clone, Debug, Deserialize)]
pub struct LibraryData {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub links: Links,
}

/// Names extracted from the tags endpoint (which returns bare tag objects).
#[derive(Debug, Deserialize)]
struct TagName {
    tag: String,
}

/// A remote Zotero library.
///
/// Starts unconnected: metadata accessors return `None` until [`connect`]
/// succeeds. Remote calls made before connecting are permitted and simply
/// carry the constructed credentials.
///
/// [`connect`]: Library::connect
pub struct Library {
    context: ApiContext,
    library_id: String,
    library_type: LibraryType,
    data: Option<LibraryData>,
}

impl Library {
    /// Create a library gateway backed by the default reqwest transport.
    ///
    /// Fails when the API key or library id is empty or whitespace.
    pub fn new(api_key: &str, library_id: &str, library_type: LibraryType) -> Result<Self, Error> {
        Self::with_transport(
            api_key,
            library_id,
            library_type,
            Arc::new(HttpClient::default()),
        )
    }

    /// Create a library gateway with an injected transport (test doubles,
    /// custom TLS setups).
    pub fn with_transport(
        api_key: &str,
        library_id: &str,
        library_type: LibraryType,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::validation("API key is required"));
        }
        if library_id.trim().is_empty() {
            return Err(Error::validation("Library ID is required"));
        }

        let base_url = format!("{}/{}/{}", BASE_URL, library_type.as_str(), library_id);
        Ok(Self {
            context: ApiContext {
                transport,
                api_key: api_key.to_string(),
                base_url,
            },
            library_id: library_id.to_string(),
            library_type,
            data: None,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.context.api_key
    }

    pub fn library_id(&self) -> &str {
        &self.library_id
    }

    pub fn library_type(&self) -> LibraryType {
        self.library_type
    }

    /// Server-assigned numeric id; `None` before a successful connect.
    pub fn id(&self) -> Option<i64> {
        self.data.as_ref().map(|d| d.id)
    }

    /// Library display name; `None` before a successful connect.
    pub fn name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.name.as_str())
    }

    /// Full metadata record; `None` before a successful connect.
    pub fn data(&self) -> Option<&LibraryData> {
        self.data.as_ref()
    }

    /// Fetch the library root resource and populate metadata.
    ///
    /// A non-2xx answer fails with [`Error::Remote`]; a transport or
    /// body-parse failure fails with [`Error::Connection`], which carries the
    /// credentials for diagnostics.
    pub async fn connect(&mut self) -> Result<(), Error> {
        let response = match self
            .context
            .request(HttpMethod::Get, "", None, &[], "connect to Zotero API")
            .await
        {
            Ok(response) => response,
            Err(Error::Http(source)) => return Err(self.connection_error(source)),
            Err(other) => return Err(other),
        };

        let data: LibraryData = serde_json::from_str(&response.body).map_err(|e| {
            self.connection_error(HttpError::ParseError {
                message: e.to_string(),
            })
        })?;

        self.data = Some(data);
        Ok(())
    }

    fn connection_error(&self, source: HttpError) -> Error {
        Error::Connection {
            api_key: self.context.api_key.clone(),
            library_id: self.library_id.clone(),
            library_type: self.library_type.as_str(),
            source,
        }
    }

    /// Fetch all collections in the library.
    pub async fn get_collections(&self) -> Result<Vec<Collection>, Error> {
        let response = self
            .context
            .request(
                HttpMethod::Get,
                "/collections",
                None,
                &[],
                "fetch collections",
            )
            .await?;

        let data: Vec<CollectionData> = decode(&response)?;
        Ok(data
            .into_iter()
            .map(|d| Collection::new(d, self.context.clone()))
            .collect())
    }

    /// Fetch all items in the library.
    pub async fn get_all_items(&self) -> Result<Vec<Item>, Error> {
        let response = self
            .context
            .request(HttpMethod::Get, "/items", None, &[], "fetch items")
            .await?;

        let envelopes: Vec<ItemEnvelope> = decode(&response)?;
        Ok(envelopes
            .into_iter()
            .map(|envelope| Item::new(envelope.data, self.context.clone()))
            .collect())
    }

    /// Fetch all tag names used in the library.
    pub async fn get_tags(&self) -> Result<Vec<String>, Error> {
        let response = self
            .context
            .request(HttpMethod::Get, "/tags", None, &[], "fetch tags")
            .await?;

        let names: Vec<TagName> = decode(&response)?;
        Ok(names.into_iter().map(|n| n.tag).collect())
    }

    /// Create a collection. The name is trimmed and must not be blank.
    pub async fn create_collection(
        &self,
        name: &str,
        parent_collection: Option<&str>,
    ) -> Result<Collection, Error> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Collection name is required"));
        }

        let mut record = Map::new();
        record.insert("name".to_string(), Value::String(trimmed.to_string()));
        if let Some(parent) = parent_collection {
            record.insert(
                "parentCollection".to_string(),
                Value::String(parent.to_string()),
            );
        }
        let body = encode(&Value::Array(vec![Value::Object(record)]))?;

        let response = self
            .context
            .request(
                HttpMethod::Post,
                "/collections",
                Some(body),
                &[],
                "create collection",
            )
            .await?;

        // The API answers collection creation with a plain array.
        let created: Vec<CollectionData> =
            serde_json::from_str(&response.body).map_err(|_| Error::MalformedResponse)?;
        let first = created.into_iter().next().ok_or(Error::MalformedResponse)?;
        Ok(Collection::new(first, self.context.clone()))
    }

    /// Create an item from a JSON field map.
    ///
    /// A `title` that is absent or trims empty fails before any request is
    /// made. Fields outside the known whitelist are dropped and reported in
    /// a single warning; `itemType` defaults to `"webpage"`.
    pub async fn create_item(&self, fields: &Map<String, Value>) -> Result<Item, Error> {
        if !has_title(fields) {
            return Err(Error::validation(
                "A title is required to create a Zotero item",
            ));
        }

        let (mut valid, unknown) = partition_item_fields(fields);
        if !unknown.is_empty() {
            tracing::warn!(fields = %unknown.join(", "), "unknown item fields ignored");
        }

        if !valid.contains_key("itemType") {
            valid.insert(
                "itemType".to_string(),
                Value::String("webpage".to_string()),
            );
        }

        let mut submission = Map::new();
        submission.insert("data".to_string(), Value::Object(valid));
        let body = encode(&Value::Array(vec![Value::Object(submission)]))?;

        let response = self
            .context
            .request(HttpMethod::Post, "/items", Some(body), &[], "create item")
            .await?;

        let created = parse_created_item(&response.body)?;
        Ok(Item::new(created, self.context.clone()))
    }
}

/// Split caller-supplied fields into the API's known item fields and the
/// names of everything else, preserving caller order.
pub fn partition_item_fields(fields: &Map<String, Value>) -> (Map<String, Value>, Vec<String>) {
    let mut valid = Map::new();
    let mut unknown = Vec::new();
    for (key, value) in fields {
        if ZOTERO_FIELDS.contains(&key.as_str()) {
            valid.insert(key.clone(), value.clone());
        } else {
            unknown.push(key.clone());
        }
    }
    (valid, unknown)
}

fn has_title(fields: &Map<String, Value>) -> bool {
    match fields.get("title") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

#[derive(Debug, Deserialize)]
struct CreatedEntry {
    data: ItemData,
}

/// The two creation-response shapes the API is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateItemResponse {
    Batch(Vec<CreatedEntry>),
    Keyed {
        successful: BTreeMap<String, CreatedEntry>,
    },
}

/// Normalize a creation response into the created item's data.
///
/// Accepts either a plain array of `{data}` envelopes (element 0) or an
/// object with a `successful` map keyed by submission index (lowest key).
/// Anything else fails as malformed.
fn parse_created_item(body: &str) -> Result<ItemData, Error> {
    let response: CreateItemResponse =
        serde_json::from_str(body).map_err(|_| Error::MalformedResponse)?;

    let entry = match response {
        CreateItemResponse::Batch(entries) => entries.into_iter().next(),
        CreateItemResponse::Keyed { successful } => {
            successful.into_iter().next().map(|(_, entry)| entry)
        }
    };

    entry.map(|e| e.data).ok_or(Error::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn library_type_path_segments() {
        assert_eq!(LibraryType::Users.as_str(), "users");
        assert_eq!(LibraryType::Groups.to_string(), "groups");
    }

    #[test]
    fn partition_keeps_known_fields() {
        let input = fields(json!({
            "title": "Report",
            "itemType": "book",
            "DOI": "10.1234/x",
        }));
        let (valid, unknown) = partition_item_fields(&input);
        assert_eq!(valid.len(), 3);
        assert!(unknown.is_empty());
    }

    #[test]
    fn partition_drops_unknown_fields_in_caller_order() {
        let input = fields(json!({
            "zzz": 1,
            "title": "Report",
            "aaa": 2,
            "unknownField": "x",
        }));
        let (valid, unknown) = partition_item_fields(&input);
        assert_eq!(valid.len(), 1);
        assert!(valid.contains_key("title"));
        assert_eq!(unknown, vec!["zzz", "aaa", "unknownField"]);
    }

    #[test]
    fn has_title_requires_non_blank_string() {
        assert!(!has_title(&fields(json!({}))));
        assert!(!has_title(&fields(json!({"title": null}))));
        assert!(!has_title(&fields(json!({"title": "   "}))));
        assert!(has_title(&fields(json!({"title": "Report"}))));
        // Non-string titles stringify to something non-empty.
        assert!(has_title(&fields(json!({"title": 42}))));
    }

    #[test]
    fn parse_created_item_batch_shape() {
        let body = r#"[{"data":{"key":"NEW1","version":1,"title":"Report","itemType":"webpage"}}]"#;
        let data = parse_created_item(body).unwrap();
        assert_eq!(data.key, "NEW1");
        assert_eq!(data.title, "Report");
    }

    #[test]
    fn parse_created_item_successful_map_shape() {
        let body = r#"{"successful":{"0":{"data":{"key":"NEW2","title":"Report"}}}}"#;
        let data = parse_created_item(body).unwrap();
        assert_eq!(data.key, "NEW2");
    }

    #[test]
    fn parse_created_item_takes_lowest_key() {
        let body = r#"{"successful":{
            "1":{"data":{"key":"SECOND"}},
            "0":{"data":{"key":"FIRST"}}
        }}"#;
        let data = parse_created_item(body).unwrap();
        assert_eq!(data.key, "FIRST");
    }

    #[test]
    fn parse_created_item_rejects_unrecognized_shapes() {
        assert!(matches!(
            parse_created_item(r#"{"unexpected":"x"}"#),
            Err(Error::MalformedResponse)
        ));
        assert!(matches!(
            parse_created_item("[]"),
            Err(Error::MalformedResponse)
        ));
        assert!(matches!(
            parse_created_item("not json"),
            Err(Error::MalformedResponse)
        ));
        assert!(matches!(
            parse_created_item(r#"{"successful":{}}"#),
            Err(Error::MalformedResponse)
        ));
    }
}
