//! Collection aggregate: a named, optionally nested grouping of items.

use crate::api::{decode, encode, ApiContext};
use crate::error::Error;
use crate::http::HttpMethod;
use crate::item::{Item, ItemEnvelope};
use serde::{Deserialize, Serialize};

/// Wire representation of a collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionData {
    pub key: String,
    pub version: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<serde_json::Value>,
}

/// A named grouping of items that syncs itself to the API.
pub struct Collection {
    data: CollectionData,
    context: ApiContext,
}

impl Collection {
    pub(crate) fn new(data: CollectionData, context: ApiContext) -> Self {
        Self { data, context }
    }

    pub fn key(&self) -> &str {
        &self.data.key
    }

    pub fn version(&self) -> i64 {
        self.data.version
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn parent_collection(&self) -> Option<&str> {
        self.data.parent_collection.as_deref()
    }

    /// Rename the collection, trimmed. Fails when the trimmed value is
    /// empty; the prior name is left unchanged on failure.
    pub fn set_name(&mut self, value: &str) -> Result<(), Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Collection name cannot be empty"));
        }
        self.data.name = trimmed.to_string();
        Ok(())
    }

    pub fn set_parent_collection(&mut self, value: Option<&str>) {
        self.data.parent_collection = value.map(str::to_string);
    }

    /// Fetch the items belonging to this collection.
    pub async fn get_items(&self) -> Result<Vec<Item>, Error> {
        let response = self
            .context
            .request(
                HttpMethod::Get,
                &format!("/collections/{}/items", self.data.key),
                None,
                &[],
                &format!("fetch items for collection {}", self.data.key),
            )
            .await?;

        let envelopes: Vec<ItemEnvelope> = decode(&response)?;
        Ok(envelopes
            .into_iter()
            .map(|envelope| Item::new(envelope.data, self.context.clone()))
            .collect())
    }

    /// Send the full current record as a PUT to the API.
    pub async fn update(&self) -> Result<(), Error> {
        let body = encode(&self.data)?;
        self.context
            .request(
                HttpMethod::Put,
                &format!("/collections/{}", self.data.key),
                Some(body),
                &[],
                &format!("update collection {}", self.data.key),
            )
            .await?;
        Ok(())
    }

    /// Delete the collection unconditionally (no version precondition).
    pub async fn delete(&self) -> Result<(), Error> {
        self.context
            .request(
                HttpMethod::Delete,
                &format!("/collections/{}", self.data.key),
                None,
                &[],
                &format!("delete collection {}", self.data.key),
            )
            .await?;
        Ok(())
    }

    /// Add this collection to the item's membership and push the item.
    ///
    /// Idempotent: when the item already belongs to this collection, nothing
    /// is mutated and no request is made. This is the one place that writes
    /// into an item's live membership list instead of going through the
    /// defensive-copy accessor.
    pub async fn attach_to_item(&self, item: &mut Item) -> Result<(), Error> {
        if item.collections().iter().any(|key| key == &self.data.key) {
            return Ok(());
        }
        item.push_collection(self.data.key.clone());
        item.update().await
    }

    /// Copy of the underlying data, independent of this collection.
    pub fn to_data(&self) -> CollectionData {
        self.data.clone()
    }
}
