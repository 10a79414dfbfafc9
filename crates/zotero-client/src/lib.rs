//! zotero-client: typed client for the Zotero Web API.
//!
//! Models a remote Zotero library with its collections, items, creators, and
//! tags as local objects. Each wrapper owns a private copy of its wire record,
//! validates edits locally (trimmed, non-empty required fields), and syncs
//! itself over REST with optimistic-concurrency preconditions.
//!
//! The HTTP layer sits behind the [`http::Transport`] trait so tests can
//! inject a recording double; [`http::HttpClient`] is the reqwest-backed
//! implementation used by [`Library::new`].

mod api;
pub mod collection;
pub mod creator;
pub mod error;
pub mod http;
pub mod item;
pub mod library;
pub mod tag;

pub use collection::{Collection, CollectionData};
pub use creator::{Creator, CreatorData};
pub use error::Error;
pub use http::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use item::{Item, ItemData};
pub use library::{Library, LibraryData, LibraryType};
pub use tag::{Tag, TagData};
