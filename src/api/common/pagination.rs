//
//  samplify
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination metadata for Samplify list responses.
//!
//! List endpoints attach a `meta` block to the response envelope:
//!
//! ```json
//! {
//!   "meta": {
//!     "links": { "self": "...", "first": "...", "next": "...", "last": "..." },
//!     "pageSize": 10,
//!     "total": 42
//!   }
//! }
//! ```
//!
//! Links are absolute URLs; `next` is absent on the last page.

use serde::{Deserialize, Serialize};

/// Paging metadata attached to list responses.
///
/// # Example
///
/// ```rust
/// use samplify::api::common::Meta;
///
/// let json = r#"{"links": {"self": "/projects", "next": "/projects?offset=10"}, "pageSize": 10, "total": 25}"#;
/// let meta: Meta = serde_json::from_str(json).unwrap();
///
/// assert!(meta.has_next());
/// assert_eq!(meta.next_url(), Some("/projects?offset=10"));
/// assert_eq!(meta.total, Some(25));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Navigation links for the collection.
    #[serde(default)]
    pub links: Option<Links>,

    /// Maximum number of items per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: Option<u32>,
}

impl Meta {
    /// Checks if there is another page after this one.
    pub fn has_next(&self) -> bool {
        self.next_url().is_some()
    }

    /// Returns the URL of the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(|links| links.next.as_deref())
    }
}

/// Collection navigation links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    /// URL of the current page.
    #[serde(default, rename = "self")]
    pub self_link: Option<String>,

    #[serde(default)]
    pub first: Option<String>,

    #[serde(default)]
    pub prev: Option<String>,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub last: Option<String>,
}
