//
//  samplify
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Query String Construction
//!
//! Converts structured filter and sort criteria into the canonical query
//! string understood by the Samplify list endpoints.
//!
//! ## Format
//!
//! | Input | Output |
//! |-------|--------|
//! | filters only | `title=Samplify+Client+Test&state=PROVISIONED` |
//! | sorts only | `sort=createdAt:asc,extProjectId:desc` |
//! | both | filters, then `&`, then the `sort=` block |
//! | nothing | empty string |
//!
//! Caller order is preserved exactly. Filter values are form-urlencoded
//! (space becomes `+`); field names come from [`QueryField`] and are emitted
//! verbatim, as are the `:` and `,` separators of the sort block.
//!
//! ## Example
//!
//! ```rust
//! use samplify::api::query::{QueryOptions, QueryField, SortDirection};
//! use samplify::api::projects::ProjectState;
//!
//! let options = QueryOptions::new()
//!     .filter(QueryField::Title, "Samplify Client Test")
//!     .filter(QueryField::State, ProjectState::Provisioned)
//!     .sort(QueryField::CreatedAt, SortDirection::Asc);
//!
//! assert_eq!(
//!     options.render(),
//!     "title=Samplify+Client+Test&state=PROVISIONED&sort=createdAt:asc"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Fields that list endpoints accept for filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryField {
    /// Project or line item identifier.
    #[serde(rename = "id")]
    Id,
    /// External project identifier.
    #[serde(rename = "extProjectId")]
    ExtProjectId,
    /// External line item identifier.
    #[serde(rename = "extLineItemId")]
    ExtLineItemId,
    /// Human readable title.
    #[serde(rename = "title")]
    Title,
    /// Lifecycle state.
    #[serde(rename = "state")]
    State,
    /// Reason attached to the current state.
    #[serde(rename = "stateReason")]
    StateReason,
    /// Invoice job number.
    #[serde(rename = "jobNumber")]
    JobNumber,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    CreatedAt,
    /// Last modification timestamp.
    #[serde(rename = "updatedAt")]
    UpdatedAt,
    /// Timestamp of the last state transition.
    #[serde(rename = "stateLastUpdatedAt")]
    StateLastUpdatedAt,
    /// Country ISO code (reference data).
    #[serde(rename = "isoCode")]
    IsoCode,
    /// Country or attribute name (reference data).
    #[serde(rename = "name")]
    Name,
}

impl QueryField {
    /// Every field, in declaration order.
    pub const ALL: [QueryField; 12] = [
        QueryField::Id,
        QueryField::ExtProjectId,
        QueryField::ExtLineItemId,
        QueryField::Title,
        QueryField::State,
        QueryField::StateReason,
        QueryField::JobNumber,
        QueryField::CreatedAt,
        QueryField::UpdatedAt,
        QueryField::StateLastUpdatedAt,
        QueryField::IsoCode,
        QueryField::Name,
    ];

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ExtProjectId => "extProjectId",
            Self::ExtLineItemId => "extLineItemId",
            Self::Title => "title",
            Self::State => "state",
            Self::StateReason => "stateReason",
            Self::JobNumber => "jobNumber",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::StateLastUpdatedAt => "stateLastUpdatedAt",
            Self::IsoCode => "isoCode",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown query field '{}'", s))
    }
}

/// Sort order for a [`Sort`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order, rendered as `asc`.
    #[default]
    Asc,
    /// Descending order, rendered as `desc`.
    Desc,
}

impl SortDirection {
    /// Returns the wire token for the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// A single `field=value` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: QueryField,
    pub value: String,
}

impl Filter {
    pub fn new(field: QueryField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Filters on `state`, e.g. `Filter::state(ProjectState::Launched)`.
    pub fn state(state: impl fmt::Display) -> Self {
        Self::new(QueryField::State, state.to_string())
    }
}

impl FromStr for Filter {
    type Err = String;

    /// Parses `field=value`, as accepted on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
        Ok(Self::new(field.trim().parse()?, value))
    }
}

/// A single `field:direction` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: QueryField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: QueryField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl FromStr for Sort {
    type Err = String;

    /// Parses `field:direction`; a bare `field` sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(Self::new(field.trim().parse()?, direction.trim().parse()?)),
            None => Ok(Self::new(s.trim().parse()?, SortDirection::Asc)),
        }
    }
}

/// Ordered filter and sort criteria for a list endpoint.
///
/// Both sequences keep insertion order; nothing is deduplicated or
/// re-sorted, so two renders of the same value are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub filter_by: Vec<Filter>,
    pub sort_by: Vec<Sort>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn filter(mut self, field: QueryField, value: impl fmt::Display) -> Self {
        self.filter_by.push(Filter::new(field, value.to_string()));
        self
    }

    /// Appends a sort entry.
    pub fn sort(mut self, field: QueryField, direction: SortDirection) -> Self {
        self.sort_by.push(Sort::new(field, direction));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filter_by.is_empty() && self.sort_by.is_empty()
    }

    /// Renders the options as a query string without the leading `?`.
    pub fn render(&self) -> String {
        let mut params: Vec<String> = self
            .filter_by
            .iter()
            .map(|filter| {
                let value: String = form_urlencoded::byte_serialize(filter.value.as_bytes()).collect();
                format!("{}={}", filter.field.as_str(), value)
            })
            .collect();

        if !self.sort_by.is_empty() {
            let sorts = self
                .sort_by
                .iter()
                .map(|sort| format!("{}:{}", sort.field.as_str(), sort.direction.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("sort={}", sorts));
        }

        params.join("&")
    }
}

/// Renders optional query options; `None` renders as the empty string.
pub fn render(options: Option<&QueryOptions>) -> String {
    options.map(QueryOptions::render).unwrap_or_default()
}
