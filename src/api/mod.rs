//
//  samplify
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Samplify sample API.
//!
//! ## Architecture
//!
//! - [`client`]: [`SamplifyClient`] and the authenticated request pipeline
//! - [`query`]: Filter/sort criteria and their query-string rendering
//! - [`projects`]: Project endpoints and DTOs
//! - [`line_items`]: Line item endpoints, quota plans and feasibility
//! - [`reference`]: Countries, attributes and survey topics
//! - [`common`]: Error taxonomy and the response envelope
//!
//! ## Usage
//!
//! ```rust,no_run
//! use samplify::api::query::{QueryField, QueryOptions};
//! use samplify::{ClientOptions, Credentials, SamplifyClient};
//!
//! # async fn example() -> Result<(), samplify::SamplifyError> {
//! let client = SamplifyClient::new(
//!     Credentials::new("client-id", "client-secret"),
//!     ClientOptions::default(),
//! )?;
//!
//! let options = QueryOptions::new().filter(QueryField::Title, "Samplify Client Test");
//! let projects = client.get_all_projects(Some(&options)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every method returns [`SamplifyError`]; branch on
//! [`SamplifyError::kind`] to tell authentication, API and transport
//! failures apart.

pub mod client;
pub mod common;
pub mod line_items;
pub mod projects;
pub mod query;
pub mod reference;

pub use client::SamplifyClient;
pub use common::{ApiError, ApiResponse, ErrorKind, SamplifyError};
