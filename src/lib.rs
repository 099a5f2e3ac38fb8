//
//  samplify
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Samplify
//!
//! A typed client for the Samplify survey-sampling API, plus the `samplify`
//! command-line tool built on it.
//!
//! ## Features
//!
//! - **Projects and line items**: create, update, buy, launch, pause and close
//! - **Reference data**: countries, targeting attributes and survey topics
//! - **Automatic authentication**: the client-credentials token is fetched on
//!   first use and refreshed when it expires, once per client even under
//!   concurrent calls
//! - **Deterministic queries**: filter and sort criteria render to the same
//!   query string every time, in caller order
//! - **Typed errors**: authentication, API and transport failures are
//!   distinguishable without string matching
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use samplify::api::projects::ProjectState;
//! use samplify::api::query::{QueryField, QueryOptions, SortDirection};
//! use samplify::{ClientOptions, Credentials, SamplifyClient};
//!
//! # async fn example() -> Result<(), samplify::SamplifyError> {
//! let client = SamplifyClient::new(
//!     Credentials::new("client-id", "client-secret"),
//!     ClientOptions::default(),
//! )?;
//!
//! let options = QueryOptions::new()
//!     .filter(QueryField::State, ProjectState::Provisioned)
//!     .sort(QueryField::CreatedAt, SortDirection::Asc);
//!
//! for project in client.get_all_projects(Some(&options)).await?.data {
//!     println!("{}: {}", project.ext_project_id, project.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Client, endpoints, DTOs and errors
//! - [`auth`]: Credentials, access tokens and the token manager
//! - [`config`]: Client options and the CLI config file
//! - [`cli`]: Command definitions for the `samplify` binary
//! - [`output`]: Table and JSON rendering for the CLI

/// Command-line interface definitions.
pub mod cli;

/// Typed access to the Samplify API.
///
/// Holds the client and its request pipeline, the query builder, the
/// per-resource methods and DTOs, and the shared error type.
pub mod api;

/// Client credentials, access tokens and token refresh.
pub mod auth;

/// Client options and the CLI configuration file.
///
/// The CLI's file lives in platform-specific locations:
/// - Linux: `~/.config/samplify/config.toml`
/// - macOS: `~/Library/Application Support/samplify/config.toml`
/// - Windows: `%APPDATA%\samplify\config.toml`
pub mod config;

/// Output formatting for the CLI (tables and JSON).
pub mod output;

pub use api::common::{ErrorKind, SamplifyError};
pub use api::query::QueryOptions;
pub use api::SamplifyClient;
pub use auth::{AccessToken, Credentials};
pub use config::{ClientOptions, Config, Environment};

/// Application name, used for the binary, the config directory and the
/// keyring service.
pub const APP_NAME: &str = "samplify";

/// Crate version, from Cargo.toml.
///
/// # Example
///
/// ```rust
/// use samplify::VERSION;
///
/// println!("samplify version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error occurred. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// The command was invoked with invalid arguments or options.
    pub const USAGE: i32 = 2;

    /// No credentials are configured, or the auth endpoint rejected them.
    ///
    /// Run `samplify auth login` to store credentials.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested project or line item does not exist.
    pub const NOT_FOUND: i32 = 8;
}
