//
//  samplify
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod config;
mod line_item;
mod project;
mod reference;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use line_item::LineItemCommand;
pub use project::ProjectCommand;
pub use reference::{AttributesCommand, CountriesCommand, TopicsCommand};

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::query::{Filter, QueryOptions, Sort};
use crate::api::{ErrorKind, SamplifyClient, SamplifyError};
use crate::auth::{Credentials, KeyringStore};
use crate::config::{ClientOptions, Config};
use crate::exit_codes;
use crate::output::OutputWriter;

/// Samplify CLI - manage survey sample projects from the command line
#[derive(Parser, Debug)]
#[command(
    name = "samplify",
    version,
    about = "Work with the Samplify sample API from the command line",
    long_about = "samplify creates, buys and monitors survey sample projects and line items,\n\
                  and looks up the countries, attributes and topics you can target.",
    propagate_version = true,
    after_help = "Use 'samplify <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
///
/// Flags win over environment variables, which win over the config file.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Client ID (overrides the config file)
    #[arg(long, global = true, env = "SAMPLIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Client secret (overrides the keyring)
    #[arg(long, global = true, env = "SAMPLIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// API base URL (overrides the configured environment)
    #[arg(long, global = true, env = "SAMPLIFY_API_URL")]
    pub api_url: Option<String>,

    /// Token endpoint URL (overrides the configured environment)
    #[arg(long, global = true, env = "SAMPLIFY_AUTH_URL")]
    pub auth_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored client credentials
    Auth(AuthCommand),

    /// Create, buy and inspect projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage the line items of a project
    #[command(name = "line-item", visible_alias = "li")]
    LineItem(LineItemCommand),

    /// List supported countries
    Countries(CountriesCommand),

    /// List targeting attributes for a country and language
    Attributes(AttributesCommand),

    /// List survey topics
    Topics(TopicsCommand),

    /// Read and write CLI settings
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}

/// Errors raised by the CLI itself rather than by the API.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("No client ID configured. Run 'samplify auth login --client-id <ID>' or set SAMPLIFY_CLIENT_ID")]
    MissingClientId,

    #[error("No client secret found for '{0}'. Run 'samplify auth login' or set SAMPLIFY_CLIENT_SECRET")]
    MissingClientSecret(String),
}

/// Repeatable `--filter` and `--sort` flags for list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter as FIELD=VALUE (repeatable, applied in order)
    #[arg(long = "filter", short = 'f', value_name = "FIELD=VALUE")]
    pub filters: Vec<Filter>,

    /// Sort as FIELD[:asc|desc] (repeatable, applied in order)
    #[arg(long = "sort", short = 's', value_name = "FIELD[:DIR]")]
    pub sorts: Vec<Sort>,
}

impl QueryArgs {
    /// Returns the query options, or `None` when no flag was given.
    pub fn to_options(&self) -> Option<QueryOptions> {
        let options = QueryOptions {
            filter_by: self.filters.clone(),
            sort_by: self.sorts.clone(),
        };
        (!options.is_empty()).then_some(options)
    }
}

impl GlobalOptions {
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }

    /// Resolves client options from the config file and URL overrides.
    pub fn client_options(&self, config: &Config) -> ClientOptions {
        let mut options = config.client_options();
        if let Some(url) = &self.api_url {
            options = options.with_api_base_url(url.clone());
        }
        if let Some(url) = &self.auth_url {
            options = options.with_auth_url(url.clone());
        }
        options
    }

    /// Resolves the client ID and secret.
    ///
    /// The ID comes from `--client-id` or the config file; the secret from
    /// `--client-secret` or the keyring entry for that ID.
    pub fn credentials(&self, config: &Config) -> Result<Credentials> {
        let client_id = self
            .client_id
            .clone()
            .or_else(|| config.client.client_id.clone())
            .ok_or(CliError::MissingClientId)?;

        let secret = match &self.client_secret {
            Some(secret) => secret.clone(),
            None => KeyringStore::new()
                .get(&client_id)?
                .ok_or_else(|| CliError::MissingClientSecret(client_id.clone()))?,
        };

        Ok(Credentials::new(client_id, secret).with_user_agent(format!("samplify-cli/{}", crate::VERSION)))
    }

    /// Builds an API client from flags, environment, config file and keyring.
    pub fn client(&self) -> Result<SamplifyClient> {
        let config = Config::load()?;
        let credentials = self.credentials(&config)?;
        let options = self.client_options(&config);
        tracing::debug!("Using API at {}", options.api_base_url);
        Ok(SamplifyClient::new(credentials, options)?)
    }
}

/// Reads a JSON payload from a file, or from stdin when the path is `-`.
pub fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON payload in {}", path.display()))
}

/// `--file` argument shared by create and update commands.
#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// JSON file with the request body ('-' reads stdin)
    #[arg(long, short = 'F', value_name = "PATH")]
    pub file: PathBuf,
}

/// Maps an error to the process exit code.
///
/// | Error | Code |
/// |-------|------|
/// | missing credentials, auth rejected | [`exit_codes::AUTH_ERROR`] |
/// | API 404 | [`exit_codes::NOT_FOUND`] |
/// | anything else | [`exit_codes::ERROR`] |
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<CliError>().is_some() {
        return exit_codes::AUTH_ERROR;
    }
    match err.downcast_ref::<SamplifyError>() {
        Some(e) if e.kind() == ErrorKind::Authentication => exit_codes::AUTH_ERROR,
        Some(SamplifyError::Api(api)) if api.is_not_found() => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::query::{QueryField, SortDirection};

    #[test]
    fn test_query_args_keep_order() {
        let cli = Cli::try_parse_from([
            "samplify",
            "project",
            "list",
            "--filter",
            "state=LAUNCHED",
            "--filter",
            "title=Brand Tracker",
            "--sort",
            "createdAt:desc",
        ])
        .unwrap();

        let Commands::Project(cmd) = cli.command else {
            panic!("expected project command");
        };
        let options = cmd.query_args().and_then(QueryArgs::to_options).unwrap();
        assert_eq!(options.filter_by[0].field, QueryField::State);
        assert_eq!(options.filter_by[1].value, "Brand Tracker");
        assert_eq!(options.sort_by[0].direction, SortDirection::Desc);
        assert_eq!(options.render(), "state=LAUNCHED&title=Brand+Tracker&sort=createdAt:desc");
    }

    #[test]
    fn test_empty_query_args_render_nothing() {
        assert!(QueryArgs::default().to_options().is_none());
    }

    #[test]
    fn test_rejects_unknown_filter_field() {
        let result = Cli::try_parse_from(["samplify", "countries", "--filter", "colour=red"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_prefer_flags() {
        let mut config = Config::default();
        config.client.client_id = Some("from-config".to_string());
        let global = GlobalOptions {
            client_id: Some("from-flag".to_string()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        };

        let credentials = global.credentials(&config).unwrap();
        assert_eq!(credentials.client_id(), "from-flag");
        assert_eq!(credentials.client_secret(), "secret");
    }

    #[test]
    fn test_missing_client_id_maps_to_auth_exit_code() {
        let global = GlobalOptions::default();
        let err = global.credentials(&Config::default()).unwrap_err();
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_ERROR);
    }

    #[test]
    fn test_exit_codes_for_api_errors() {
        let not_found = anyhow::Error::from(SamplifyError::Api(ApiError {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: "project not found".to_string(),
            request_id: None,
            field_errors: Vec::new(),
        }));
        assert_eq!(exit_code_for(&not_found), exit_codes::NOT_FOUND);

        let rejected = anyhow::Error::from(SamplifyError::AuthRejected {
            status: 401,
            message: "bad credentials".to_string(),
        });
        assert_eq!(exit_code_for(&rejected), exit_codes::AUTH_ERROR);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(exit_code_for(&other), exit_codes::ERROR);
    }

    #[test]
    fn test_url_overrides_apply_on_top_of_config() {
        let global = GlobalOptions {
            api_url: Some("http://127.0.0.1:9/".to_string()),
            ..Default::default()
        };
        let options = global.client_options(&Config::default());
        assert_eq!(options.api_base_url, "http://127.0.0.1:9");
        assert_eq!(options.auth_url, crate::config::Environment::Uat.auth_url());
    }
}
