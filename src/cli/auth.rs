//
//  samplify
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `auth login` checks the credentials against the token endpoint before
//! anything is saved: the client ID goes to the config file, the secret to
//! the system keyring.

use std::io::{BufRead, IsTerminal};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dialoguer::Password;

use crate::api::SamplifyClient;
use crate::auth::{mask, Credentials, KeyringStore};
use crate::config::{Config, Environment};
use crate::output::print_field;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Verify and store client credentials
    Login(LoginArgs),

    /// Remove stored credentials
    Logout,

    /// Show the configured account and, optionally, verify it
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Environment to log in to (uat or production)
    #[arg(long, short = 'e')]
    pub environment: Option<Environment>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Request a token to check the credentials are accepted
    #[arg(long)]
    pub verify: bool,

    /// Print the access token (masked) after verifying
    #[arg(long, short = 't', requires = "verify")]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let writer = global.writer();
    let mut config = Config::load()?;
    if let Some(environment) = args.environment {
        config.client.environment = environment;
    }

    let client_id = global
        .client_id
        .clone()
        .or_else(|| config.client.client_id.clone())
        .ok_or(super::CliError::MissingClientId)?;

    let secret = match &global.client_secret {
        Some(secret) => secret.clone(),
        None => read_secret(&client_id)?,
    };

    let options = global.client_options(&config);
    let client = SamplifyClient::new(Credentials::new(client_id.clone(), secret.clone()), options)?;

    eprintln!("Verifying credentials against {}...", client.options().auth_url);
    let token = client.authenticate().await?;
    tracing::debug!("Login verified; token expires at {:?}", token.expires_at());

    KeyringStore::new().store(&client_id, &secret)?;
    config.client.client_id = Some(client_id.clone());
    config.save()?;

    writer.write_success(&format!(
        "Logged in to {} as {}",
        config.client.environment, client_id
    ));
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let writer = global.writer();
    let mut config = Config::load()?;

    let Some(client_id) = global.client_id.clone().or_else(|| config.client.client_id.clone()) else {
        writer.write_warning("Not logged in");
        return Ok(());
    };

    KeyringStore::new().delete(&client_id)?;
    if config.client.client_id.as_deref() == Some(client_id.as_str()) {
        config.client.client_id = None;
        config.save()?;
    }

    writer.write_success(&format!("Logged out {}", client_id));
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let color = global.writer().color_enabled();
    let options = global.client_options(&config);

    let client_id = global.client_id.clone().or_else(|| config.client.client_id.clone());
    let Some(client_id) = client_id else {
        println!("Not logged in");
        println!();
        println!("Run 'samplify auth login' to store credentials");
        return Ok(());
    };

    let secret_source = if global.client_secret.is_some() {
        "flag or environment"
    } else {
        let (source, warning) = keyring_secret_source(KeyringStore::new().get(&client_id));
        if let Some(warning) = warning {
            global.writer().write_warning(&warning);
        }
        source
    };

    print_field("Client ID", &client_id, color);
    print_field("Secret", secret_source, color);
    print_field("Environment", config.client.environment.as_str(), color);
    print_field("API URL", &options.api_base_url, color);
    print_field("Auth URL", &options.auth_url, color);

    if args.verify {
        let client = global.client()?;
        let token = client.authenticate().await?;
        print_field("Status", "Active", color);
        print_field("Verified as", client.credentials().client_id(), color);
        print_field("User agent", client.credentials().user_agent(), color);
        let expires = token
            .expires_at()
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        print_field("Token expires", &expires, color);
        if args.show_token {
            print_field("Token", &mask(&token.access_token), color);
        }
    }

    Ok(())
}

/// Describes a keyring lookup, plus a warning when the backend failed.
fn keyring_secret_source(lookup: Result<Option<String>>) -> (&'static str, Option<String>) {
    match lookup {
        Ok(Some(_)) => ("keyring", None),
        Ok(None) => ("missing", None),
        Err(e) => ("unavailable", Some(format!("Could not read keyring: {:#}", e))),
    }
}

/// Prompts without echo on a terminal; reads one line when stdin is piped.
fn read_secret(client_id: &str) -> Result<String> {
    if std::io::stdin().is_terminal() {
        let secret = Password::new()
            .with_prompt(format!("Client secret for {}", client_id))
            .interact()
            .context("Failed to read client secret")?;
        return Ok(secret.trim().to_string());
    }
    read_secret_from_stdin()
}

fn read_secret_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read client secret from stdin")?;
    let secret = line.trim().to_string();
    if secret.is_empty() {
        anyhow::bail!("Client secret must not be empty");
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyring_source_reports_backend_errors() {
        let (source, warning) = keyring_secret_source(Err(anyhow::anyhow!("no secret service")));
        assert_eq!(source, "unavailable");
        assert!(warning.unwrap().contains("no secret service"));
    }

    #[test]
    fn test_keyring_source_found_and_missing() {
        assert_eq!(keyring_secret_source(Ok(Some("s".to_string()))), ("keyring", None));
        assert_eq!(keyring_secret_source(Ok(None)), ("missing", None));
    }
}
