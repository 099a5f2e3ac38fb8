//
//  samplify
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use samplify::cli::{exit_code_for, Cli, Commands};
use samplify::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging from `SAMPLIFY_DEBUG` (an `EnvFilter` directive, default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_env("SAMPLIFY_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::LineItem(cmd) => cmd.run(&cli.global).await,
        Commands::Countries(cmd) => cmd.run(&cli.global).await,
        Commands::Attributes(cmd) => cmd.run(&cli.global).await,
        Commands::Topics(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("samplify version {}", samplify::VERSION);
            Ok(())
        }
    }
}
