//! OpenAPI from Routes - Command-line tool for generating OpenAPI documentation.
//!
//! This binary provides a command-line interface for generating an OpenAPI 3.1
//! document from a web framework's serialized route table. It reads the route table
//! JSON, assembles the document, and writes it as YAML or JSON.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-routes [OPTIONS] <ROUTE_TABLE>
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation:
//! ```bash
//! openapi-from-routes ./routes.json -o openapi.yaml
//! ```
//!
//! Generate JSON documentation:
//! ```bash
//! openapi-from-routes ./routes.json -f json -o openapi.json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-from-routes ./routes.json -v
//! ```

mod cli;
mod error;
mod openapi_builder;
mod route;
mod schema;
mod serializer;
mod translator;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI from Routes starting...");

    // Now do the full parse with validation
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
