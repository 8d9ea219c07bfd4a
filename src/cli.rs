use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI from Routes - Generate OpenAPI 3.1 documentation from a registered route table
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route table JSON file
    #[arg(value_name = "ROUTE_TABLE")]
    pub route_table_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// API title for the info section
    #[arg(long = "title")]
    pub title: Option<String>,

    /// API version for the info section
    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    /// API description for the info section
    #[arg(long = "description")]
    pub description: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    // Validate route table path exists
    if !args.route_table_path.exists() {
        anyhow::bail!(
            "Route table file does not exist: {}",
            args.route_table_path.display()
        );
    }

    // Validate route table path is a file
    if !args.route_table_path.is_file() {
        anyhow::bail!(
            "Route table path is not a file: {}",
            args.route_table_path.display()
        );
    }

    info!("Route table: {}", args.route_table_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::openapi_builder::OpenApiBuilder;
    use crate::route::RouteTable;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Load the route table
    info!("Loading route table...");
    let table = RouteTable::from_file(&args.route_table_path)?;
    info!("Loaded {} routes", table.routes.len());

    if table.routes.is_empty() {
        log::warn!("Route table contains no routes");
    }

    // Step 2: Build the OpenAPI document
    info!("Building OpenAPI document...");
    let mut builder = OpenApiBuilder::new().with_info(
        args.title.clone().unwrap_or_else(|| "Generated API".to_string()),
        args.api_version.clone().unwrap_or_else(|| "1.0.0".to_string()),
        Some(args.description.clone().unwrap_or_else(|| {
            "API documentation generated from the registered route table".to_string()
        })),
    );

    for route in &table.routes {
        debug!("Adding route: {} {}", route.method.as_str(), route.path);
        builder.add_route(route);
    }

    let document = builder.build();
    info!("OpenAPI document built successfully");

    // Step 3: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    // Step 4: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!(
            "Successfully wrote OpenAPI document to {}",
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    // Step 5: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Routes documented: {}", table.routes.len());
    info!("  - Paths in document: {}", document.paths.len());

    Ok(())
}
