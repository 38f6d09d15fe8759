//! svc-catalog CLI - fetch and inspect a remote service catalog.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use svc_catalog_client::{
    load_catalog, resolve_resource_uri, resolve_service_uri, Catalog, HttpSession,
    ServiceDescriptor, Url,
};

mod config;

use config::Config;

/// svc-catalog CLI - service catalog inspection tool
#[derive(Parser)]
#[command(name = "svc-catalog")]
#[command(about = "Fetch and inspect a remote service catalog", long_about = None)]
struct Cli {
    /// Extra request header, as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", global = true)]
    headers: Vec<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// User-Agent to send
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show catalog metadata and a service summary
    Show {
        /// Catalog URI
        uri: Url,
    },

    /// List services with their resolved addresses
    Services {
        /// Catalog URI
        uri: Url,
    },

    /// Show one service and its resources
    Service {
        /// Catalog URI
        uri: Url,

        /// Service name
        name: String,
    },

    /// Print the parsed catalog as JSON
    Raw {
        /// Catalog URI
        uri: Url,
    },
}

impl Commands {
    fn uri(&self) -> &Url {
        match self {
            Self::Show { uri }
            | Self::Services { uri }
            | Self::Service { uri, .. }
            | Self::Raw { uri } => uri,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        headers: cli.headers,
        timeout_secs: cli.timeout,
        user_agent: cli.user_agent,
    };
    let session = HttpSession::new(&config.session_config()?)?;

    let uri = cli.command.uri().clone();
    let catalog = load_catalog(&uri, &session).await?;

    match cli.command {
        Commands::Show { .. } => show(&uri, &catalog),
        Commands::Services { .. } => list_services(&uri, &catalog),
        Commands::Service { name, .. } => show_service(&uri, &catalog, &name)?,
        Commands::Raw { .. } => println!("{}", serde_json::to_string_pretty(&catalog)?),
    }

    Ok(())
}

fn show(uri: &Url, catalog: &Catalog) {
    println!("Catalog:       {}", uri);
    println!("  Version:       {}", catalog.version().unwrap_or("-"));
    println!("  Last modified: {}", catalog.last_modified().unwrap_or("-"));
    println!("  Services:      {}", catalog.len());

    for service in catalog.services() {
        println!(
            "    - {} ({} resources)",
            service_name(service),
            service.resources.len()
        );
    }
}

fn list_services(uri: &Url, catalog: &Catalog) {
    println!("Services ({}):", catalog.len());
    println!("{:<24}  {:<10}  {}", "NAME", "RESOURCES", "ADDRESS");
    println!("{}", "-".repeat(80));

    for service in catalog.services() {
        let address = resolve_service_uri(uri, service)
            .map(|u| u.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24}  {:<10}  {}",
            service_name(service),
            service.resources.len(),
            address
        );
    }
}

fn show_service(
    uri: &Url,
    catalog: &Catalog,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = catalog
        .service(name)
        .ok_or_else(|| format!("service '{}' not found in catalog", name))?;
    let service_uri = resolve_service_uri(uri, service);

    println!("  Name:        {}", service_name(service));
    println!(
        "  Address:     {}",
        service_uri
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(use_request) = service.use_request {
        println!("  Use request: {}", use_request);
    }

    if !service.resources.is_empty() {
        println!("  Resources:");
        for resource in &service.resources {
            let location = service_uri
                .as_ref()
                .and_then(|u| resolve_resource_uri(u, resource))
                .map(|u| u.to_string())
                .unwrap_or_else(|| resource.path.clone().unwrap_or_default());
            println!(
                "    - {} {}",
                resource.name.as_deref().unwrap_or("<unnamed>"),
                location
            );
            for op in &resource.operations {
                println!(
                    "        {:<8} {:<12} {}",
                    op.verb.as_deref().unwrap_or("-").to_uppercase(),
                    op.kind.as_deref().unwrap_or("-"),
                    op.name.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn service_name(service: &ServiceDescriptor) -> &str {
    service.name.as_deref().unwrap_or("<unnamed>")
}
