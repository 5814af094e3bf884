//! Command-line entry points.

use crate::app::{build_service, openapi_document};
use crate::pets::PetRegistry;
use crate::runtime_config::{split_list, RuntimeConfig};
use crate::server::{HttpServer, ServerHandle};
use crate::telemetry::{init_logging, LogConfig, LogFormat};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pet-registry", version)]
#[command(about = "In-memory pet registry HTTP API", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the OpenAPI document and exit
    Openapi {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        servers: ServerArgs,
    },
}

/// Options that shape the advertised server list.
#[derive(Debug, Clone, Default, Args)]
pub struct ServerArgs {
    /// Port advertised as the local server (overrides `PORT`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Extra server URL for the OpenAPI document (repeatable or comma separated)
    #[arg(long = "public-server", value_delimiter = ',')]
    pub public_servers: Vec<String>,
}

impl ServerArgs {
    /// Layer these flags over `config`.
    pub fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        let extra: Vec<String> = self
            .public_servers
            .iter()
            .flat_map(|s| split_list(s))
            .collect();
        if !extra.is_empty() {
            config.public_servers = extra;
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub servers: ServerArgs,

    /// Bind address (overrides `PET_HOST`)
    #[arg(long)]
    pub host: Option<String>,

    /// Log level: trace/debug/info/warn/error
    #[arg(long, env = "PET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: json or pretty
    #[arg(long, env = "PET_LOG_FORMAT")]
    pub log_format: Option<String>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut RuntimeConfig, log: &mut LogConfig) {
        self.servers.apply(config);
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(level) = &self.log_level {
            log.log_level.clone_from(level);
        }
        if let Some(format) = &self.log_format {
            log.format = LogFormat::parse(format);
        }
    }
}

/// Parse the command line and run the selected command.
///
/// # Errors
///
/// Propagates startup failures (logging, bind, file output).
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            let mut config = RuntimeConfig::from_env();
            let mut log = LogConfig::from_env();
            args.apply(&mut config, &mut log);
            init_logging(&log)?;
            serve(&config)
        }
        Commands::Openapi { output, servers } => {
            let mut config = RuntimeConfig::from_env();
            servers.apply(&mut config);
            write_openapi(&config, output)
        }
    }
}

/// Start the server and block until SIGINT/SIGTERM.
///
/// # Errors
///
/// Fails if the service cannot be built or the address cannot be bound.
pub fn serve(config: &RuntimeConfig) -> Result<()> {
    may::config().set_stack_size(config.stack_size);

    let registry = Arc::new(PetRegistry::seeded());
    let service = build_service(config, registry)?;
    let bind_addr = config.bind_addr();
    let handle = HttpServer(service)
        .start(bind_addr.as_str())
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!("Server running on http://localhost:{}", config.port);
    info!("Swagger UI available at http://localhost:{}/api-docs", config.port);

    wait_for_shutdown(handle)
}

fn write_openapi(config: &RuntimeConfig, output: Option<PathBuf>) -> Result<()> {
    let json = openapi_document(config)
        .to_json_pretty()
        .context("Failed to serialize OpenAPI document")?;
    match output {
        Some(path) => fs::write(&path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal = signal, "Shutdown signal received");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("Server coroutine panicked: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["pet-registry"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from([
            "pet-registry",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--public-server",
            "https://a.example.com,https://b.example.com",
            "--log-format",
            "json",
        ])
        .unwrap();
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };

        let mut config = RuntimeConfig::default();
        let mut log = LogConfig::default();
        args.apply(&mut config, &mut log);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(
            config.public_servers,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(log.format, LogFormat::Json);
    }

    #[test]
    fn unset_flags_keep_config() {
        let mut config = RuntimeConfig {
            port: 9000,
            public_servers: vec!["https://keep.example.com".to_string()],
            ..RuntimeConfig::default()
        };
        ServerArgs::default().apply(&mut config);
        assert_eq!(config.port, 9000);
        assert_eq!(config.public_servers, vec!["https://keep.example.com"]);
    }

    #[test]
    fn openapi_writes_to_file() {
        let path = std::env::temp_dir()
            .join(format!("pet-registry-openapi-{}.json", std::process::id()));
        write_openapi(&RuntimeConfig::default(), Some(path.clone())).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(written["openapi"], "3.0.0");
        assert_eq!(written["info"]["title"], "Demo Pet API");
        assert!(written["paths"]["/pets/{id}"]["get"].is_object());
    }
}
