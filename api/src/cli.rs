use std::path::PathBuf;

use clap::Parser;
use common::config::Settings;

/// HTTP service listing the invocation timestamps of periodic tasks
#[derive(Debug, Parser)]
#[command(name = "ptask-api", version, about)]
pub struct Cli {
    /// Directory holding default.toml and local.toml
    #[arg(long, env = "PTASK_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(long)]
    pub port: Option<u16>,

    /// Log everything down to trace level
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Command line flags win over every configuration layer
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if self.debug {
            settings.observability.log_level = "trace".to_string();
        }
    }
}
