use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::target::DEFAULT_TARGET;

/// Runtime settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "waterwatch")]
#[command(about = "Sensor ingestion relay and analysis dispatcher for a polling ML worker")]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "WATERWATCH_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// SQLite database file holding readings and predictions.
    #[arg(long, env = "WATERWATCH_DB", default_value = "water_system.db")]
    pub db: PathBuf,

    /// Prediction target active until a client picks another one.
    #[arg(long, env = "WATERWATCH_DEFAULT_TARGET", default_value = DEFAULT_TARGET)]
    pub default_target: String,

    /// Fallback log filter when RUST_LOG is unset.
    #[arg(long, env = "WATERWATCH_LOG", default_value = "info")]
    pub log_level: String,

    /// Tokio worker threads; defaults to the number of CPUs.
    #[arg(long, env = "WATERWATCH_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_target.trim().is_empty() {
            bail!("default target must not be empty");
        }
        if self.worker_threads == Some(0) {
            bail!("worker threads must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_deployment() {
        let config = ServerConfig::try_parse_from(["waterwatch"]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.db, PathBuf::from("water_system.db"));
        assert_eq!(config.default_target, "NH4_1209");
        assert_eq!(config.worker_threads, None);
        config.validate().unwrap();
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "waterwatch",
            "--bind",
            "0.0.0.0:9000",
            "--default-target",
            "COD_1300",
            "--worker-threads",
            "2",
        ])
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.default_target, "COD_1300");
        assert_eq!(config.worker_threads, Some(2));
    }

    #[test]
    fn blank_default_target_is_rejected() {
        let config =
            ServerConfig::try_parse_from(["waterwatch", "--default-target", " "]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_worker_threads_is_rejected() {
        let config =
            ServerConfig::try_parse_from(["waterwatch", "--worker-threads", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
