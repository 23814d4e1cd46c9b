//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

/// Default destination host.
pub const DEFAULT_ELASTIC_HOST: &str = "http://localhost:9200";

/// Default configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Index the annotations of an AnnoRepo container into a search index.
#[derive(Debug, Clone, Parser)]
#[command(name = "annotation-indexer", version, about, long_about = None)]
pub struct Cli {
    /// AnnoRepo server URL
    #[arg(long, env = "ANNOREPO_HOST")]
    pub annorepo_host: String,

    /// AnnoRepo container to index
    #[arg(long, env = "ANNOREPO_CONTAINER")]
    pub annorepo_container: String,

    /// Elasticsearch / OpenSearch URL
    #[arg(long, env = "ELASTIC_HOST", default_value = DEFAULT_ELASTIC_HOST)]
    pub elastic_host: String,

    /// Destination index, recreated on every run
    #[arg(long, env = "ELASTIC_INDEX")]
    pub elastic_index: String,

    /// Indexer configuration (YAML)
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Index settings and mappings (JSON); the built-in mapping when absent
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Log everything, including full queries and records
    #[arg(long)]
    pub trace: bool,

    /// Log progress while indexing
    #[arg(long)]
    pub progress: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.trace {
            "trace"
        } else if self.progress {
            "info"
        } else {
            "warn"
        }
    }
}
