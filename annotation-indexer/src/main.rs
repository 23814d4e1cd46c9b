use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use annotation_indexer::logging::init_tracing;
use annotation_indexer::{Cli, Dependencies, IndexerConfig, IndexingError};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Indexing failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), IndexingError> {
    let config = IndexerConfig::load(&cli.config)?;
    let dependencies = Dependencies::new(cli, &config).await?;

    let summary = dependencies.orchestrator.run().await?;
    for (doc_type, written) in &summary.written {
        info!(doc_type = %doc_type, written, "Indexed documents");
    }
    info!(total = summary.total(), index = %cli.elastic_index, "Indexing complete");

    Ok(())
}
