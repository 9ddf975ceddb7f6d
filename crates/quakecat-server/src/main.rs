//! QuakeCat Server - Main entry point

use anyhow::Result;
use quakecat_common::logging::{init_logging, LogConfig};
use quakecat_ingest::IngestionPipeline;
use tracing::info;

use quakecat_server::{api, config::Config, CsvLoader, QueryFacade};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("quakecat-server")
        .filter_directives("quakecat_server=debug,quakecat_ingest=info,tower_http=debug")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting QuakeCat Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pipeline = IngestionPipeline::new().with_id_scheme(config.catalogue.id_scheme);
    let facade = QueryFacade::new(CsvLoader::new(&config.catalogue.source_path, pipeline));

    if config.catalogue.preload {
        let records = facade.preload().await?;
        info!(records, "Catalogue preloaded");
    } else {
        info!(
            source = %config.catalogue.source_path.display(),
            "Catalogue will load on first request"
        );
    }

    api::serve(facade, config).await
}
