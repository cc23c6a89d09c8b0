mod config;

use std::sync::Arc;

use clap::Parser;
use kiosk_core::Result;
use kiosk_inference::{GeminiGenerator, JinaEmbedder, RetrievalPipeline};
use kiosk_ingest::{HttpExtractor, IngestPipeline, NewsApiFeed};
use kiosk_storage::{QdrantIndex, RedisSessionStore};
use kiosk_web::{create_app, AppState};
use tracing::info;

use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "News RAG chat backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Port to listen on; overrides the PORT environment variable.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one ingestion pass and exit.
    Ingest {
        /// Topic to ingest; defaults to "technology".
        #[arg(long)]
        query: Option<String>,
    },
}

fn build_ingest_pipeline(config: &Config) -> Result<IngestPipeline> {
    Ok(IngestPipeline::new(
        Arc::new(NewsApiFeed::new(config.news_api_key.clone())),
        Arc::new(HttpExtractor::new()?),
        Arc::new(JinaEmbedder::new(config.jina_api_key.clone())?),
        Arc::new(QdrantIndex::new(
            &config.qdrant_url,
            config.qdrant_api_key.as_deref(),
        )?),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            let index = Arc::new(QdrantIndex::new(
                &config.qdrant_url,
                config.qdrant_api_key.as_deref(),
            )?);
            let embedder = Arc::new(JinaEmbedder::new(config.jina_api_key.clone())?);

            let ingest = IngestPipeline::new(
                Arc::new(NewsApiFeed::new(config.news_api_key.clone())),
                Arc::new(HttpExtractor::new()?),
                embedder.clone(),
                index.clone(),
            );
            let retrieval = RetrievalPipeline::new(
                embedder,
                index,
                Arc::new(GeminiGenerator::new(config.gemini_api_key.clone())?),
            );
            let sessions = Arc::new(RedisSessionStore::connect(&config.redis_url).await?);

            let app = create_app(AppState {
                ingest,
                retrieval,
                sessions,
            });

            let port = port.unwrap_or(config.port);
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            info!(port, "server running");
            axum::serve(listener, app)
                .await
                .map_err(kiosk_core::Error::Io)?;
        }
        Commands::Ingest { query } => {
            let pipeline = build_ingest_pipeline(&config)?;
            let report = pipeline.run(query.as_deref()).await?;
            info!(articles = report.articles_ingested, "ingestion complete");
        }
    }

    Ok(())
}
