use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use yt_notes::{
    gemini::GeminiClient, render::NOTES_HEADING, server, tracing::init_tracing_subscriber,
    NotesProcessor, NotesProcessorBuilder, NoticeLevel, YouTubeTranscriptApi,
};

#[derive(Parser)]
#[command(
    name = "yt-notes",
    about = "YouTube transcript to detailed notes converter"
)]
struct Cli {
    /// Google Gemini API key; requests fail without it
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Gemini model used for summaries
    #[arg(long, env = "GEMINI_MODEL", default_value = GeminiClient::DEFAULT_MODEL)]
    model: String,

    /// Gemini REST API base url
    #[arg(long, env = "GEMINI_BASE_URL", default_value = GeminiClient::DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// Transcript languages, in order of preference
    #[arg(
        long,
        env = "TRANSCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = "en"
    )]
    languages: Vec<String>,

    /// Address the web UI listens on
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1:8501")]
    bind: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web UI (default)
    Serve,
    /// Print the notes for a single video and exit
    Notes {
        /// YouTube video link
        url: String,
    },
}

type Processor = NotesProcessor<YouTubeTranscriptApi, GeminiClient>;

fn build_processor(cli: &Cli) -> Processor {
    let summarizer = GeminiClient::new(cli.google_api_key.clone())
        .with_base_url(&cli.gemini_base_url)
        .with_model(&cli.model);
    let transcript_api = YouTubeTranscriptApi::new().with_languages(cli.languages.clone());

    NotesProcessorBuilder::new()
        .transcript_api(transcript_api)
        .summarizer(summarizer)
        .build()
}

async fn serve(processor: Processor, bind: &str) -> anyhow::Result<()> {
    let app = server::router(Arc::new(processor));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!(address = %bind, "Serving notes UI");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn print_notes(processor: Processor, url: &str) -> anyhow::Result<()> {
    let page = processor.generate(url).await?;

    for notice in &page.notices {
        let label = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{label}: {}", notice.message);
    }

    if let Some(notes) = page.notes {
        println!("## {NOTES_HEADING}\n\n{notes}");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install CTRL+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT").ok().map(Into::into),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    if cli.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; summaries will fail until it is");
    }

    let processor = build_processor(&cli);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(processor, &cli.bind).await?,
        Command::Notes { url } => print_notes(processor, &url).await?,
    }

    Ok(())
}
