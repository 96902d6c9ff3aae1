use docucast_backend::controllers::podcast::PodcastController;
use docucast_backend::domain::podcast::PodcastService;
use docucast_backend::infrastructure::config::{Config, LogFormat, SpeechProvider};
use docucast_backend::infrastructure::http::start_http_server;
use docucast_backend::infrastructure::repositories::{
    DocumentTextExtractor, EspeakSpeechRepository, FsAudioStorageRepository,
    OpenAiSpeechRepository, PollySpeechRepository, SpeechRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting DocuCast Backend on {}:{}",
        config.host,
        config.port
    );

    let speech_repo = create_speech_repository(&config).await;
    tracing::info!(provider = speech_repo.provider(), "Speech engine selected");

    std::fs::create_dir_all(&config.audio_storage_dir)?;
    tracing::info!(
        audio_storage_dir = %config.audio_storage_dir,
        "Audio storage directory ready"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let extractor = Arc::new(DocumentTextExtractor::new());
    let storage_repo = Arc::new(FsAudioStorageRepository::new(&config.audio_storage_dir));

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let podcast_service = Arc::new(PodcastService::new(
        extractor,
        speech_repo,
        storage_repo,
        config.pipeline_settings(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let podcast_controller = Arc::new(PodcastController::new(podcast_service.clone()));

    // Start HTTP server with all routes
    start_http_server(config, podcast_service, podcast_controller).await?;

    Ok(())
}

async fn create_speech_repository(config: &Config) -> Arc<dyn SpeechRepository> {
    match config.speech_provider {
        SpeechProvider::Espeak => Arc::new(EspeakSpeechRepository::new()),
        SpeechProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollySpeechRepository::new(polly_client))
        }
        SpeechProvider::OpenAi => {
            if std::env::var("OPENAI_API_KEY").is_err() {
                tracing::warn!("OPENAI_API_KEY is not set, speech requests will be rejected");
            }
            let client = Arc::new(async_openai::Client::new());
            Arc::new(OpenAiSpeechRepository::new(
                client,
                config.openai_tts_model.clone(),
            ))
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "docucast_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "docucast_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
