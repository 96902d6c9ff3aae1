use anyhow::Result;
use axum::Router;
use docucast_backend::{
    controllers::podcast::PodcastController,
    domain::podcast::{PipelineSettings, PodcastService},
    infrastructure::{
        http::build_router,
        repositories::{DocumentTextExtractor, FsAudioStorageRepository},
    },
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;


use api_client::TestClient;
use stubs::StubSpeechRepository;

pub const DEFAULT_VOICES: &[&str] = &["en-us", "en-gb"];

pub struct TestContext {
    pub client: TestClient,
    pub speech: Arc<StubSpeechRepository>,
    pub settings: PipelineSettings,
    storage_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Self::with_speech(StubSpeechRepository::with_voices(DEFAULT_VOICES))
                .await
                .expect("Failed to start test server")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Stored audio is removed when the TempDir drops
        }
    }
}

#[allow(dead_code)]
impl TestContext {
    /// Start a server backed by the given speech engine with default settings
    pub async fn with_speech(speech: StubSpeechRepository) -> Result<Self> {
        Self::start(speech, PipelineSettings::default()).await
    }

    pub async fn start(speech: StubSpeechRepository, settings: PipelineSettings) -> Result<Self> {
        let storage_dir = tempfile::tempdir()?;
        let speech = Arc::new(speech);

        let app = create_app(speech.clone(), storage_dir.path(), settings.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            client: TestClient::new(&base_url),
            speech,
            settings,
            storage_dir,
        })
    }

    /// Number of podcast files currently in storage
    pub fn stored_artifacts(&self) -> usize {
        std::fs::read_dir(self.storage_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn create_app(speech: Arc<StubSpeechRepository>, storage_dir: &Path, settings: PipelineSettings) -> Router {
    let max_upload_bytes = settings.max_upload_bytes;

    let extractor = Arc::new(DocumentTextExtractor::new());
    let storage_repo = Arc::new(FsAudioStorageRepository::new(storage_dir));

    let podcast_service = Arc::new(PodcastService::new(
        extractor,
        speech,
        storage_repo,
        settings,
    ));
    let podcast_controller = Arc::new(PodcastController::new(podcast_service.clone()));

    build_router(podcast_service, podcast_controller, max_upload_bytes)
}

/// Assert the JSON error body carries the expected kind
#[allow(dead_code)]
pub fn assert_error_kind(response: &serde_json::Value, expected_kind: &str) {
    let kind = response
        .get("errorKind")
        .and_then(|v| v.as_str())
        .expect("Missing errorKind field");
    assert_eq!(kind, expected_kind, "Error kind mismatch");
    assert!(response.get("message").is_some(), "Missing error message");
}
