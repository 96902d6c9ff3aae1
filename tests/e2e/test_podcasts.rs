use crate::e2e::helpers;

use docucast_backend::domain::document::DocumentType;
use docucast_backend::domain::podcast::{PipelineSettings, PodcastResponse};
use helpers::{
    api_client::MultipartForm,
    assert_error_kind,
    stubs::{StubSpeechRepository, SAMPLES_PER_LINE, SAMPLE_RATE},
    TestContext, DEFAULT_VOICES,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use std::io::{Cursor, Write};
use test_context::test_context;

fn text_upload(filename: &str, content: &str) -> MultipartForm {
    MultipartForm::new().file("file", filename, content.as_bytes())
}

fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        write!(
            writer,
            r#"<?xml version="1.0"?><w:document xmlns:w="urn:w"><w:body>{}</w:body></w:document>"#,
            body
        )
        .unwrap();
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_podcast_from_text_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            text_upload("notes.txt", "Hello  world.\n\nThis is a test."),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let podcast: PodcastResponse = response.json().unwrap();
    assert_eq!(podcast.chunk_count, 1);
    assert_eq!(podcast.line_count, 5);
    assert_eq!(podcast.lines_synthesized, 5);
    assert!((podcast.duration_seconds - 0.5).abs() < 1e-9);
    assert_eq!(
        podcast.audio_url,
        format!("/api/podcasts/{}", podcast.audio_artifact_id)
    );
    assert_eq!(ctx.stored_artifacts(), 1);

    // Hosts alternate voices, the content line carries the packed sentences
    let spoken = ctx.speech.spoken();
    let voices: Vec<&str> = spoken.iter().map(|line| line.voice.as_str()).collect();
    assert_eq!(voices, vec!["en-us", "en-gb", "en-us", "en-gb", "en-us"]);
    assert_eq!(spoken[2].text, "Hello world. This is a test.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_created_podcast_audio(ctx: &TestContext) {
    let created = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", "Hello world."))
        .await
        .unwrap();
    created.assert_status(StatusCode::CREATED);
    let podcast: PodcastResponse = created.json().unwrap();

    let response = ctx.client.get(&podcast.audio_url).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");

    let reader = hound::WavReader::new(Cursor::new(response.body_bytes.clone())).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
    assert_eq!(reader.len() as usize, 5 * SAMPLES_PER_LINE);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_camel_case_response_fields(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", "Hello world."))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let body = response.body.as_ref().unwrap();
    for key in [
        "audioArtifactId",
        "audioUrl",
        "chunkCount",
        "lineCount",
        "linesSynthesized",
        "durationSeconds",
        "createdAt",
    ] {
        assert!(body.get(key).is_some(), "Missing field {}", key);
    }
}

#[tokio::test]
async fn it_should_interject_between_chunks() {
    let settings = PipelineSettings {
        max_chunk_chars: 6,
        ..PipelineSettings::default()
    };
    let ctx = TestContext::start(StubSpeechRepository::with_voices(DEFAULT_VOICES), settings)
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            text_upload("notes.txt", "One. Two. Three. Four. Five."),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let podcast: PodcastResponse = response.json().unwrap();
    assert_eq!(podcast.chunk_count, 5);
    // opening pair, five chunks, one interjection after the fourth, closing pair
    assert_eq!(podcast.line_count, 10);
    assert_eq!(podcast.lines_synthesized, 10);

    let spoken = ctx.speech.spoken();
    assert_eq!(spoken[6].text, "Interesting point, Brenda. What comes next?");
    assert_eq!(spoken[6].voice, "en-us");
}

#[tokio::test]
async fn it_should_share_a_single_voice_between_hosts() {
    let ctx = TestContext::with_speech(StubSpeechRepository::with_voices(&["solo"]))
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", "Hello world."))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert!(ctx.speech.spoken().iter().all(|line| line.voice == "solo"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_podcast_from_docx(ctx: &TestContext) {
    let docx = docx_with_paragraphs(&["First paragraph.", "Second paragraph."]);

    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            MultipartForm::new().file("file", "report.docx", &docx),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let spoken = ctx.speech.spoken();
    assert_eq!(spoken[2].text, "First paragraph. Second paragraph.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_honor_declared_document_type(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            text_upload("notes.data", "Hello world.").text("document_type", "text"),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn it_should_fail_without_voices_and_store_nothing() {
    let ctx = TestContext::with_speech(StubSpeechRepository::with_voices(&[]))
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", "Hello world."))
        .await
        .unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_error_kind(response.body.as_ref().unwrap(), "NoVoicesAvailable");
    assert_eq!(ctx.stored_artifacts(), 0);
    assert!(ctx.speech.spoken().is_empty());
}

#[tokio::test]
async fn it_should_fail_when_every_line_fails() {
    let ctx = TestContext::with_speech(StubSpeechRepository::failing(DEFAULT_VOICES))
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", "Hello world."))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_error_kind(response.body.as_ref().unwrap(), "AllLinesFailedSynthesis");
    assert_eq!(ctx.stored_artifacts(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_file_types(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("virus.exe", "MZ"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("File type not allowed");
    assert_error_kind(response.body.as_ref().unwrap(), "InvalidInput");
}

#[tokio::test]
async fn it_should_reject_types_outside_allowed_list() {
    let settings = PipelineSettings {
        allowed_document_types: vec![DocumentType::Text],
        ..PipelineSettings::default()
    };
    let ctx = TestContext::start(StubSpeechRepository::with_voices(DEFAULT_VOICES), settings)
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            MultipartForm::new().file("file", "paper.pdf", b"%PDF-1.4"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("not allowed");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_file_part(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            MultipartForm::new().text("document_type", "text"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No file part in the request");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_selected_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("", "Hello world."))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No selected file");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_multipart_requests(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/podcasts", b"{\"text\":\"hi\"}", "application/json")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_kind(response.body.as_ref().unwrap(), "InvalidInput");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_uploads(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", ""))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_kind(response.body.as_ref().unwrap(), "InvalidInput");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_documents_without_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", " \n\t\n "))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_error_kind(response.body.as_ref().unwrap(), "EmptyDocument");
    assert_eq!(ctx.stored_artifacts(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unreadable_documents(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/podcasts",
            MultipartForm::new().file("file", "broken.docx", b"not a zip archive"),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_error_kind(response.body.as_ref().unwrap(), "ExtractionFailed");
}

#[tokio::test]
async fn it_should_reject_documents_over_the_size_limit() {
    let settings = PipelineSettings {
        max_upload_bytes: 1024,
        ..PipelineSettings::default()
    };
    let ctx = TestContext::start(StubSpeechRepository::with_voices(DEFAULT_VOICES), settings)
        .await
        .unwrap();

    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("notes.txt", &"a".repeat(2048)))
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_error_kind(response.body.as_ref().unwrap(), "PayloadTooLarge");
    assert!(ctx.speech.spoken().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_podcast(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/podcasts/1b4e28ba-2fa1-11d2-883f-0016d3cca427")
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_kind(response.body.as_ref().unwrap(), "NotFound");

    let response = ctx.client.get("/api/podcasts/not-an-id").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_podcast_responses(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/podcasts", text_upload("virus.exe", "MZ"))
        .await
        .unwrap();

    response.assert_header_exists("x-request-id");
}
