// SPDX-License-Identifier: GPL-3.0-only
use super::fake_server::{serve_json, serve_once};
use super::*;
use crate::models::api::{AspectRatio, ConnectionStatus, MailProvider, SendEmailRequest};
use crate::models::image::ImageSource;
use serde_json::json;

fn client_for(base: &str, api_key: &str) -> ApiClient {
    ApiClient::new(&Settings {
        api_url: base.to_string(),
        api_key: api_key.to_string(),
        ..Settings::default()
    })
}

#[test]
fn test_endpoint_joins_trimmed_base() {
    let client = client_for(" http://localhost:8000/ ", "");
    assert_eq!(client.endpoint("/api/llm"), "http://localhost:8000/api/llm");
    assert_eq!(
        client.resolve("/api/tts/audio/1.mp3"),
        "http://localhost:8000/api/tts/audio/1.mp3"
    );
    assert_eq!(client.resolve("https://cdn/x.mp3"), "https://cdn/x.mp3");
}

#[tokio::test]
async fn test_generate_speech_sends_key_and_body() {
    let (base, server) = serve_json(
        200,
        &json!({
            "text_normalized": "hello",
            "language": "en",
            "audio_url": "/api/tts/audio/abc.mp3"
        }),
    )
    .await;
    let client = client_for(&base, "secret");

    let speech = client.generate_speech("**hello**").await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api/tts/generate");
    assert_eq!(request.header("x-api-key"), Some("secret"));
    assert_eq!(request.body_json(), json!({"text_md": "**hello**"}));
    assert_eq!(speech.language, "en");
    assert_eq!(
        client.audio_url(&speech).unwrap(),
        format!("{base}/api/tts/audio/abc.mp3")
    );
}

#[tokio::test]
async fn test_blank_api_key_is_not_sent() {
    let (base, server) = serve_json(200, &json!({"response": "ok"})).await;
    let client = client_for(&base, "   ");

    client.prompt_llm("hi", None).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.header("x-api-key"), None);
    assert_eq!(
        request.body_json(),
        json!({"prompt": "hi", "model": "openrouter/auto"})
    );
}

#[tokio::test]
async fn test_non_2xx_carries_status_and_body() {
    let (base, _server) = serve_once(500, "text/plain", "model exploded").await;
    let client = client_for(&base, "");

    let err = client.prompt_llm("hi", Some("gpt")).await.unwrap_err();
    assert!(matches!(&err, ApiError::Http { status: 500, body } if body == "model exploded"));
    assert_eq!(err.to_string(), "Server error: 500 - model exploded");
}

#[tokio::test]
async fn test_missing_completion_is_empty_response() {
    let (base, _server) = serve_json(200, &json!({"status": "ok"})).await;
    let client = client_for(&base, "");

    let err = client.prompt_llm("hi", None).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse { what: "response" }));
    assert_eq!(err.to_string(), "Empty response from server");
}

#[tokio::test]
async fn test_summarize_renders_prompt_template() {
    let (base, server) = serve_json(200, &json!({"response": "short"})).await;
    let settings = Settings {
        api_url: base,
        summary_prompt: "TL;DR {text}".to_string(),
        ..Settings::default()
    };
    let client = ApiClient::new(&settings);

    let summary = client.summarize(&settings, "long text").await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(summary, "short");
    assert_eq!(request.body_json()["prompt"], "TL;DR long text");
}

#[tokio::test]
async fn test_transcribe_audio_by_url_uses_multipart_field() {
    let (base, server) = serve_json(
        200,
        &json!({
            "text": "hello world",
            "language": "en",
            "segments": [{"start": 0.0, "end": 1.2, "text": "hello world"}]
        }),
    )
    .await;
    let client = client_for(&base, "");

    let transcript = client
        .transcribe_audio(MediaSource::Url("https://x/a.mp3".to_string()))
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.path(), "/api/stt/transcribe");
    assert!(
        request
            .header("content-type")
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    );
    let body = request.body_text();
    assert!(body.contains("name=\"audio_url\""));
    assert!(body.contains("https://x/a.mp3"));
    assert_eq!(transcript.segments.len(), 1);
}

#[tokio::test]
async fn test_transcribe_video_uploads_file() {
    let (base, server) = serve_json(200, &json!({"text": "clip", "language": "de"})).await;
    let client = client_for(&base, "");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mp4");
    std::fs::write(&path, b"fake-video").unwrap();

    let source = MediaSource::from_path(&path).await.unwrap();
    let transcript = client.transcribe_video(source).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.path(), "/api/video-text/transcribe");
    let body = request.body_text();
    assert!(body.contains("name=\"file\"; filename=\"clip.mp4\""));
    assert!(body.contains("fake-video"));
    assert_eq!(transcript.text, "clip");
}

#[tokio::test]
async fn test_empty_transcript_is_empty_response() {
    let (base, _server) = serve_json(200, &json!({"text": "", "language": "en"})).await;
    let client = client_for(&base, "");
    let err = client
        .transcribe_audio(MediaSource::Url("u".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse { what: "text" }));
}

#[tokio::test]
async fn test_generate_image_form_and_response() {
    let (base, server) = serve_json(
        200,
        &json!({"images": [{"url": "AQID", "id": "img-1", "description": "a cat"}]}),
    )
    .await;
    let client = client_for(&base, "k");

    let images = client
        .generate_image(
            "a cat",
            AspectRatio::Wide,
            vec![ReferenceImage {
                file_name: "ref.png".to_string(),
                data: b"png".to_vec(),
            }],
        )
        .await
        .unwrap();
    let request = server.await.unwrap();

    let body = request.body_text();
    assert!(body.contains("name=\"prompt\""));
    assert!(body.contains("name=\"aspect_ratio\""));
    assert!(body.contains("\r\n\r\nwide\r\n"));
    assert!(body.contains("name=\"images\"; filename=\"ref.png\""));
    assert_eq!(images[0].id.as_deref(), Some("img-1"));
    assert_eq!(images[0].source(), ImageSource::RawBase64("AQID".to_string()));
}

#[tokio::test]
async fn test_unrecognized_image_shape_is_empty_response() {
    let (base, _server) = serve_json(200, &json!({"image_url": "https://x/y.png"})).await;
    let client = client_for(&base, "");
    let err = client
        .generate_image("p", AspectRatio::Square, Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse { what: "images" }));
}

#[tokio::test]
async fn test_fetch_image_decodes_inline_without_network() {
    let client = client_for("http://127.0.0.1:9", "");
    let bytes = client
        .fetch_image(&ImageSource::classify("data:image/gif;base64,AQID"))
        .await
        .unwrap();
    assert_eq!(bytes.mime, "image/gif");
    assert_eq!(bytes.data, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_youtube_download_streams_into_place() {
    let (base, server) = serve_once(200, "video/mp4", b"0123456789".to_vec()).await;
    let client = client_for(&base, "");
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("video.mp4");

    let saved = client
        .download_youtube("https://youtu.be/x", &destination)
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.body_json(), json!({"url": "https://youtu.be/x"}));
    assert_eq!(saved, destination);
    assert_eq!(std::fs::read(&destination).unwrap(), b"0123456789");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_youtube_403_maps_to_access_restriction_message() {
    let (base, _server) = serve_once(403, "text/plain", "Download failed").await;
    let client = client_for(&base, "");
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .download_youtube("https://youtu.be/x", &dir.path().join("v.mp4"))
        .await
        .unwrap_err();
    let message = youtube_error_message(&err);

    assert!(message.contains("access restrictions"));
    assert!(!message.contains("Download failed"));
    assert!(!dir.path().join("v.mp4").exists());
}

#[test]
fn test_youtube_error_messages_by_status() {
    let bad_request = ApiError::Http {
        status: 400,
        body: String::new(),
    };
    assert!(youtube_error_message(&bad_request).contains("may be unavailable"));

    let other = ApiError::Http {
        status: 502,
        body: "gateway".to_string(),
    };
    assert_eq!(youtube_error_message(&other), "Server error: 502 - gateway");
}

#[tokio::test]
async fn test_mail_endpoints_per_provider() {
    let (base, server) = serve_json(
        200,
        &json!({"emails": [{"id": "1", "subject": "Hi", "to": ["a@b.c"]}]}),
    )
    .await;
    let client = client_for(&base, "");
    let emails = client.list_emails(MailProvider::Outlook, 5).await.unwrap();
    let request = server.await.unwrap();
    assert_eq!(request.path(), "/api/outlook/emails");
    assert_eq!(request.query(), Some("max_results=5"));
    assert_eq!(emails.len(), 1);

    let (base, server) = serve_json(200, &json!({"message": "Email sent successfully"})).await;
    let client = client_for(&base, "");
    let receipt = client
        .send_email(
            MailProvider::Google,
            &SendEmailRequest {
                to: "a@b.c".to_string(),
                subject: "S".to_string(),
                body: "B".to_string(),
            },
        )
        .await
        .unwrap();
    let request = server.await.unwrap();
    assert_eq!(request.path(), "/api/google/emails/send");
    assert_eq!(
        request.body_json(),
        json!({"to": "a@b.c", "subject": "S", "body": "B"})
    );
    assert_eq!(receipt.message.as_deref(), Some("Email sent successfully"));

    let (base, server) = serve_json(200, &json!({"events": []})).await;
    let client = client_for(&base, "");
    let events = client.list_events(MailProvider::Google, 10).await.unwrap();
    assert_eq!(server.await.unwrap().path(), "/api/google/calendar/events");
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_outlook_device_code() {
    let (base, server) = serve_json(
        200,
        &json!({
            "user_code": "XYZ",
            "verification_uri": "https://microsoft.com/devicelogin",
            "message": "To sign in..."
        }),
    )
    .await;
    let client = client_for(&base, "");
    let login = client.outlook_device_code().await.unwrap();
    assert_eq!(server.await.unwrap().path(), "/api/outlook/auth");
    assert_eq!(
        login.to_string(),
        "Enter the code: XYZ at https://microsoft.com/devicelogin"
    );
}

#[tokio::test]
async fn test_health_statuses() {
    let (base, server) = serve_json(200, &json!({"status": "ok"})).await;
    let client = client_for(&base, "secret");
    assert_eq!(client.health().await, ConnectionStatus::Connected);
    assert_eq!(server.await.unwrap().header("x-api-key"), None);

    let (base, _server) = serve_once(503, "text/plain", "").await;
    assert_eq!(
        client_for(&base, "").health().await,
        ConnectionStatus::Error(503)
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    assert_eq!(
        client_for(&closed, "").health().await,
        ConnectionStatus::Disconnected
    );
}
