use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use yt_transcript::{TranscriptApi, TranscriptError, YouTubeTranscriptApi};

const VIDEO_ID: &str = "dQw4w9WgXcQ";

const CONSENT_PAGE: &str = r#"<html><body>
<form action="https://consent.youtube.com/s" method="POST">
  <input type="hidden" name="v" value="cb.123">
  <button>Accept all</button>
</form>
</body></html>"#;

const CAPTCHA_PAGE: &str = r#"<html><body><form><div class="g-recaptcha" data-sitekey="x"></div></form></body></html>"#;

const TIMEDTEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="1.5">hello world</text><text start="2" dur="1">&amp;amp; co</text></transcript>"#;

#[derive(Clone, Copy)]
enum WatchMode {
    ConsentFirst,
    ConsentAlways,
    Captcha,
    Status(u16),
}

/// Stands in for youtube.com: serves the watch page and the timedtext track,
/// recording what each request carried
#[derive(Clone)]
struct FakeYouTube {
    base_url: String,
    mode: WatchMode,
    cookies: Arc<Mutex<Vec<Option<String>>>>,
    watch_queries: Arc<Mutex<Vec<String>>>,
    timedtext_queries: Arc<Mutex<Vec<String>>>,
}

impl FakeYouTube {
    fn player_page(&self) -> String {
        format!(
            r#"<html><script>var ytInitialPlayerResponse = {{"playabilityStatus": {{"status": "OK"}}, "captions": {{"playerCaptionsTracklistRenderer": {{"captionTracks": [{{"baseUrl": "{}/api/timedtext?v={VIDEO_ID}&lang=en&fmt=srv3", "languageCode": "en"}}]}}}}}};var meta = {{}};</script></html>"#,
            self.base_url
        )
    }
}

async fn watch(State(yt): State<FakeYouTube>, headers: HeaderMap, uri: Uri) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    yt.cookies.lock().unwrap().push(cookie.clone());
    yt.watch_queries
        .lock()
        .unwrap()
        .push(uri.query().unwrap_or_default().to_string());

    match yt.mode {
        WatchMode::Captcha => Html(CAPTCHA_PAGE).into_response(),
        WatchMode::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            Html("<html><body>Something went wrong</body></html>"),
        )
            .into_response(),
        WatchMode::ConsentAlways => Html(CONSENT_PAGE).into_response(),
        WatchMode::ConsentFirst if cookie.is_none() => Html(CONSENT_PAGE).into_response(),
        WatchMode::ConsentFirst => Html(yt.player_page()).into_response(),
    }
}

async fn timedtext(State(yt): State<FakeYouTube>, uri: Uri) -> &'static str {
    yt.timedtext_queries
        .lock()
        .unwrap()
        .push(uri.query().unwrap_or_default().to_string());
    TIMEDTEXT
}

async fn spawn_youtube(mode: WatchMode) -> (YouTubeTranscriptApi, FakeYouTube) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let youtube = FakeYouTube {
        base_url: base_url.clone(),
        mode,
        cookies: Arc::new(Mutex::new(Vec::new())),
        watch_queries: Arc::new(Mutex::new(Vec::new())),
        timedtext_queries: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/watch", get(watch))
        .route("/api/timedtext", get(timedtext))
        .with_state(youtube.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = YouTubeTranscriptApi::new().with_watch_url(format!("{base_url}/watch"));
    (api, youtube)
}

#[tokio::test]
async fn test_consent_is_accepted_then_transcript_fetched() {
    let (api, youtube) = spawn_youtube(WatchMode::ConsentFirst).await;

    let transcript = api
        .fetch_transcript(VIDEO_ID)
        .await
        .expect("Transcript should be fetched after accepting consent");

    assert_eq!(
        *youtube.cookies.lock().unwrap(),
        vec![None, Some("CONSENT=YES+cb.123".to_string())]
    );
    assert_eq!(
        *youtube.watch_queries.lock().unwrap(),
        vec![format!("v={VIDEO_ID}"), format!("v={VIDEO_ID}")]
    );

    assert_eq!(transcript.video_id, VIDEO_ID);
    assert_eq!(transcript.language_code, "en");
    assert!(!transcript.is_generated);
    assert_eq!(transcript.segments.len(), 2);
    assert_eq!(transcript.segments[0].start, 0.5);
    assert_eq!(transcript.segments[0].duration, 1.5);
    assert_eq!(transcript.text(), "hello world & co");
}

#[tokio::test]
async fn test_timedtext_is_requested_without_format() {
    let (api, youtube) = spawn_youtube(WatchMode::ConsentFirst).await;

    api.fetch_transcript(VIDEO_ID).await.unwrap();

    assert_eq!(
        *youtube.timedtext_queries.lock().unwrap(),
        vec![format!("v={VIDEO_ID}&lang=en")]
    );
}

#[tokio::test]
async fn test_consent_loop_is_parse_error() {
    let (api, youtube) = spawn_youtube(WatchMode::ConsentAlways).await;

    let result = api.fetch_transcript(VIDEO_ID).await;

    assert!(matches!(result, Err(TranscriptError::ParseError(_))));
    assert_eq!(youtube.cookies.lock().unwrap().len(), 2);
    assert!(youtube.timedtext_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_captcha_is_too_many_requests() {
    let (api, youtube) = spawn_youtube(WatchMode::Captcha).await;

    let result = api.fetch_transcript(VIDEO_ID).await;

    assert!(matches!(result, Err(TranscriptError::TooManyRequests)));
    assert!(youtube.timedtext_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_maps_to_api_error_without_body() {
    let (api, _youtube) = spawn_youtube(WatchMode::Status(429)).await;

    match api.fetch_transcript(VIDEO_ID).await {
        Err(TranscriptError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Too Many Requests");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_language_reports_available_tracks() {
    let (api, youtube) = spawn_youtube(WatchMode::ConsentFirst).await;
    let api = api.with_languages(["de"]);

    match api.fetch_transcript(VIDEO_ID).await {
        Err(TranscriptError::NoTranscriptFound {
            requested,
            available,
            ..
        }) => {
            assert_eq!(requested, vec!["de"]);
            assert_eq!(available, vec!["en"]);
        }
        other => panic!("Expected NoTranscriptFound, got {other:?}"),
    }
    assert!(youtube.timedtext_queries.lock().unwrap().is_empty());
}
