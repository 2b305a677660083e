#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jernkorset_api::config::Settings;
use jernkorset_api::router::build_app_router;
use jernkorset_api::state::AppState;
use jernkorset_core::archive::Archive;
use jernkorset_core::loader::LetterRow;
use jernkorset_core::models::Place;
use jernkorset_core::modernize::{ModernizeError, Modernized, Modernizer};

/// What the stub modernizer does when called.
#[derive(Debug, Clone)]
pub enum StubBehaviour {
    Reply { text: String, tokens_per_second: f64 },
    Fail(ModernizeError),
    Panic,
}

/// A [`Modernizer`] with canned behaviour that records the texts it receives.
pub struct StubModernizer {
    behaviour: StubBehaviour,
    pub calls: Mutex<Vec<String>>,
}

impl StubModernizer {
    pub fn new(behaviour: StubBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str, tokens_per_second: f64) -> Arc<Self> {
        Self::new(StubBehaviour::Reply {
            text: text.to_string(),
            tokens_per_second,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Modernizer for StubModernizer {
    async fn modernize(&self, text: &str) -> Result<Modernized, ModernizeError> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.behaviour {
            StubBehaviour::Reply {
                text,
                tokens_per_second,
            } => Ok(Modernized {
                text: text.clone(),
                tokens_per_second: *tokens_per_second,
            }),
            StubBehaviour::Fail(err) => Err(err.clone()),
            StubBehaviour::Panic => panic!("modernizer exploded"),
        }
    }
}

fn row(month: u32, day: u32, place_id: Option<i64>, recipient: &str, text: &str) -> LetterRow {
    LetterRow {
        date: NaiveDate::from_ymd_opt(1914, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap(),
        place_id,
        sender: "Peter".to_string(),
        recipient: recipient.to_string(),
        text: text.to_string(),
    }
}

/// Three letters and two places. Letter 3 points at a place that does not exist.
pub fn test_archive() -> Archive {
    Archive::from_records(
        [
            Place {
                id: 1,
                name: "Kobenhavn".to_string(),
                geometry: Some("POINT(12.5683 55.6761)".to_string()),
            },
            Place {
                id: 2,
                name: "Berlin".to_string(),
                geometry: Some("POINT(13.4050 52.5200)".to_string()),
            },
        ],
        [
            row(8, 1, Some(1), "Trine", "Kaere Trine, jeg haaber du har det godt."),
            row(8, 15, Some(2), "Moder", "Kaere Moder,<PARA>alt er vel her."),
            row(9, 1, Some(99), "Fader", "Kaere Fader, tak for brevet."),
        ],
    )
}

/// Settings with every default and no environment involved.
pub fn test_settings(debug: bool) -> Settings {
    let mut settings = Settings::from_lookup(|_| None).unwrap();
    settings.debug = debug;
    settings
}

/// Build the full application router around the test archive.
pub fn build_test_app(modernizer: Arc<dyn Modernizer>) -> Router {
    build_app_with(test_archive(), modernizer, test_settings(false))
}

pub fn build_app_with(
    archive: Archive,
    modernizer: Arc<dyn Modernizer>,
    settings: Settings,
) -> Router {
    build_app_router(AppState::new(archive, modernizer, settings))
}

/// App whose modernizer always succeeds.
pub fn default_app() -> Router {
    build_test_app(StubModernizer::replying("Kære Trine", 42.0))
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `x-request-id` response header, which must be present.
pub fn request_id(response: &Response) -> String {
    response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id")
        .to_str()
        .unwrap()
        .to_string()
}
