//! HTTP surface for the content pipeline.

use crate::announce::Announcer;
use crate::config::Config;
use crate::content::{MessageTable, NamespaceLoader};
use crate::error::ContentError;
use crate::i18n::{is_supported_locale, supported_locales, ContentMetrics, Locale};
use crate::pages::PageRegistry;
use crate::security::{check_api_key, KeyCheck};
use crate::sitemap::{generate_sitemap, render_sitemap_xml, NavConfig};
use crate::waitlist::{JoinOutcome, WaitlistError, WaitlistStore};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Waitlist namespace and the key of its signup announcement.
const WAITLIST_NAMESPACE: &str = "waitlist";
const ANNOUNCEMENT_KEY: &str = "root.pages.waitlist.announcement";
const POSITION_PLACEHOLDER: &str = "{position}";
const BUILT_IN_ANNOUNCEMENT: &str = "You're #{position} on the waitlist";

pub struct AppState {
    pub config: Config,
    pub loader: NamespaceLoader,
    pub pages: PageRegistry,
    pub nav: NavConfig,
    pub waitlist: WaitlistStore,
    pub announcer: Announcer,
    /// Content is static for the process, so its age is the process age.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, nav: NavConfig, pages: PageRegistry) -> Self {
        let loader = if config.content_cache {
            NamespaceLoader::with_cache(&config.content_dir)
        } else {
            NamespaceLoader::new(&config.content_dir)
        };

        Self {
            config,
            loader,
            pages,
            nav,
            waitlist: WaitlistStore::new(),
            announcer: Announcer::default(),
            started_at: Utc::now(),
        }
    }

    /// Build state from configuration, reading the nav file if one is set.
    ///
    /// A broken nav file falls back to the built-in menu.
    pub fn from_config(config: Config) -> Self {
        let nav = match &config.nav_config_file {
            Some(path) => NavConfig::from_file(path).unwrap_or_else(|e| {
                warn!("Using built-in navigation: {:#}", e);
                NavConfig::site()
            }),
            None => NavConfig::site(),
        };

        Self::new(config, nav, PageRegistry::site())
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid API key".to_string()),
            ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::UnsupportedLocale(_) => ApiError::NotFound(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/api/sitemap", get(sitemap_json))
        .route("/api/locales", get(locales))
        .route("/api/messages/:locale/*page", get(page_messages))
        .route("/api/waitlist", get(list_waitlist).post(join_waitlist))
        .route("/api/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn sitemap_xml(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = generate_sitemap(
        &state.nav,
        &state.pages,
        &state.config.site_base_url,
        state.started_at,
    );
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap_xml(&entries),
    )
}

async fn sitemap_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(generate_sitemap(
        &state.nav,
        &state.pages,
        &state.config.site_base_url,
        state.started_at,
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleInfo {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    is_default: bool,
}

async fn locales() -> Json<Vec<LocaleInfo>> {
    Json(
        supported_locales()
            .into_iter()
            .map(|locale| LocaleInfo {
                code: locale.code(),
                name: locale.name(),
                native_name: locale.native_name(),
                is_default: locale.is_default(),
            })
            .collect(),
    )
}

#[derive(Debug, Serialize)]
struct PageMessages {
    locale: Locale,
    page: String,
    messages: MessageTable,
}

async fn page_messages(
    State(state): State<Arc<AppState>>,
    Path((locale, page)): Path<(String, String)>,
) -> Result<Json<PageMessages>, ApiError> {
    if !is_supported_locale(&locale) {
        return Err(ContentError::UnsupportedLocale(locale).into());
    }
    let page = page.trim_matches('/').to_string();
    let namespaces = state
        .pages
        .namespaces_for(&page)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown page: '{}'", page)))?;

    // Cold namespaces are read from disk; keep that off the async workers.
    let loader_state = Arc::clone(&state);
    let locale_code = locale.clone();
    let (messages, report) = tokio::task::spawn_blocking(move || {
        loader_state
            .loader
            .load_page_namespaces_checked(&locale_code, &namespaces)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Content load task failed: {}", e)))??;

    if state.config.validate_keys && !report.collisions.is_empty() {
        for collision in &report.collisions {
            warn!(
                "Key collision on page '{}' ({}): '{}' overrides '{}' for {}",
                page, locale, collision.kept, collision.overwritten, collision.key
            );
        }
        ContentMetrics::global().record_collisions(report.collisions.len());
    }

    Ok(Json(PageMessages {
        locale: Locale::from_code(&locale)?,
        page,
        messages,
    }))
}

#[derive(Debug, Deserialize)]
struct JoinRequest {
    email: String,
    #[serde(default)]
    locale: Option<String>,
}

async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Response, ApiError> {
    let locale = match request.locale.as_deref() {
        Some(code) => Locale::from_code(code).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Locale::default_locale(),
    };

    let outcome = state
        .waitlist
        .join(&request.email, locale)
        .map_err(|e: WaitlistError| ApiError::BadRequest(e.to_string()))?;

    match outcome {
        JoinOutcome::Joined(entry) => {
            info!("Waitlist signup #{} ({})", entry.position, entry.locale);
            let loader_state = Arc::clone(&state);
            let position = entry.position;
            let message = tokio::task::spawn_blocking(move || {
                announcement_text(&loader_state.loader, locale, position)
            })
            .await
            .unwrap_or_else(|e| {
                warn!("Announcement text task failed: {}", e);
                BUILT_IN_ANNOUNCEMENT.replace(POSITION_PLACEHOLDER, &position.to_string())
            });
            state.announcer.announce(locale, message);
            Ok((StatusCode::CREATED, Json(entry)).into_response())
        }
        JoinOutcome::AlreadyJoined(entry) => Ok((StatusCode::OK, Json(entry)).into_response()),
    }
}

/// Localized "you're on the list" text.
///
/// Uses the locale's waitlist namespace, then the default locale's, then a
/// built-in English template.
fn announcement_text(loader: &NamespaceLoader, locale: Locale, position: usize) -> String {
    let template = [locale, Locale::default_locale()]
        .into_iter()
        .find_map(|candidate| announcement_template(loader, candidate))
        .unwrap_or_else(|| BUILT_IN_ANNOUNCEMENT.to_string());

    template.replace(POSITION_PLACEHOLDER, &position.to_string())
}

fn announcement_template(loader: &NamespaceLoader, locale: Locale) -> Option<String> {
    loader
        .load_page_namespaces(locale.code(), &[WAITLIST_NAMESPACE])
        .ok()
        .and_then(|table| table.text(ANNOUNCEMENT_KEY).map(str::to_string))
}

async fn list_waitlist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());

    match check_api_key(state.config.api_key.as_deref(), provided) {
        KeyCheck::Valid => Ok(Json(json!({
            "count": state.waitlist.count(),
            "entries": state.waitlist.entries(),
        }))
        .into_response()),
        KeyCheck::NotConfigured => Err(ApiError::Unavailable(
            "Waitlist export is disabled".to_string(),
        )),
        KeyCheck::Missing | KeyCheck::Invalid => Err(ApiError::Unauthorized),
    }
}

async fn metrics() -> impl IntoResponse {
    Json(ContentMetrics::global().report())
}
