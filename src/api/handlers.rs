//! HTTP request handlers for the split service.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::archive::write_archive;
use crate::sessions::{ArchiveRecord, SessionStore};
use crate::splitter::split_document;
use crate::types::{BrandingAssets, ServiceConfig, SplitOutcome};
use crate::{ARCHIVE_FILE_NAME, SESSION_COOKIE};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const RESULT_TEMPLATE: &str = include_str!("../../templates/result.html");

const FLASH_NO_FILE_PART: &str = "missing_part";
const FLASH_NO_SELECTION: &str = "no_selection";
const FLASH_INVALID_TYPE: &str = "invalid_type";
const FLASH_NO_DOWNLOAD: &str = "no_download";

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]+").unwrap();
}

/// Application state shared across handlers.
pub struct AppState {
    pub sessions: RwLock<SessionStore>,
    pub config: ServiceConfig,
}

impl AppState {
    /// Create state around the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            sessions: RwLock::new(SessionStore::new()),
            config,
        }
    }
}

/// Wrapper turning internal errors into plain 500 responses.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = ?self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Query parameters for the index page.
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    /// Flash code set by a redirecting handler.
    m: Option<String>,
}

/// Render the upload form, with a flash message when redirected back.
pub async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    let message = params.m.as_deref().and_then(flash_message).unwrap_or("");
    Html(render_template(INDEX_TEMPLATE, &[("message", message)]))
}

/// Receive a document, split it, and record the archive for the session.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (session, minted) = session_id(&headers);

    let (filename, data) = match file_field(&mut multipart).await {
        Ok(Some(found)) => found,
        Ok(None) => return Ok(flash_redirect(FLASH_NO_FILE_PART)),
        Err(response) => return Ok(response),
    };
    if filename.is_empty() {
        return Ok(flash_redirect(FLASH_NO_SELECTION));
    }
    if !filename.ends_with(".docx") {
        return Ok(flash_redirect(FLASH_INVALID_TYPE));
    }

    let saved_name = sanitize_filename(&filename);
    let upload_path = state.config.upload_dir.join(&saved_name);
    tokio::fs::write(&upload_path, &data)
        .await
        .with_context(|| format!("failed to save upload to {}", upload_path.display()))?;

    info!(session = %session, file = %saved_name, bytes = data.len(), "received upload");

    let result = run_split(&state.config, &upload_path);

    // The upload is removed whether the run succeeded or not.
    if let Err(e) = tokio::fs::remove_file(&upload_path).await {
        warn!(path = %upload_path.display(), error = %e, "failed to remove uploaded file");
    }

    let (scratch, archive_path, outcome) = result?;
    state.sessions.write().await.record_archive(
        session,
        ArchiveRecord::new(scratch, archive_path, outcome.chunk_count()),
    );

    info!(
        session = %session,
        paragraphs = outcome.paragraph_count,
        chunks = outcome.chunk_count(),
        "archive ready"
    );

    let count = outcome.chunk_count().to_string();
    let mut response = Html(render_template(RESULT_TEMPLATE, &[("count", &count)])).into_response();
    if minted {
        set_session_cookie(&mut response, session);
    }
    Ok(response)
}

/// Stream the session's archive once, then discard its scratch directory.
pub async fn download(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session, _) = session_id(&headers);

    let Some(record) = state.sessions.write().await.take(session) else {
        return Ok(flash_redirect(FLASH_NO_DOWNLOAD));
    };

    // A vanished file gets the same flash as a missing record.
    let bytes = match tokio::fs::read(record.archive_path()).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(session = %session, "recorded archive missing from disk");
            return Ok(flash_redirect(FLASH_NO_DOWNLOAD));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!(
                    "failed to read archive {}",
                    record.archive_path().display()
                ))
                .into())
        }
    };

    info!(
        session = %session,
        chunks = record.chunk_count,
        bytes = bytes.len(),
        "served archive"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARCHIVE_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Split the saved upload in a fresh scratch directory and pack the chunks.
fn run_split(
    config: &ServiceConfig,
    source_path: &Path,
) -> anyhow::Result<(TempDir, PathBuf, SplitOutcome)> {
    let scratch = TempDir::new().context("failed to create scratch directory")?;
    let branding = BrandingAssets::new(config.logo_path(), config.font_path());
    let outcome = split_document(
        source_path,
        scratch.path(),
        &branding,
        &config.split_config(),
    )
    .context("failed to split document")?;

    let archive_path = scratch.path().join(ARCHIVE_FILE_NAME);
    write_archive(&archive_path, &outcome.files).context("failed to write archive")?;
    Ok((scratch, archive_path, outcome))
}

/// Pull the `file` field out of the multipart form, if present.
///
/// Multipart read errors keep their own status (413 for oversize bodies).
async fn file_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, Response> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                return match field.bytes().await {
                    Ok(data) => Ok(Some((filename, data))),
                    Err(e) => Err(e.into_response()),
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return Ok(None),
            Err(e) => return Err(e.into_response()),
        }
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Path components are discarded, runs of characters outside
/// `[A-Za-z0-9_.-]` collapse to `_`, and a name that sanitizes away
/// entirely falls back to a fixed one.
fn sanitize_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned = UNSAFE_CHARS.replace_all(basename, "_");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload.docx".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Session token from the request cookie, or a fresh one to mint.
fn session_id(headers: &HeaderMap) -> (Uuid, bool) {
    match headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_session_cookie)
    {
        Some(session) => (session, false),
        None => (Uuid::new_v4(), true),
    }
}

fn parse_session_cookie(cookies: &str) -> Option<Uuid> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

fn set_session_cookie(response: &mut Response, session: Uuid) {
    let cookie = format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

/// Map a flash code from a redirect back to its user-visible text.
fn flash_message(code: &str) -> Option<&'static str> {
    match code {
        FLASH_NO_FILE_PART => Some("No file part"),
        FLASH_NO_SELECTION => Some("No selected file"),
        FLASH_INVALID_TYPE => Some("Please upload a valid Word document (.docx)"),
        FLASH_NO_DOWNLOAD => Some("No file available for download"),
        _ => None,
    }
}

fn flash_redirect(code: &str) -> Response {
    Redirect::to(&format!("/?m={code}")).into_response()
}

fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in values {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("report.docx"), "report.docx");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\evil\\macro.docx"), "macro.docx");
    }

    #[test]
    fn test_sanitize_filename_collapses_unsafe_runs() {
        assert_eq!(
            sanitize_filename("job description (final).docx"),
            "job_description_final_.docx"
        );
        assert_eq!(sanitize_filename("r\u{e9}sum\u{e9}.docx"), "r_sum_.docx");
    }

    #[test]
    fn test_sanitize_filename_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_filename("???"), "upload.docx");
        assert_eq!(sanitize_filename("..."), "upload.docx");
        assert_eq!(sanitize_filename(""), "upload.docx");
    }

    #[test]
    fn test_parse_session_cookie() {
        let session = Uuid::new_v4();
        assert_eq!(
            parse_session_cookie(&format!("sid={session}")),
            Some(session)
        );
        assert_eq!(
            parse_session_cookie(&format!("theme=dark; sid={session}; lang=en")),
            Some(session)
        );
        assert_eq!(parse_session_cookie("sid=not-a-uuid"), None);
        assert_eq!(parse_session_cookie("theme=dark"), None);
    }

    #[test]
    fn test_session_id_minted_when_absent() {
        let headers = HeaderMap::new();
        let (_, minted) = session_id(&headers);
        assert!(minted);

        let session = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("sid={session}")).unwrap(),
        );
        assert_eq!(session_id(&headers), (session, false));
    }

    #[test]
    fn test_flash_messages_cover_known_codes() {
        assert_eq!(flash_message(FLASH_NO_FILE_PART), Some("No file part"));
        assert_eq!(flash_message(FLASH_NO_SELECTION), Some("No selected file"));
        assert_eq!(
            flash_message(FLASH_INVALID_TYPE),
            Some("Please upload a valid Word document (.docx)")
        );
        assert_eq!(
            flash_message(FLASH_NO_DOWNLOAD),
            Some("No file available for download")
        );
        assert_eq!(flash_message("unknown"), None);
    }

    #[test]
    fn test_render_template_replaces_placeholders() {
        assert_eq!(
            render_template("split into {{count}} chunks", &[("count", "3")]),
            "split into 3 chunks"
        );
        assert_eq!(
            render_template("{{message}}", &[("message", "")]),
            ""
        );
    }
}
