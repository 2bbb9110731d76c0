//! HTTP upload server.
//!
//! `GET /` serves an upload form, `POST /upload` returns the normalized
//! workbook as a download, `GET /health` reports liveness. Uploads are
//! processed in memory; nothing is persisted.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use lead_output::{OutputError, XLSX_CONTENT_TYPE, output_filename_today};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tracing::{Instrument, error, info, info_span, warn};

use crate::logging::redact_value;
use crate::pipeline::{PipelineError, process_workbook_bytes};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;

/// Multipart field carrying the workbook.
pub const FILE_FIELD: &str = "file";

const SERVICE_NAME: &str = "lead-normalizer";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Lead Normalizer</title>
  </head>
  <body>
    <h1>Upload a lead spreadsheet</h1>
    <form action="/upload" method="post" enctype="multipart/form-data">
      <input type="file" name="file" accept=".xlsx" required />
      <input type="submit" value="Upload" />
    </form>
  </body>
</html>
"#;

/// Settings for [`serve`].
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    /// Created at startup if missing.
    pub upload_dir: PathBuf,
    /// Request bodies above this size are rejected with 413.
    pub max_upload_bytes: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: megabytes(DEFAULT_MAX_UPLOAD_MB),
        }
    }
}

/// Convert a megabyte count from the command line into a byte limit.
pub fn megabytes(mb: u64) -> usize {
    usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
}

/// Request failures, rendered as plain-text responses.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("No file part")]
    NoFilePart,
    #[error("No selected file")]
    NoSelectedFile,
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("processing task failed: {0}")]
    Task(#[from] JoinError),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFilePart | Self::NoSelectedFile => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::Pipeline(PipelineError::Decode(_))
            | Self::Pipeline(PipelineError::Encode(OutputError::TooLarge { .. })) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Pipeline(PipelineError::Encode(_)) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "upload failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "upload rejected");
        }
        (status, self.to_string()).into_response()
    }
}

/// Create the upload directory if it does not exist. Safe to call again.
pub fn ensure_upload_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path)?;
    info!(path = %path.display(), "created upload directory");
    Ok(())
}

/// Build the application router.
pub fn router(config: &ServeConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

/// Run the server until Ctrl-C.
pub async fn serve(config: &ServeConfig) -> io::Result<()> {
    ensure_upload_dir(&config.upload_dir)?;
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        max_upload_bytes = config.max_upload_bytes,
        "listening"
    );
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(error = %err, "cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn upload(multipart: Multipart) -> Result<Response, ServeError> {
    handle_upload(multipart)
        .instrument(info_span!("upload"))
        .await
}

async fn handle_upload(mut multipart: Multipart) -> Result<Response, ServeError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // Parts without a filename are plain form values, not files.
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field.bytes().await?;
        upload = Some((filename, bytes));
        break;
    }
    let (filename, bytes) = upload.ok_or(ServeError::NoFilePart)?;
    if filename.is_empty() {
        return Err(ServeError::NoSelectedFile);
    }
    info!(
        filename = %redact_value(&filename),
        bytes = bytes.len(),
        "upload received"
    );

    let span = tracing::Span::current();
    let processed =
        tokio::task::spawn_blocking(move || span.in_scope(|| process_workbook_bytes(&bytes)))
            .await??;

    let download = output_filename_today();
    info!(
        rows = processed.report.rows,
        changed = processed.report.total_changed(),
        "upload processed"
    );
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download}\""),
        ),
    ];
    Ok((headers, processed.bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_to_bytes() {
        assert_eq!(megabytes(1), 1_048_576);
        assert_eq!(megabytes(DEFAULT_MAX_UPLOAD_MB), 50 * 1_048_576);
    }

    #[test]
    fn default_bind_matches_constant() {
        let config = ServeConfig::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    }

    #[test]
    fn request_errors_are_client_errors() {
        assert_eq!(ServeError::NoFilePart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServeError::NoSelectedFile.status(), StatusCode::BAD_REQUEST);
        let decode = ServeError::Pipeline(PipelineError::Decode(
            lead_ingest::IngestError::NoWorksheet,
        ));
        assert_eq!(decode.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(decode.to_string(), "workbook has no worksheet");
    }
}
