// HTTP response utilities for JSON+Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use bytes::Bytes;
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Whether the client advertised Brotli support
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// Serialize to JSON with optional Brotli compression
pub async fn json_response<T: Serialize>(
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json_bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!(error = %e, "JSON serialization error");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = if compress {
        let original_len = json_bytes.len();
        let mut encoder = BrotliEncoder::new(std::io::Cursor::new(json_bytes));
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await.map_err(|e| {
            tracing::error!(error = %e, "Brotli compression error");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(original_len, compressed_len = compressed.len(), "compressed response");
        (compressed, Some("br"))
    } else {
        (json_bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()))
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder
        .body(Body::from(Bytes::from(body_bytes)))
        .map_err(|e| {
            tracing::error!(error = %e, "Response build error");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
