// HTTP response utilities for SVG frames
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// True when the request advertises Brotli in `Accept-Encoding`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|enc| enc.trim().starts_with("br")))
        .unwrap_or(false)
}

/// Serve an SVG document, Brotli-compressed when `compress` is set.
pub async fn svg_response(svg: &str, compress: bool) -> Result<Response<Body>, StatusCode> {
    let payload = if compress {
        let mut encoder = BrotliEncoder::new(std::io::Cursor::new(svg.as_bytes()));
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        compressed
    } else {
        svg.as_bytes().to_vec()
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, SVG_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, payload.len());
    if compress {
        response = response.header(header::CONTENT_ENCODING, HeaderValue::from_static("br"));
    }

    response.body(Body::from(payload)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
