//! Image transcoding proxy
//!
//! GET /image?url=<encoded>&format=<jpeg|png|webp> fetches the source
//! image, re-encodes it to the requested format, and serves it with a
//! 24-hour cache header. Transcoded payloads are memoized in the bounded
//! in-memory cache.

use std::io::Cursor;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;

/// JPEG re-encode quality
const JPEG_QUALITY: u8 = 80;
const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
struct ImageParams {
    url: String,
    format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetFormat {
    Jpeg,
    Png,
    Webp,
}

impl TargetFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(TargetFormat::Jpeg),
            "png" => Some(TargetFormat::Png),
            "webp" => Some(TargetFormat::Webp),
            _ => None,
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::Webp => "image/webp",
        }
    }

    /// Canonical cache-key form
    fn key(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::Webp => "webp",
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn image_response(format: TargetFormat, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type()),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        ],
        bytes,
    )
        .into_response()
}

/// Re-encode a decoded image to the target format
fn transcode(image: DynamicImage, format: TargetFormat) -> image::ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        TargetFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = image.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)?;
        }
        TargetFormat::Png => {
            image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        }
        TargetFormat::Webp => {
            let rgba = image.to_rgba8();
            let encoder = WebPEncoder::new_lossless(&mut buf);
            rgba.write_with_encoder(encoder)?;
        }
    }
    Ok(buf)
}

async fn serve_image(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Response {
    let Some(format) = TargetFormat::parse(&params.format) else {
        return error_body(StatusCode::BAD_REQUEST, "unsupported format");
    };

    let valid_url = url::Url::parse(&params.url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !valid_url {
        return error_body(StatusCode::BAD_REQUEST, "url must be http or https");
    }

    if let Some(cached) = state.image_cache.get(&params.url, format.key()) {
        return image_response(format, cached.as_ref().clone());
    }

    let source = match fetch_source(&state, &params.url).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    let transcoded = tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&source)?;
        transcode(decoded, format)
    })
    .await;

    let bytes = match transcoded {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::warn!(url = %params.url, error = %e, "Image transcode failed");
            return error_body(
                StatusCode::UNPROCESSABLE_ENTITY,
                "unsupported or corrupt image",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcode task panicked");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
        }
    };

    state
        .image_cache
        .insert(&params.url, format.key(), bytes.clone());

    image_response(format, bytes)
}

async fn fetch_source(state: &AppState, url: &str) -> Result<Vec<u8>, Response> {
    let response = state.http.get(url).send().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Source image fetch failed");
        error_body(StatusCode::BAD_GATEWAY, "failed to fetch source image")
    })?;

    if !response.status().is_success() {
        tracing::warn!(url = %url, status = %response.status(), "Source image fetch failed");
        return Err(error_body(
            StatusCode::BAD_GATEWAY,
            "failed to fetch source image",
        ));
    }

    let bytes = response.bytes().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Source image body read failed");
        error_body(StatusCode::BAD_GATEWAY, "failed to fetch source image")
    })?;

    Ok(bytes.to_vec())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/image", get(serve_image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_accepts_aliases() {
        assert_eq!(TargetFormat::parse("jpg"), Some(TargetFormat::Jpeg));
        assert_eq!(TargetFormat::parse("JPEG"), Some(TargetFormat::Jpeg));
        assert_eq!(TargetFormat::parse("webp"), Some(TargetFormat::Webp));
        assert_eq!(TargetFormat::parse("gif"), None);
    }

    #[test]
    fn transcode_png_to_jpeg_strips_alpha() {
        let rgba = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 128]));
        let bytes = transcode(DynamicImage::ImageRgba8(rgba), TargetFormat::Jpeg).unwrap();
        // JPEG magic bytes
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn transcode_to_webp_produces_riff_container() {
        let rgb = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        let bytes = transcode(DynamicImage::ImageRgb8(rgb), TargetFormat::Webp).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }
}
