// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, svg_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest painted frame
pub async fn graph_svg(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let frame = state.frames.borrow().clone();

    match svg_response(&frame, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Page embedding the graph in its container, reloading the frame every second
pub async fn graph_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(embed_page(state.width, state.height))
}

fn embed_page(width: u32, height: u32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Radial clock</title></head>
<body>
<div class="pachube-radial" style="width:{width}px;height:{height}px">
<img id="radial-frame" src="/graph.svg" width="{width}" height="{height}" alt="radial graph">
</div>
<script>
setInterval(function () {{
  document.getElementById("radial-frame").src = "/graph.svg?t=" + Date.now();
}}, 1000);
</script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::watch;

    #[tokio::test]
    async fn test_graph_svg_serves_latest_frame() {
        let (tx, rx) = watch::channel(Arc::<str>::from("<svg>first</svg>"));
        let state = Arc::new(AppState {
            frames: rx,
            width: 100,
            height: 100,
        });
        tx.send_replace(Arc::from("<svg>second</svg>"));

        let response = graph_svg(HeaderMap::new(), State(state))
            .await
            .into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<svg>second</svg>");
    }

    #[test]
    fn test_embed_page_sizes_container() {
        let page = embed_page(220, 200);
        assert!(page.contains(r#"class="pachube-radial" style="width:220px;height:200px""#));
        assert!(page.contains(r#"src="/graph.svg""#));
    }
}
