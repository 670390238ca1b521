//! Preview server with optional live reload
//!
//! Post pages are rendered per request so an unknown slug produces a real
//! 404 response; everything else is served from the public directory.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render::{PostRenderer, RenderError};
use crate::{Blog, CONFIG_FILE};

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    renderer: RwLock<PostRenderer>,
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        renderer: RwLock::new(blog.renderer()?),
        public_dir: blog.public_dir.clone(),
        reload_tx,
        live_reload: watch,
    });

    let app = router(state.clone(), &blog.config.blog_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let blog = blog.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(blog, state) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>, blog_dir: &str) -> Router {
    let blog_dir = blog_dir.trim_matches('/');
    let post_route = if blog_dir.is_empty() {
        "/:slug".to_string()
    } else {
        format!("/{}/:slug", blog_dir)
    };

    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route(&post_route, get(post_handler))
        .route(&format!("{}/", post_route), get(post_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render a post, or the 404 page when the slug is unknown
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let renderer = state.renderer.read().await;
    match renderer.render_page(&slug) {
        Ok(page) => Html(state.decorate(&page.html)).into_response(),
        Err(RenderError::NotFound(_)) => not_found_response(&state, &renderer),
        Err(e) => {
            tracing::error!("Failed to render {}: {:#}", slug, anyhow::Error::new(e));
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

/// Serve generated files, falling back to the 404 page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => {
            let renderer = state.renderer.read().await;
            not_found_response(&state, &renderer)
        }
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

fn not_found_response(state: &ServerState, renderer: &PostRenderer) -> Response {
    match renderer.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(state.decorate(&html))).into_response(),
        Err(e) => {
            tracing::error!("Failed to render 404 page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

impl ServerState {
    /// Inject the live reload script when watching
    fn decorate(&self, html: &str) -> String {
        if self.live_reload {
            inject_live_reload(html)
        } else {
            html.to_string()
        }
    }
}

/// Watch sources and config, rebuild, and notify connected pages
fn watch_and_reload(blog: Blog, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&blog.source_dir, &blog.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = blog.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match rebuild(&blog.base_dir) {
                    Ok(renderer) => {
                        *state.renderer.blocking_write() = renderer;
                        tracing::info!("Regenerated successfully");
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Reload config and posts, regenerate the public directory
fn rebuild(base_dir: &std::path::Path) -> Result<PostRenderer> {
    let blog = Blog::new(base_dir)?;
    blog.generate()?;
    blog.renderer()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{MarkdownRenderer, Post, PostIndex};

    fn state(public_dir: PathBuf, live_reload: bool) -> Arc<ServerState> {
        let index: PostIndex = [Post::new("x", "T", "2024-01-01")].into_iter().collect();
        let renderer =
            PostRenderer::new(SiteConfig::default(), index, MarkdownRenderer::new()).unwrap();
        let (reload_tx, _) = broadcast::channel(1);
        Arc::new(ServerState {
            renderer: RwLock::new(renderer),
            public_dir,
            reload_tx,
            live_reload,
        })
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body>Hi</body></html>");
        assert!(html.contains("__livereload"));
        assert!(html.ends_with("</html>"));
        assert!(inject_live_reload("fragment").starts_with("fragment"));
    }

    #[tokio::test]
    async fn test_post_handler_renders_known_slug() {
        let dir = tempfile::tempdir().unwrap();
        let response = post_handler(
            State(state(dir.path().to_path_buf(), false)),
            Path("x".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_handler_unknown_slug_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = post_handler(
            State(state(dir.path().to_path_buf(), true)),
            Path("missing".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fallback_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .uri("/nothing-here.css")
            .body(Body::empty())
            .unwrap();
        let response =
            fallback_handler(State(state(dir.path().to_path_buf(), false)), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fallback_serves_public_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("robots.txt"), "User-agent: *").unwrap();
        let request = Request::builder()
            .uri("/robots.txt")
            .body(Body::empty())
            .unwrap();
        let response =
            fallback_handler(State(state(dir.path().to_path_buf(), false)), request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
