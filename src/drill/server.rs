// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::drill::get::get_handler;
use crate::drill::get::view_handler;
use crate::drill::post::post_handler;
use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::session::SessionController;
use crate::streak::StreakState;

/// Serve the session until the user ends it or hits Ctrl-C. Returns the
/// streak as it stood at the end.
pub async fn start_server<F: DefinitionFetcher>(
    session: SessionController<F>,
    port: u16,
    open_browser: bool,
) -> Fallible<StreakState> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        mutable: Arc::new(Mutex::new(session)),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler::<F>));
    let app = app.route("/", post(post_handler::<F>));
    let app = app.route("/view.json", get(view_handler::<F>));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown_rx => {},
                _ = ctrl_c() => {},
            }
        })
        .await?;
    let session = state.session();
    log::debug!(
        "Server stopped after {} lookups.",
        session.cache().fetch_count()
    );
    if !session.streak().is_durable() {
        log::warn!("The streak was kept in memory and has not been saved.");
    }
    Ok(session.streak().state())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
