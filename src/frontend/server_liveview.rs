use anyhow::{Context, Result};
use axum::{extract::ws::WebSocketUpgrade, response::Html, routing::get, Router};
use indoc::formatdoc;

use super::app::app;
use crate::config::ServerConfig;

// Scrolls the message list to its newest entry whenever the widget bumps
// `data-scroll-seq`, and once when the list first mounts.
static SCROLL_SCRIPT: &str = r#"
new MutationObserver(() => {
    const list = document.getElementById("message-list");
    if (list && list.dataset.scrolled !== list.dataset.scrollSeq) {
        list.dataset.scrolled = list.dataset.scrollSeq;
        list.scrollTop = list.scrollHeight;
    }
}).observe(document.getElementById("main"), {
    subtree: true,
    childList: true,
    attributes: true,
    attributeFilter: ["data-scroll-seq"],
});
"#;

fn index_page(ws_url: &str) -> String {
    formatdoc!(
        r#"
        <!DOCTYPE html>
        <html>
            <head>
                <title>Chatbot</title>
                <meta name="viewport"
                content="width=device-width,
                initial-scale=1,
                minimum-scale=1,
                maximum-scale=1,
                user-scalable=no">
            </head>
            <body>
                <div id="main"></div>
                <script>{scroll}</script>
            </body>
            {glue}
        </html>
        "#,
        scroll = SCROLL_SCRIPT,
        glue = dioxus_liveview::interpreter_glue(ws_url)
    )
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let page = index_page(&format!("ws://{}/ws", config.reachable_addr));
    let view = dioxus_liveview::LiveViewPool::new();

    let router = Router::new()
        .route("/", get(move || async move { Html(page) }))
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    tracing::debug!("liveview session opened");
                    if let Err(err) = view.launch(dioxus_liveview::axum_socket(socket), app).await {
                        tracing::warn!("liveview session failed: {:?}", err);
                    }
                })
            }),
        );

    tracing::info!("Listening on http://{}", config.listen_addr);

    axum::Server::try_bind(&config.listen_addr)
        .with_context(|| format!("failed to bind {}", config.listen_addr))?
        .serve(router.into_make_service())
        .await
        .context("server stopped unexpectedly")
}
