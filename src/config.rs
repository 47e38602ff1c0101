use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::widget_core::DEFAULT_REPLY_DELAY;

static DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3030";

/// Text and timing of the widget itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub title: String,
    pub greeting: String,
    pub empty_prompt: String,
    pub placeholder: String,
    pub reply_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            title: "Chatbot".into(),
            greeting: "Hi there! How can I help you today?".into(),
            empty_prompt: "How can I help you today?".into(),
            placeholder: "Ask".into(),
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Host and port the browser dials for the liveview websocket.
    pub reachable_addr: String,
}

impl ServerConfig {
    /// Reads `LISTEN_ADDR` and `REACHABLE_ADDR`, after loading `.env` if present.
    pub fn from_env() -> Result<ServerConfig> {
        dotenv().ok();
        ServerConfig::from_vars(
            std::env::var("LISTEN_ADDR").ok(),
            std::env::var("REACHABLE_ADDR").ok(),
        )
    }

    fn from_vars(listen: Option<String>, reachable: Option<String>) -> Result<ServerConfig> {
        let listen = listen.unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen
            .parse()
            .with_context(|| format!("LISTEN_ADDR is not a socket address: {listen}"))?;
        let reachable_addr = reachable.unwrap_or_else(|| listen_addr.to_string());
        Ok(ServerConfig {
            listen_addr,
            reachable_addr,
        })
    }
}
