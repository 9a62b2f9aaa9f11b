//! Client configuration from environment variables.

use anyhow::Context;
use url::Url;

pub const DEFAULT_CHANNEL_URL: &str = "ws://localhost:13241/ws";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the push channel.
    pub channel_url: Url,
}

impl Config {
    /// Environment variables:
    /// - `READYVIEW_CHANNEL_URL`: push channel address
    ///   (default: "ws://localhost:13241/ws")
    pub fn from_env() -> anyhow::Result<Self> {
        let raw = std::env::var("READYVIEW_CHANNEL_URL")
            .unwrap_or_else(|_| DEFAULT_CHANNEL_URL.to_string());
        let channel_url = Url::parse(&raw)
            .with_context(|| format!("invalid READYVIEW_CHANNEL_URL: {raw:?}"))?;
        Ok(Self { channel_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channel_url_parses() {
        let url = Url::parse(DEFAULT_CHANNEL_URL).unwrap();
        assert_eq!(url.scheme(), "ws");
        assert_eq!(url.port(), Some(13241));
    }
}
