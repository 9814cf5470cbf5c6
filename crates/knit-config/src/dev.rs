//! Development server configuration types.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::options::helpers::{default_host, default_true, is_false};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DevServerOptions {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Hot module replacement
    #[serde(default = "default_true")]
    pub hot: bool,

    /// Full page reload when a change cannot be hot-applied
    #[serde(default = "default_true")]
    pub live_reload: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub open: bool,

    /// Serve index.html for unknown paths (single-page apps)
    #[serde(default, skip_serializing_if = "is_false")]
    pub history_api_fallback: bool,

    /// Directory containing static assets to serve in development
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,

    /// Extra response headers
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,

    /// Proxies keyed by request path prefix
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub proxy: IndexMap<String, ProxyOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<HttpsOptions>,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            hot: true,
            live_reload: true,
            open: false,
            history_api_fallback: false,
            static_dir: None,
            headers: IndexMap::new(),
            proxy: IndexMap::new(),
            https: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProxyOptions {
    /// Upstream URL (http, https, ws or wss)
    pub target: String,

    /// Proxy websocket upgrades
    #[serde(default, skip_serializing_if = "is_false")]
    pub ws: bool,

    /// Rewrite the Host header to the target
    #[serde(default, skip_serializing_if = "is_false")]
    pub change_origin: bool,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,

    /// Pattern removed from the request path before forwarding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<String>,
}

/// TLS material for serving over https
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HttpsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<PathBuf>,
}
