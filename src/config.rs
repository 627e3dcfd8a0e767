//! Connector configuration.
//!
//! The configuration is validated when the connector is initialized and
//! discarded when it is disposed. Transport and authentication code reads it
//! through [`GraphConnector::configuration`](crate::connector::GraphConnector::configuration).

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Largest page the directory will return in one response.
pub const MAX_PAGE_SIZE: u32 = 999;

/// Settings for connecting to the remote directory.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfiguration {
    /// Directory (tenant) the connector provisions into
    pub tenant_id: String,
    /// Application (client) id used for the client-credentials grant
    pub client_id: String,
    /// Client secret; never printed
    pub client_secret: String,
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
    #[serde(default = "default_login_base_url")]
    pub login_base_url: String,
    #[serde(default)]
    pub proxy_host: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<u16>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_graph_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_login_base_url() -> String {
    DEFAULT_LOGIN_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl GraphConfiguration {
    /// Configuration with default endpoints and page size.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            graph_base_url: default_graph_base_url(),
            login_base_url: default_login_base_url(),
            proxy_host: None,
            proxy_port: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.proxy_host = Some(host.into());
        self.proxy_port = Some(port);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Parse a JSON configuration document and validate it.
    pub fn from_json_str(document: &str) -> ConfigResult<Self> {
        let configuration: GraphConfiguration = serde_json::from_str(document)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Check that every required property is present and well-formed.
    pub fn validate(&self) -> ConfigResult<()> {
        require("tenantId", &self.tenant_id)?;
        require("clientId", &self.client_id)?;
        require("clientSecret", &self.client_secret)?;
        require_http_url("graphBaseUrl", &self.graph_base_url)?;
        require_http_url("loginBaseUrl", &self.login_base_url)?;

        match (&self.proxy_host, self.proxy_port) {
            (Some(host), Some(_)) if !host.trim().is_empty() => {}
            (None, None) => {}
            _ => return Err(ConfigError::IncompleteProxy),
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::PageSizeOutOfRange {
                value: self.page_size,
                min: 1,
                max: MAX_PAGE_SIZE,
            });
        }

        Ok(())
    }

    /// Token endpoint for the configured tenant.
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_base_url.trim_end_matches('/'),
            self.tenant_id
        )
    }

    /// Collection endpoint such as `/users` or `/groups`.
    pub fn resource_url(&self, collection: &str) -> String {
        format!(
            "{}/{}",
            self.graph_base_url.trim_end_matches('/'),
            collection.trim_start_matches('/')
        )
    }
}

fn require(property: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::missing(property));
    }
    Ok(())
}

fn require_http_url(property: &str, value: &str) -> ConfigResult<()> {
    require(property, value)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            property: property.to_string(),
            value: value.to_string(),
        }),
    }
}

impl fmt::Debug for GraphConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfiguration")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"********")
            .field("graph_base_url", &self.graph_base_url)
            .field("login_base_url", &self.login_base_url)
            .field("proxy_host", &self.proxy_host)
            .field("proxy_port", &self.proxy_port)
            .field("page_size", &self.page_size)
            .finish()
    }
}
