//! Connection target for a walletd daemon.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Scheme used when none is configured.
pub const DEFAULT_SCHEME: &str = "http";
/// Loopback host walletd listens on by default.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default walletd RPC port.
pub const DEFAULT_PORT: u16 = 8070;
/// Default JSON-RPC path prefix.
pub const DEFAULT_PREFIX: &str = "json_rpc";

/// Everything outside RFC 3986 unreserved characters is escaped in userinfo.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Basic credentials embedded as URL userinfo.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// RPC username
    pub username: String,
    /// RPC password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where a walletd daemon can be reached.
///
/// An `Endpoint` is a plain value; the HTTP backend composes it once into a
/// base URL of the form `scheme://[user:pass@]host:port[/prefix]`.
///
/// # Examples
///
/// ```
/// use transport::Endpoint;
///
/// let endpoint = Endpoint::new("h", 9000).with_credentials("u", "p");
/// assert_eq!(endpoint.base_url(), "http://u:p@h:9000/json_rpc");
///
/// let bare = Endpoint::new("h", 9000).without_prefix();
/// assert_eq!(bare.base_url(), "http://h:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    credentials: Option<Credentials>,
    host: String,
    port: u16,
    prefix: Option<String>,
}

impl Endpoint {
    /// Endpoint for `host:port` using the default scheme and prefix.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            credentials: None,
            host: host.into(),
            port,
            prefix: Some(DEFAULT_PREFIX.to_string()),
        }
    }

    /// Replaces the URL scheme (e.g. `https`).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Embeds credentials in the URL. An empty username clears them.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let username = username.into();
        self.credentials = if username.is_empty() {
            None
        } else {
            Some(Credentials { username, password: password.into() })
        };
        self
    }

    /// Sets the path prefix. An empty prefix is the same as no prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.prefix = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
        self
    }

    /// Removes the path prefix.
    pub fn without_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// URL scheme.
    pub fn scheme(&self) -> &str { &self.scheme }

    /// Embedded credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> { self.credentials.as_ref() }

    /// Host name or address.
    pub fn host(&self) -> &str { &self.host }

    /// TCP port.
    pub fn port(&self) -> u16 { self.port }

    /// Path prefix, if any.
    pub fn prefix(&self) -> Option<&str> { self.prefix.as_deref() }

    /// Composes `scheme://[user:pass@]host:port[/prefix]`.
    ///
    /// Username and password are percent-encoded, so reserved characters
    /// such as `/`, `#`, `?`, `@` or `:` survive URL parsing.
    pub fn base_url(&self) -> String {
        let mut url = format!("{}://", self.scheme);
        if let Some(creds) = &self.credentials {
            url.push_str(&format!(
                "{}:{}@",
                utf8_percent_encode(&creds.username, USERINFO),
                utf8_percent_encode(&creds.password, USERINFO)
            ));
        }
        url.push_str(&format!("{}:{}", self.host, self.port));
        if let Some(prefix) = &self.prefix {
            url.push('/');
            url.push_str(prefix);
        }
        url
    }
}

impl Default for Endpoint {
    fn default() -> Self { Self::new(DEFAULT_HOST, DEFAULT_PORT) }
}
