//! Authenticated access to the BetaSeries API
//!
//! A [`Session`] is created once per member login. Construction performs the
//! credential exchange (unless no credentials are configured) and keeps the
//! resulting token for the lifetime of the session. Every endpoint operation
//! goes through [`Session::call`], which attaches the protocol headers, runs
//! exactly one HTTP round trip and decodes the response.
//!
//! The token is fetched once and never refreshed. Sharing a session between
//! threads is fine for issuing requests; re-authenticating means building a
//! new session.

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, IdPolicy, Query};
use crate::envelope::{Envelope, TokenEnvelope, decode, error_entries};
use crate::error::{BetaSeriesError, Result};
use crate::models::Token;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use std::fmt;
use tracing::{debug, info};
use url::Url;

const HEADER_ACCEPT: &str = "Accept";
const HEADER_VERSION: &str = "X-BetaSeries-Version";
const HEADER_KEY: &str = "X-BetaSeries-Key";
const HEADER_TOKEN: &str = "X-BetaSeries-Token";

const MEMBERS_AUTH: Endpoint = Endpoint::new(HttpMethod::Post, "/members/auth", IdPolicy::None);

/// Per-member handle used to issue every API call.
pub struct Session {
    base_url: Url,
    version: String,
    api_key: String,
    token: Option<Token>,
    transport: Box<dyn Transport>,
}

impl Session {
    /// Creates a session using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Fails with [`BetaSeriesError::InvalidBaseUrl`] for an unparsable base
    /// URL, with [`BetaSeriesError::Authentication`] when the service rejects
    /// the credentials, and with transport or decode errors otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use betaseries::{ClientConfig, Session};
    ///
    /// let config = ClientConfig::new("my-api-key").with_credentials("member", "secret");
    /// let session = Session::authenticate(&config).unwrap();
    /// assert!(session.is_authenticated());
    /// ```
    pub fn authenticate(config: &ClientConfig) -> Result<Self> {
        let transport = match config.timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Self::with_transport(config, transport)
    }

    /// Creates a session that sends its requests through `transport`.
    ///
    /// When `login` or `password` is empty no credential exchange takes
    /// place and the session stays anonymous.
    pub fn with_transport<T>(config: &ClientConfig, transport: T) -> Result<Self>
    where
        T: Transport + 'static,
    {
        let base_url = Url::parse(&config.base_url).map_err(|source| BetaSeriesError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let mut session = Self {
            base_url,
            version: config.version.clone(),
            api_key: config.api_key.clone(),
            token: None,
            transport: Box::new(transport),
        };

        if !config.has_credentials() {
            debug!("no credentials configured, using anonymous session");
            return Ok(session);
        }

        let token = session.retrieve_token(&config.login, &config.password)?;
        info!(login = %token.user.login, user_id = token.user.id, "authenticated");
        session.token = Some(token);

        Ok(session)
    }

    /// The token obtained at construction, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exchanges member credentials for a token.
    fn retrieve_token(&self, login: &str, password: &str) -> Result<Token> {
        let mut query = Query::new();
        query.set("login", login).set("password", hash_password(password));

        let response = self.send(&MEMBERS_AUTH, &query)?;

        if response.status != 200 {
            let status = response.status;
            let errors = error_entries(MEMBERS_AUTH.path, &response.body)?;
            return Err(BetaSeriesError::Authentication { status, errors });
        }

        match decode::<TokenEnvelope>(MEMBERS_AUTH.path, response) {
            Err(BetaSeriesError::Service { errors }) => {
                Err(BetaSeriesError::Authentication { status: 200, errors })
            }
            other => other,
        }
    }

    /// Builds the request for `endpoint`, headers included.
    pub(crate) fn prepare(&self, endpoint: &Endpoint, query: &Query) -> HttpRequest {
        let mut request = HttpRequest::new(endpoint.method, endpoint.url(&self.base_url, query));
        request.set_header(HEADER_ACCEPT, "application/json");
        request.set_header(HEADER_VERSION, &self.version);
        request.set_header(HEADER_KEY, &self.api_key);
        if let Some(token) = &self.token {
            request.set_header(HEADER_TOKEN, &token.token);
        }
        request
    }

    fn send(&self, endpoint: &Endpoint, query: &Query) -> Result<HttpResponse> {
        let request = self.prepare(endpoint, query);
        debug!(method = %request.method, path = endpoint.path, "sending request");

        let response = self.transport.execute(&request)?;
        debug!(path = endpoint.path, status = response.status, "received response");

        Ok(response)
    }

    /// Performs one round trip and decodes the body into `E`'s payload.
    pub(crate) fn call<E: Envelope>(&self, endpoint: &Endpoint, query: &Query) -> Result<E::Payload> {
        let response = self.send(endpoint, query)?;
        decode::<E>(endpoint.path, response)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Lowercase hex MD5 digest, the form `/members/auth` expects.
fn hash_password(password: &str) -> String {
    format!("{:x}", md5::compute(password.as_bytes()))
}
