use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::clients::errors::{Error, Result};

pub const API_URL: &str = "https://api.genius.com";
pub const WEB_URL: &str = "https://genius.com";
pub const TOKEN_ENV_VAR: &str = "GENIUS_ACCESS_TOKEN";
const CLIENT_ID: &str = "lyricist";

/// Which of the two Genius hosts a call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// JSON API, responses are decoded and unwrapped from their envelope
    Api,
    /// Public web front-end, responses are returned as raw markup
    Web,
}

/// Body of a successful call.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Page(String),
}

impl Payload {
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Page(_) => Err(Error::ParseError(
                "expected a JSON response, got a web page".into(),
            )),
        }
    }

    pub fn into_page(self) -> Result<String> {
        match self {
            Payload::Page(page) => Ok(page),
            Payload::Json(_) => Err(Error::ParseError(
                "expected a web page, got a JSON response".into(),
            )),
        }
    }
}

/// Issues authenticated calls against the Genius API and web front-end.
#[allow(async_fn_in_trait)]
pub trait Requester {
    async fn call(
        &self,
        path: &str,
        method: Method,
        params: &[(&str, String)],
        target: Target,
    ) -> Result<Payload>;

    async fn api_get(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        self.call(path, Method::GET, params, Target::Api)
            .await?
            .into_json()
    }

    async fn web_page(&self, path: &str) -> Result<String> {
        self.call(path, Method::GET, &[], Target::Web)
            .await?
            .into_page()
    }
}

// Picks the explicit token if given, otherwise the environment's. Empty counts as missing.
pub fn resolve_token(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    explicit
        .or(from_env)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            Error::ConfigurationError(format!(
                "Missing Genius access token. Pass --token or set {TOKEN_ENV_VAR}."
            ))
        })
}

pub struct GeniusRequester {
    client: Client,
    api_url: String,
    web_url: String,
}

impl GeniusRequester {
    pub fn new(access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_ID));
        let bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| Error::ConfigurationError(format!("Invalid access token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(GeniusRequester {
            client,
            api_url: API_URL.to_string(),
            web_url: WEB_URL.to_string(),
        })
    }

    // Create a requester from an explicit token or the GENIUS_ACCESS_TOKEN environment variable
    pub fn try_default(access_token: Option<String>) -> Result<Self> {
        let token = resolve_token(access_token, std::env::var(TOKEN_ENV_VAR).ok())?;
        Self::new(&token)
    }

    #[must_use]
    pub fn with_base_urls(mut self, api_url: &str, web_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self.web_url = web_url.trim_end_matches('/').to_string();
        self
    }

    fn url_for(&self, path: &str, target: Target) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = match target {
            Target::Api => &self.api_url,
            Target::Web => &self.web_url,
        };
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

impl Requester for GeniusRequester {
    async fn call(
        &self,
        path: &str,
        method: Method,
        params: &[(&str, String)],
        target: Target,
    ) -> Result<Payload> {
        let url = self.url_for(path, target);
        debug!("{method} {url} {params:?}");
        let response = self
            .client
            .request(method, &url)
            .query(params)
            .send()
            .await?;

        if target == Target::Web {
            return Ok(Payload::Page(response.text().await?));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RequestError {
                url,
                status: status.as_u16(),
            });
        }
        let body: Value = response.json().await?;
        Ok(Payload::Json(unwrap_envelope(body)))
    }
}

// API responses look like {"meta": {...}, "response": {...}}
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("response") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}
