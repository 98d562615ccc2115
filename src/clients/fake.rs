//! In-memory `Requester` used by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use reqwest::Method;
use serde_json::Value;

use crate::clients::errors::{Error, Result};
use crate::clients::genius::{Payload, Requester, Target};

#[derive(Default)]
pub struct FakeRequester {
    api: HashMap<String, Value>,
    pages: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRequester {
    pub fn new() -> Self {
        FakeRequester::default()
    }

    /// `key` is the path, followed by `?k=v&...` when the call carries params.
    pub fn with_api(mut self, key: &str, value: Value) -> Self {
        self.api.insert(key.to_string(), value);
        self
    }

    pub fn with_page(mut self, path: &str, html: &str) -> Self {
        self.pages.insert(path.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn key_for(path: &str, params: &[(&str, String)]) -> String {
    let path = path.trim_start_matches('/');
    if params.is_empty() {
        return path.to_string();
    }
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", query.join("&"))
}

impl Requester for FakeRequester {
    async fn call(
        &self,
        path: &str,
        _method: Method,
        params: &[(&str, String)],
        target: Target,
    ) -> Result<Payload> {
        let key = key_for(path, params);
        self.calls.borrow_mut().push(key.clone());
        let missing = || Error::RequestError {
            url: key.clone(),
            status: 404,
        };
        match target {
            Target::Api => self
                .api
                .get(&key)
                .cloned()
                .map(Payload::Json)
                .ok_or_else(missing),
            Target::Web => self
                .pages
                .get(&key)
                .cloned()
                .map(Payload::Page)
                .ok_or_else(missing),
        }
    }
}
