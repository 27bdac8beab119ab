//! Outgoing request model and its wire serialization.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use std::collections::BTreeMap;
use std::fmt;

/// Empty parameter list for calls that send none.
pub const NO_PARAMS: [(&str, &str); 0] = [];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request against a server-relative path.
///
/// Parameters live in a map, so each key appears at most once; adding a key
/// again replaces its value. GET requests send them as the query string, POST
/// requests as multipart form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl OutgoingRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), params: BTreeMap::new() }
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), params: BTreeMap::new() }
    }

    /// Add a parameter, coercing the value to a string.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Add every pair from `params`, coercing values to strings.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.params.extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// URL-encoded query string for the parameters, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Full URL for this request against `origin`.
    ///
    /// GET parameters are appended as a query string when present; POST
    /// parameters travel in the body and never appear in the URL.
    #[must_use]
    pub fn url(&self, origin: &str) -> String {
        let mut url = format!("{origin}{}", self.path);
        if self.method == Method::Get && !self.params.is_empty() {
            url.push(if self.path.contains('?') { '&' } else { '?' });
            url.push_str(&self.query_string());
        }
        url
    }

    /// Form fields in the order they are written to the multipart body.
    pub fn form_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Multipart form body, one text part per parameter.
    #[must_use]
    pub fn multipart_form(&self) -> reqwest::multipart::Form {
        self.form_fields()
            .fold(reqwest::multipart::Form::new(), |form, (k, v)| form.text(k.to_owned(), v.to_owned()))
    }
}
