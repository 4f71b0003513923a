//! HTTP response types for the ServiceNow API SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing response
//! status, headers and the raw body.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// An HTTP response from the ServiceNow API.
///
/// The body is read exactly once by the client and kept as raw bytes, so it
/// can serve both error classification and JSON decoding. Header names are
/// stored lowercased; a header may carry multiple values.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use servicenow_api::clients::HttpResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-total-count".to_string(), vec!["57".to_string()]);
///
/// let response = HttpResponse::new(200, headers, br#"{"result":[]}"#.to_vec());
/// assert!(response.is_ok());
/// assert_eq!(response.header("X-Total-Count"), Some("57"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    ///
    /// Header names are lowercased so lookups are case-insensitive.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });

        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values of the named header joined by `", "`.
    ///
    /// Servers may split a `Link` header over several header lines.
    #[must_use]
    pub fn header_joined(&self, name: &str) -> Option<String> {
        self.headers
            .get(&name.to_lowercase())
            .filter(|values| !values.is_empty())
            .map(|values| values.join(", "))
    }

    /// Returns `true` if the response has no body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Decodes the JSON body into `T`.
    ///
    /// Returns `Ok(None)` when the body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body is not valid JSON for `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, HttpError> {
        if self.body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(HttpError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Envelope {
        result: Vec<String>,
    }

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in pairs {
            map.entry((*k).to_string()).or_default().push((*v).to_string());
        }
        map
    }

    #[test]
    fn test_is_ok_range() {
        assert!(HttpResponse::new(200, HashMap::new(), Vec::new()).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), Vec::new()).is_ok());
        assert!(!HttpResponse::new(199, HashMap::new(), Vec::new()).is_ok());
        assert!(!HttpResponse::new(300, HashMap::new(), Vec::new()).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), Vec::new()).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, headers(&[("Link", "<a>; rel=\"next\"")]), Vec::new());

        assert_eq!(response.header("link"), Some("<a>; rel=\"next\""));
        assert_eq!(response.header("LINK"), Some("<a>; rel=\"next\""));
        assert_eq!(response.header("x-total-count"), None);
    }

    #[test]
    fn test_header_joined_merges_repeated_values() {
        let response = HttpResponse::new(
            200,
            headers(&[("link", "<a>; rel=\"first\""), ("link", "<b>; rel=\"next\"")]),
            Vec::new(),
        );

        assert_eq!(
            response.header_joined("Link").as_deref(),
            Some("<a>; rel=\"first\", <b>; rel=\"next\"")
        );
    }

    #[test]
    fn test_decode_empty_body_returns_none() {
        let response = HttpResponse::new(204, HashMap::new(), Vec::new());
        let decoded: Option<Envelope> = response.decode().unwrap();
        assert!(decoded.is_none());
        assert!(response.is_empty());
    }

    #[test]
    fn test_decode_valid_body() {
        let response = HttpResponse::new(200, HashMap::new(), br#"{"result":["a"]}"#.to_vec());
        let decoded: Option<Envelope> = response.decode().unwrap();
        assert_eq!(
            decoded,
            Some(Envelope {
                result: vec!["a".to_string()]
            })
        );
    }

    #[test]
    fn test_decode_invalid_body_is_decode_error() {
        let response = HttpResponse::new(200, HashMap::new(), b"not json".to_vec());
        let result: Result<Option<Envelope>, _> = response.decode();
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }
}
