//! Request and response types plus query-string escaping

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded in query keys and values, on top of control
/// characters and non-ASCII bytes
const QUERY_RESERVED: &AsciiSet = &CONTROLS
    .add(b'!')
    .add(b'*')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b';')
    .add(b':')
    .add(b'@')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'$')
    .add(b',')
    .add(b'/')
    .add(b'?')
    .add(b'%')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b' ');

/// Percent-encode a query key or value
pub fn escape(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_RESERVED).to_string()
}

/// HTTP GET request against a JSON API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// URL without query string
    pub url: String,
    /// Query parameters, sent in insertion order
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Escaped query string (`k=v&k2=v2`), empty when there are no params
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full URL with the escaped query string appended
    pub fn escaped_url(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }

    /// Escaped URL with the value of `secret_param` masked, for logging
    pub fn redacted_url(&self, secret_param: &str) -> String {
        let masked = Self {
            url: self.url.clone(),
            params: self
                .params
                .iter()
                .map(|(k, v)| {
                    if k == secret_param {
                        (k.clone(), "REDACTED".to_string())
                    } else {
                        (k.clone(), v.clone())
                    }
                })
                .collect(),
        };
        masked.escaped_url()
    }
}

/// HTTP response from an API request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.google.com.tr/search";

    #[test]
    fn test_space_is_escaped() {
        let request = ApiRequest::get(URL)
            .param("q", "soli taire")
            .param("oq", "sol");
        assert_eq!(
            request.escaped_url(),
            "https://www.google.com.tr/search?q=soli%20taire&oq=sol"
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let request = ApiRequest::get(URL)
            .param("q", "!*'();:@&=+$,/?%#[]")
            .param("oq", "sol");
        assert_eq!(
            request.escaped_url(),
            "https://www.google.com.tr/search?q=%21%2A%27%28%29%3B%3A%40%26%3D%2B%24%2C%2F%3F%25%23%5B%5D&oq=sol"
        );
    }

    #[test]
    fn test_no_params_leaves_url_untouched() {
        let request = ApiRequest::get(URL);
        assert_eq!(request.escaped_url(), URL);
        assert_eq!(request.query_string(), "");
    }

    #[test]
    fn test_percent_escaped_once() {
        assert_eq!(escape("%"), "%25");
        assert_eq!(escape("100%"), "100%25");
        // Already-escaped input is treated as raw text
        assert_eq!(escape("soli%20taire"), "soli%2520taire");
    }

    #[test]
    fn test_unreserved_characters_pass_through() {
        assert_eq!(escape("Blade-Runner_2049.v2~"), "Blade-Runner_2049.v2~");
        assert_eq!(escape("amélie"), "am%C3%A9lie");
        assert_eq!(escape("a\tb"), "a%09b");
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let request = ApiRequest::get("http://api.example.com/search")
            .param("api_key", "k")
            .param("query", "star wars");
        assert_eq!(request.query_string(), "api_key=k&query=star%20wars");
    }

    #[test]
    fn test_redacted_url() {
        let request = ApiRequest::get("http://api.example.com/search")
            .param("api_key", "secret")
            .param("query", "alien");
        assert_eq!(
            request.redacted_url("api_key"),
            "http://api.example.com/search?api_key=REDACTED&query=alien"
        );
    }
}
