//! TMDB movie search client
//!
//! Issues `GET <search_url>?api_key=<key>&query=<term>` and decodes the
//! paginated envelope into [`MovieSummary`] records.

use super::envelope::{decode_page, lenient_string, ErrorBody};
use super::traits::SearchClient;
use crate::config::{ApiSettings, OutgoingSettings};
use crate::error::SearchError;
use crate::network::{ApiRequest, ApiResponse, HttpClient};
use crate::search::MovieSummary;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Statuses whose body is decoded; TMDB uses 400 for some empty searches
pub const ACCEPTABLE_STATUS: [u16; 3] = [200, 201, 400];

/// One entry of the `results` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub original_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overview: Option<String>,
}

impl From<MovieRecord> for MovieSummary {
    fn from(record: MovieRecord) -> Self {
        MovieSummary::new(
            record.poster_path.unwrap_or_default(),
            record.original_title.unwrap_or_default(),
            record.release_date.unwrap_or_default(),
            record.overview.unwrap_or_default(),
        )
    }
}

/// Movie search against the TMDB v3 API
pub struct MovieSearch {
    client: HttpClient,
    search_url: String,
    api_key: String,
}

impl MovieSearch {
    pub fn new(client: HttpClient, settings: &ApiSettings) -> Result<Self> {
        // Malformed endpoints fail here, not per query
        url::Url::parse(&settings.search_url)?;

        Ok(Self {
            client,
            search_url: settings.search_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Build a client with its own HTTP connection pool
    pub fn from_settings(api: &ApiSettings, outgoing: &OutgoingSettings) -> Result<Self> {
        let client = HttpClient::with_settings(outgoing)?;
        Self::new(client, api)
    }

    /// Build the HTTP request for a search
    pub fn request(&self, query: &str) -> ApiRequest {
        ApiRequest::get(&self.search_url)
            .param("api_key", &self.api_key)
            .param("query", query)
    }

    /// Parse the HTTP response into summaries
    pub fn response(&self, response: ApiResponse) -> Result<Vec<MovieSummary>, SearchError> {
        if !ACCEPTABLE_STATUS.contains(&response.status) {
            warn!("Movie search returned HTTP {}", response.status);
            return Err(Self::failure(&response));
        }

        match decode_page::<MovieRecord>(&response.text) {
            Ok(page) => {
                debug!(
                    "Decoded page {}/{} ({} total results)",
                    page.page, page.total_pages, page.total_results
                );
                Ok(page.results.into_iter().map(MovieSummary::from).collect())
            }
            Err(e) => {
                warn!("Failed to decode movie search response: {}", e);
                Err(Self::failure(&response))
            }
        }
    }

    /// Transport error using the provider's message when the body has one
    fn failure(response: &ApiResponse) -> SearchError {
        match ErrorBody::message_from(&response.text) {
            Some(message) => SearchError::transport(Some(response.status), message),
            None => SearchError::generic(Some(response.status)),
        }
    }
}

#[async_trait]
impl SearchClient for MovieSearch {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<MovieSummary>, SearchError> {
        let request = self.request(query);
        debug!("URL Request: {}", request.redacted_url("api_key"));

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Movie search request failed: {}", e);
            SearchError::generic(None)
        })?;

        self.response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search() -> MovieSearch {
        let settings = ApiSettings {
            search_url: "http://api.themoviedb.org/3/search/movie".to_string(),
            api_key: "key123".to_string(),
        };
        MovieSearch::new(HttpClient::new().unwrap(), &settings).unwrap()
    }

    fn response(status: u16, text: &str) -> ApiResponse {
        ApiResponse {
            status,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_request_url() {
        let request = search().request("star wars");
        assert_eq!(
            request.escaped_url(),
            "http://api.themoviedb.org/3/search/movie?api_key=key123&query=star%20wars"
        );
    }

    #[test]
    fn test_invalid_search_url_rejected() {
        let settings = ApiSettings {
            search_url: "not a url".to_string(),
            api_key: String::new(),
        };
        assert!(MovieSearch::new(HttpClient::new().unwrap(), &settings).is_err());
    }

    #[test]
    fn test_response_decodes_in_server_order() {
        let text = r#"{
            "page": 1, "total_pages": 1, "total_results": 2,
            "results": [
                {"poster_path": "/p1.jpg", "original_title": "Alien", "release_date": "1979-05-25", "overview": "In space"},
                {"poster_path": null, "original_title": "Aliens", "release_date": 1986, "id": 679}
            ]
        }"#;
        let movies = search().response(response(200, text)).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].poster_path, "/p1.jpg");
        assert_eq!(movies[0].title, "Alien");
        assert_eq!(movies[0].release_date, "1979-05-25");
        assert_eq!(movies[0].overview, "In space");
        assert_eq!(movies[1].poster_path, "");
        assert_eq!(movies[1].title, "Aliens");
        assert_eq!(movies[1].release_date, "");
        assert_eq!(movies[1].overview, "");
    }

    #[test]
    fn test_created_status_is_decoded() {
        let text = r#"{"page":1,"total_pages":1,"total_results":1,
            "results":[{"poster_path":"/h.jpg","original_title":"Heat","release_date":"1995-12-15","overview":"Crime"}]}"#;
        let movies = search().response(response(201, text)).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Heat");
        assert_eq!(movies[0].poster_path, "/h.jpg");
    }

    #[test]
    fn test_bad_request_status_is_decoded() {
        let text = r#"{"page":1,"total_pages":0,"total_results":0,"results":[]}"#;
        let movies = search().response(response(400, text)).unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_bad_request_without_envelope_uses_provider_message() {
        let text = r#"{"errors":["query must be provided"],"status_message":"query must be provided"}"#;
        let err = search().response(response(400, text)).unwrap_err();
        assert_eq!(err, SearchError::transport(Some(400), "query must be provided"));
    }

    #[test]
    fn test_unacceptable_status() {
        let text = r#"{"status_code":7,"status_message":"Invalid API key","success":false}"#;
        let err = search().response(response(401, text)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");
        assert_eq!(err.status(), Some(401));

        let err = search().response(response(502, "Bad Gateway")).unwrap_err();
        assert_eq!(err, SearchError::generic(Some(502)));
    }

    #[test]
    fn test_malformed_body() {
        let err = search().response(response(200, "{\"results\": 5}")).unwrap_err();
        assert_eq!(err, SearchError::generic(Some(200)));
    }
}
