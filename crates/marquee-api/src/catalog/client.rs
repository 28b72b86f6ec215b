//! `CatalogClient` - TMDB catalog API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::{FetchError, FetchResult};
use super::types::{ApiErrorBody, GenreList, ListPage, SearchParams};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default language tag appended to every request.
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB catalog client.
///
/// Authenticates with the `api_key` query parameter and pins a fixed
/// `language` on every request. Each call sends exactly one request;
/// nothing is retried.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key, sent as the `api_key` query parameter.
    api_key: String,
    /// Language tag, sent as the `language` query parameter.
    language: String,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            language: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// An absent or empty key is not a build error: the key is only
    /// checked server-side, so the failure surfaces as HTTP 401 on the
    /// first fetch.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the language tag (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_key: self.api_key.unwrap_or_default(),
            language: self.language.unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Sends one GET request with `api_key` and `language` appended to
    /// the query string, and classifies any failure.
    ///
    /// The full URL carries the key, so logging stays at the path level.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> FetchResult<T> {
        let url = self.base_url.join(path).map_err(|source| FetchError::Url {
            path: String::from(path),
            source,
        })?;

        let mut auth_query: Vec<(&str, &str)> = Vec::with_capacity(2);
        if !self.api_key.is_empty() {
            auth_query.push(("api_key", self.api_key.as_str()));
        }
        auth_query.push(("language", self.language.as_str()));

        tracing::debug!(%path, "catalog API request");

        let response = self
            .http_client
            .get(url)
            .query(&auth_query)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(error_body) => FetchError::Api {
                    status: status.as_u16(),
                    code: Some(error_body.status_code),
                    message: error_body.status_message,
                },
                Err(_) => FetchError::Api {
                    status: status.as_u16(),
                    code: None,
                    message: body,
                },
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            path: String::from(path),
            source,
        })
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn genres(&self) -> FetchResult<GenreList> {
        self.get_json("genre/movie/list", &[]).await
    }

    #[instrument(skip_all)]
    async fn trending_today(&self) -> FetchResult<ListPage> {
        self.get_json("trending/movie/day", &[]).await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self, page: u32) -> FetchResult<ListPage> {
        let query = [("page", page.to_string())];
        self.get_json("movie/top_rated", &query).await
    }

    #[instrument(skip_all)]
    async fn upcoming(&self, page: u32) -> FetchResult<ListPage> {
        let query = [("page", page.to_string())];
        self.get_json("movie/upcoming", &query).await
    }

    #[instrument(skip_all)]
    async fn now_playing(&self, page: u32) -> FetchResult<ListPage> {
        let query = [("page", page.to_string())];
        self.get_json("movie/now_playing", &query).await
    }

    #[instrument(skip_all)]
    async fn search_multi(&self, params: &SearchParams) -> FetchResult<ListPage> {
        let query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.get_json("search/multi", &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::catalog::types::MediaKind;

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CatalogClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_without_api_key_succeeds() {
        // Arrange & Act
        let client = CatalogClient::builder()
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert!(client.api_key.is_empty());
        assert_eq!(client.language, "en-US");
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3/").unwrap();

        // Act
        let client = CatalogClient::builder()
            .base_url(custom_url.clone())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[test]
    fn test_parse_trending_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/trending_day.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert!(page.results.len() > 6);
        let first = &page.results[0];
        assert_eq!(first.id, 693_134);
        assert_eq!(first.kind(), MediaKind::Movie);
        assert!(first.has_imagery());
    }

    #[test]
    fn test_parse_top_rated_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movie_top_rated.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert!(!page.results.is_empty());
        let first = &page.results[0];
        assert_eq!(first.display_title(), "The Shawshank Redemption");
        assert_eq!(first.release_year(), Some("1994"));
        // List endpoints omit the discriminator.
        assert_eq!(first.media_type, None);
    }

    #[test]
    fn test_parse_upcoming_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movie_upcoming.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!page.results.is_empty());
        assert!(page.total_results > 0);
    }

    #[test]
    fn test_parse_now_playing_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movie_now_playing.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!page.results.is_empty());
    }

    #[test]
    fn test_parse_genre_list_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/genre_movie_list.json");

        // Act
        let list: GenreList = serde_json::from_str(json).unwrap();

        // Assert
        assert!(list.genres.len() >= 12);
        assert_eq!(list.genres[0].id, 28);
        assert_eq!(list.genres[0].name, "Action");
    }

    #[test]
    fn test_parse_search_multi_fixture_keeps_mixed_kinds() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/search_multi_batman.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert: raw response still contains person entries
        assert!(
            page.results
                .iter()
                .any(|item| item.kind() == MediaKind::Person)
        );
        assert!(
            page.results
                .iter()
                .any(|item| item.kind() == MediaKind::Tv)
        );
    }

    #[test]
    fn test_parse_search_multi_empty_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/search_multi_empty.json");

        // Act
        let page: ListPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_parse_error_body() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: ApiErrorBody = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(!error.success);
        assert!(error.status_message.contains("Invalid API key"));
    }

    fn test_client(mock_uri: &str) -> CatalogClient {
        let base_url = format!("{mock_uri}/3/");
        CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_key_and_language_sent_as_query_params() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/search_multi_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/multi"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .and(wiremock::matchers::query_param("query", "test"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = SearchParams::new("test");

        // Act & Assert (mock expect(1) verifies the query params)
        client.search_multi(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_api_key_omits_query_param() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/genre_movie_list.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/genre/movie/list"))
            .and(wiremock::matchers::query_param_is_missing("api_key"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert
        client.genres().await.unwrap();
    }

    #[tokio::test]
    async fn test_trending_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/trending_day.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/trending/movie/day"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let page = client.trending_today().await.unwrap();

        // Assert
        assert!(!page.results.is_empty());
        assert_eq!(page.results[0].id, 693_134);
    }

    #[tokio::test]
    async fn test_top_rated_sends_page_param() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/movie_top_rated.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/top_rated"))
            .and(wiremock::matchers::query_param("page", "1"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let page = client.top_rated(1).await.unwrap();

        // Assert
        assert_eq!(page.results[0].display_title(), "The Shawshank Redemption");
    }

    #[tokio::test]
    async fn test_http_error_maps_to_api_variant() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let result = client.genres().await;

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Api {
                status: 401,
                code: Some(7),
                ..
            }
        ));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_http_error_without_json_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let result = client.trending_today().await;

        // Assert
        assert!(matches!(
            result.unwrap_err(),
            FetchError::Api {
                status: 404,
                code: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_invalid_body_maps_to_parse_variant() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let result = client.now_playing(1).await;

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
        assert!(err.to_string().contains("movie/now_playing"));
    }

    #[tokio::test]
    async fn test_rate_limited_request_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;

        // expect(1): the client must send exactly one request
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        // Act
        let result = client.upcoming(1).await;

        // Assert
        assert!(matches!(
            result.unwrap_err(),
            FetchError::Api {
                status: 429,
                code: Some(25),
                ..
            }
        ));
    }
}
