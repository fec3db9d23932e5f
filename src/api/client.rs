use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use tracing::debug;

use super::error::ApiError;
use super::types::{CuratedPage, Photo};

const API_BASE: &str = "https://api.pexels.com/v1";

/// Pexels API client. The key is injected at construction so tests can
/// substitute both the key and the endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Client {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Fetches one page of the curated feed, in the provider's order.
    ///
    /// Records missing an image URL are dropped; other missing fields degrade
    /// to placeholders.
    pub async fn curated(&self, page: usize, per_page: usize) -> Result<Vec<Photo>, ApiError> {
        let url = format!(
            "{}/curated?page={}&per_page={}",
            self.base_url, page, per_page
        );
        debug!(page, per_page, "requesting curated page");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: CuratedPage =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        if parsed.next_page.is_none() {
            debug!(page, "provider reports no further pages");
        }
        let photos: Vec<Photo> = parsed.photos.into_iter().filter_map(Photo::from_wire).collect();
        debug!(
            page,
            count = photos.len(),
            total = parsed.total_results,
            "curated page fetched"
        );
        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn photo_json(id: u64, photographer: &str) -> serde_json::Value {
        json!({
            "id": id,
            "width": 4000,
            "height": 6000,
            "url": format!("https://www.pexels.com/photo/{id}/"),
            "photographer": photographer,
            "alt": format!("photo {id}"),
            "src": {
                "original": format!("https://images.pexels.com/{id}/original.jpg"),
                "medium": format!("https://images.pexels.com/{id}/medium.jpg")
            }
        })
    }

    #[tokio::test]
    async fn curated_sends_key_and_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/curated"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "6"))
            .and(header("Authorization", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "per_page": 6,
                "photos": [photo_json(7, "First"), photo_json(3, "Second"), photo_json(9, "Third")],
                "total_results": 8000,
                "next_page": "https://api.pexels.com/v1/curated?page=3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::with_base_url("test-key".to_string(), server.uri());
        let photos = client.curated(2, 6).await.unwrap();

        let ids: Vec<u64> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
        assert_eq!(photos[0].photographer, "First");
    }

    #[tokio::test]
    async fn curated_drops_records_without_images() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/curated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    photo_json(1, "Kept"),
                    { "id": 2, "photographer": "Dropped" },
                    photo_json(3, "Also kept")
                ],
                "next_page": null
            })))
            .mount(&server)
            .await;

        let client = Client::with_base_url("test-key".to_string(), server.uri());
        let photos = client.curated(1, 6).await.unwrap();

        let ids: Vec<u64> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn curated_maps_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/curated"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = Client::with_base_url("bad-key".to_string(), server.uri());
        let err = client.curated(1, 6).await.unwrap_err();

        assert!(matches!(err, ApiError::HttpStatus(401, _)));
        assert!(err.user_message().contains("API key"));
    }

    #[tokio::test]
    async fn curated_maps_malformed_body_to_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/curated"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = Client::with_base_url("test-key".to_string(), server.uri());
        let err = client.curated(1, 6).await.unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn curated_handles_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/curated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [],
                "next_page": null
            })))
            .mount(&server)
            .await;

        let client = Client::with_base_url("test-key".to_string(), server.uri());
        let photos = client.curated(99, 6).await.unwrap();
        assert!(photos.is_empty());
    }
}
