// Posts API HTTP client.
// Handles URL construction, default headers and status checking.

use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::Config;
use crate::error::{PostdeckError, Result};

use super::types::Post;

/// HTTP client for the posts API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| PostdeckError::InvalidRequest(format!("{}: {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("postdeck"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a post's image.
    pub fn image_url(&self, post: &Post) -> String {
        format!("{}{}", self.base_url, post.image_url)
    }

    /// Make a GET request to the API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::check_response(response)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).query(params).send().await?;
        Self::check_response(response)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, endpoint);
        Url::parse(&raw).map_err(|e| PostdeckError::InvalidRequest(format!("{}: {}", raw, e)))
    }

    /// Anything but 200 is a failed request.
    fn check_response(response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            status => {
                let url = response.url().to_string();
                tracing::warn!(status = status.as_u16(), %url, "request failed");
                Err(PostdeckError::BadStatus {
                    status: status.as_u16(),
                    url,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:6969/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:6969");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url");
        assert!(matches!(result, Err(PostdeckError::InvalidRequest(_))));
    }

    #[test]
    fn test_image_url() {
        let client = ApiClient::new("http://localhost:6969").unwrap();
        let post = Post {
            id: 3,
            title: "Post 3".to_string(),
            image_url: "/static/pic_3.png".to_string(),
            description: String::new(),
        };
        assert_eq!(
            client.image_url(&post),
            "http://localhost:6969/static/pic_3.png"
        );
    }
}
