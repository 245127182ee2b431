use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, RequestBuilder, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

mod error;

pub mod members;

pub use error::{Error, Result};
pub use reqwest::StatusCode;

/// The default timeout for API requests
pub const DEFAULT_TIMEOUT: u64 = 20;
/// The hosted Orbit API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://app.orbit.love";

#[derive(Debug, Clone)]
pub struct Client {
    auth_header: HeaderValue,
    endpoint: Url,
    workspace: String,
    client: reqwest::Client,
}

pub mod client {
    pub fn new(api_key: &str, workspace: &str) -> crate::Result<crate::Client> {
        crate::Client::new(api_key, workspace)
    }
}

impl Client {
    /// Create a new client for the given workspace using the default
    /// endpoint and a default timeout.
    pub fn new(api_key: &str, workspace: &str) -> Result<Self> {
        Self::new_with_timeout(api_key, workspace, DEFAULT_TIMEOUT)
    }

    /// Create a new client for the given workspace and request timeout
    /// value. The library will use absolute paths scoped under the
    /// workspace based on the default endpoint.
    pub fn new_with_timeout(api_key: &str, workspace: &str, timeout: u64) -> Result<Self> {
        let auth_header = HeaderValue::from_str(api_key).map_err(|_| Error::MalformedApiKey)?;
        let endpoint = Url::parse(DEFAULT_ENDPOINT)?;
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(timeout))
            .build()?;
        Ok(Self {
            auth_header,
            endpoint,
            workspace: workspace.to_string(),
            client,
        })
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    fn request_url(&self, path: &str) -> Result<Url> {
        let mut uri = path.to_string();

        // Make sure we have the leading "/".
        if !uri.starts_with('/') {
            uri = format!("/{uri}");
        }

        self.endpoint.join(&uri).map_err(Error::from)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.request_url(path)?;

        // Set the default headers.
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, self.auth_header.clone());
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(self.client.request(method, url).headers(headers))
    }

    /// Fetch a json value from the given path. Any response status other
    /// than 200 OK is an error.
    pub async fn fetch<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::status(status));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Put a json body to the given path. The Orbit API signals a
    /// successful write with 204 No Content; any other status is an error.
    pub async fn put<T>(&self, path: &str, json: &T) -> Result
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .request(Method::PUT, path)?
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(json)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            return Err(Error::status(status));
        }
        Ok(())
    }
}

pub mod deserialize_null_string {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer).unwrap_or_default();

        Ok(s)
    }
}
