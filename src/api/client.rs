use std::future::Future;

use reqwest::Client;
use tokio::task::JoinError;
use tracing::debug;

use super::payload::DogImagePayload;
use crate::error::FetchError;

/// Public endpoint that returns one random dog image per request
pub const DEFAULT_ENDPOINT: &str = "https://dog.ceo/api/breeds/image/random";

/// Client for the dog API
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool,
/// so every fetch task gets its own copy.
#[derive(Debug, Clone)]
pub struct DogApi {
    http: Client,
    endpoint: String,
}

impl DogApi {
    /// Create a client pointed at `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The random image endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the API for a random image and return its URL
    ///
    /// # Returns
    /// * `Ok(url)` - the `message` field of the response
    /// * `Err(FetchError::Status)` - the server answered with a non-2xx status
    /// * `Err(FetchError::Transport)` - the request never completed
    /// * `Err(FetchError::Decode)` - the body was not the expected JSON
    pub async fn random_image(&self) -> Result<String, FetchError> {
        let response = self.http.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, endpoint = %self.endpoint, "dog API answered with an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload = DogImagePayload::from_json(&body)?;

        Ok(payload.message)
    }

    /// Download the picture behind `url` so the image widget can draw it
    ///
    /// The body is sniffed before it is returned; a CDN error page served with
    /// a 200 would otherwise reach the widget as a broken image.
    pub async fn image_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let format = image::guess_format(&bytes)
            .map_err(|e| FetchError::Decode(format!("Not an image: {}", e)))?;

        debug!(?format, size = bytes.len(), %url, "downloaded image");

        Ok(bytes.to_vec())
    }
}

/// Run a fetch on its own tokio task
///
/// A panic inside the fetch must not take the UI down with it, so the future is
/// spawned and a dead task is turned into a `FetchError`. Panics with a string
/// payload keep their text; anything else becomes `FetchError::Unknown`.
pub async fn isolate<T, F>(future: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(future).await {
        Ok(result) => result,
        Err(join_err) => Err(describe_join_error(join_err)),
    }
}

fn describe_join_error(err: JoinError) -> FetchError {
    let Ok(payload) = err.try_into_panic() else {
        // Cancelled
        return FetchError::Unknown;
    };

    if let Some(message) = payload.downcast_ref::<&str>() {
        FetchError::Aborted((*message).to_string())
    } else if let Some(message) = payload.downcast_ref::<String>() {
        FetchError::Aborted(message.clone())
    } else {
        FetchError::Unknown
    }
}
