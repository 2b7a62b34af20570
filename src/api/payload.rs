//! JSON body returned by the random image endpoint
//!
//! A typical response looks like
//! `{"message":"https://images.dog.ceo/breeds/hound/n02089.jpg","status":"success"}`.
//! Only `message` matters; anything else in the object is ignored.

use serde::Deserialize;

/// Successful response of the random image endpoint
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DogImagePayload {
    /// URL of the picked image
    pub message: String,
}

impl DogImagePayload {
    /// Parse a raw response body
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
