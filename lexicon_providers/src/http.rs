use lexicon_core::{Error, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

/// Longest error body kept in [`Error::Status`].
const MAX_ERROR_BODY: usize = 500;

pub fn transport(service: &'static str, err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout { service }
    } else {
        Error::Request {
            service,
            message: err.to_string(),
        }
    }
}

/// Send a request and decode a 2xx JSON body.
///
/// Non-2xx responses become [`Error::Status`] carrying (a prefix of) the
/// response body.
pub async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| transport(service, &e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport(service, &e))?;

    if !status.is_success() {
        return Err(Error::Status {
            service,
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
        service,
        reason: e.to_string(),
    })
}
