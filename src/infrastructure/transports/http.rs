#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::StatusCode;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ByteStream;
use crate::domain::models::ChatRequest;
use crate::domain::models::StreamError;
use crate::domain::models::Transport;
use crate::domain::models::TransportError;

fn convert_err(err: reqwest::Error) -> StreamError {
    return StreamError(err.to_string());
}

/// Posts each submission as `multipart/form-data` to the chat endpoint and
/// hands the raw response body back as a byte stream.
pub struct HttpTransport {
    url: String,
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> HttpTransport {
        return HttpTransport::new(Config::get(ConfigKey::ChatURL));
    }
}

impl HttpTransport {
    pub fn new(url: String) -> HttpTransport {
        return HttpTransport {
            url,
            client: reqwest::Client::new(),
        };
    }

    fn form(request: ChatRequest) -> Result<Form, TransportError> {
        let mut form = Form::new().text("prompt", request.prompt);

        if let Some(image) = request.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str("image/jpeg")
                .map_err(|err| return TransportError::Network(err.to_string()))?;
            form = form.part("image", part);
        }

        return Ok(form);
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[allow(clippy::implicit_return)]
    async fn dispatch(&self, request: ChatRequest) -> Result<ByteStream, TransportError> {
        let has_image = request.image.is_some();
        let form = HttpTransport::form(request)?;

        let res = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, url = %self.url, "Chat endpoint is not reachable");
                return TransportError::Network(err.to_string());
            })?;

        let status = res.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::error!(status = status.as_u16(), has_image, "Chat request was too large");
            return Err(TransportError::PayloadTooLarge);
        }
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Failed to make chat request");
            return Err(TransportError::Status(status.as_u16()));
        }

        let stream = res.bytes_stream().map_err(convert_err);
        return Ok(Box::pin(stream));
    }
}
