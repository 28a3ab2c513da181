//! The seam between the app and the remote vision-language model.

use thiserror::Error;

use crate::encode::EncodedPayload;

/// Failures talking to the model service.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request never produced a response (network, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Model service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

/// An image attached inline to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineImage<'a> {
    pub mime_type: &'static str,
    pub data: &'a [u8],
}

impl<'a> From<&'a EncodedPayload> for InlineImage<'a> {
    fn from(payload: &'a EncodedPayload) -> Self {
        Self {
            mime_type: payload.mime_type(),
            data: payload.as_bytes(),
        }
    }
}

/// One text-generation request: a prompt and an optional image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    pub image: Option<InlineImage<'a>>,
}

impl<'a> GenerateRequest<'a> {
    pub fn text(prompt: &'a str) -> Self {
        Self {
            prompt,
            image: None,
        }
    }

    pub fn with_image(prompt: &'a str, payload: &'a EncodedPayload) -> Self {
        Self {
            prompt,
            image: Some(payload.into()),
        }
    }
}

/// A model that answers a prompt, optionally about an image, with text.
pub trait VisionModel {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ModelError>;
}

impl<M: VisionModel + ?Sized> VisionModel for &M {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ModelError> {
        (**self).generate(request)
    }
}

impl<M: VisionModel + ?Sized> VisionModel for Box<M> {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ModelError> {
        (**self).generate(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::CompressionFormat;

    #[test]
    fn test_request_from_payload() {
        let payload = EncodedPayload::new(vec![0xFF, 0xD8, 0xFF], CompressionFormat::Jpeg);
        let request = GenerateRequest::with_image("describe", &payload);

        let image = request.image.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_text_request_has_no_image() {
        let request = GenerateRequest::text("hello");
        assert_eq!(request.prompt, "hello");
        assert!(request.image.is_none());
    }

    #[test]
    fn test_boxed_model_delegates() {
        struct Echo;
        impl VisionModel for Echo {
            fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ModelError> {
                Ok(request.prompt.to_uppercase())
            }
        }

        let model: Box<dyn VisionModel> = Box::new(Echo);
        assert_eq!(model.generate(&GenerateRequest::text("hi")).unwrap(), "HI");
    }
}
