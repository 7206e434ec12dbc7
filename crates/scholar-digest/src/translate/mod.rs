//! Abstract translation.
//!
//! [`Translator`] is the seam the pipeline calls through. [`GoogleTranslator`]
//! talks to the Google Translate web endpoint; [`NoopTranslator`] is selected
//! when translation is disabled and leaves abstracts untouched.

use reqwest_middleware::ClientWithMiddleware;

use crate::client::{build_http_client, handle_response};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Text substituted when a translation request fails.
pub const TRANSLATION_UNAVAILABLE: &str = "(translation unavailable)";

/// Translates abstracts for the report.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text`, returning `None` when no translation should be shown.
    ///
    /// Implementations never fail; a broken translation becomes
    /// [`TRANSLATION_UNAVAILABLE`].
    async fn translate(&self, text: &str) -> Option<String>;
}

/// Translator that never translates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

#[async_trait::async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Network translator backed by Google Translate.
#[derive(Clone)]
pub struct GoogleTranslator {
    client: ClientWithMiddleware,
    api_url: String,
    target: String,
}

impl GoogleTranslator {
    /// Create a translator into `target` (e.g. `zh-CN`).
    pub fn new(config: &Config, target: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            api_url: config.translate_api_url.clone(),
            target: target.into(),
        })
    }

    /// Translate, surfacing failures.
    pub async fn try_translate(&self, text: &str) -> ClientResult<String> {
        let query = [
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", self.target.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&query).send().await?;
        let response = handle_response(response).await?;
        let body: serde_json::Value = serde_json::from_str(&response.text().await?)?;

        parse_translation(&body)
    }
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        match self.try_translate(text).await {
            Ok(translated) => Some(translated),
            Err(e) => {
                tracing::warn!(error = %e, lang = %self.target, "Translation failed, using placeholder");
                Some(TRANSLATION_UNAVAILABLE.to_string())
            }
        }
    }
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator").field("target", &self.target).finish()
    }
}

/// Pick the translator the configuration asks for.
pub fn from_config(config: &Config) -> ClientResult<Box<dyn Translator>> {
    match &config.translate_to {
        Some(target) => Ok(Box::new(GoogleTranslator::new(config, target.clone())?)),
        None => Ok(Box::new(NoopTranslator)),
    }
}

/// Join the translated segments of a `translate_a/single` reply.
///
/// The reply looks like `[[["Hallo Welt","Hello world",null,null,1], ...], null, "en"]`.
fn parse_translation(body: &serde_json::Value) -> ClientResult<String> {
    let segments = body
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ClientError::UnexpectedResponse("missing translation segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(serde_json::Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(ClientError::UnexpectedResponse("empty translation".into()));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([[["Erster Satz. ", "First sentence. ", null, null, 1], ["Zweiter.", "Second.", null, null, 1]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "Erster Satz. Zweiter.");
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shape() {
        assert!(parse_translation(&json!({"error": "nope"})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn test_noop_translator_returns_none() {
        assert_eq!(NoopTranslator.translate("anything").await, None);
    }
}
