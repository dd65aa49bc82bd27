use std::time::Duration;

use async_trait::async_trait;
use euterpe_config::translator::TranslatorConfig;
use euterpe_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Build the provider named in the config
pub fn from_config(config: &TranslatorConfig) -> Result<Box<dyn Translator>, TranslateError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;
    let key = config.api_key.clone();
    let url = config.api_url.clone();

    match config.provider.to_lowercase().as_str() {
        "deepl" => Ok(Box::new(DeepLTranslator::with_client(client, key, url))),
        "libretranslate" => Ok(Box::new(LibreTranslator::with_client(client, key, url))),
        other => Err(TranslateError::UnknownProvider(other.to_string())),
    }
}

/// Map a provider's HTTP status onto the translator error space
fn check_status(status: reqwest::StatusCode) -> Result<(), TranslateError> {
    match status.as_u16() {
        429 => Err(TranslateError::RateLimitExceeded),
        401 | 403 => Err(TranslateError::AuthenticationError),
        _ if !status.is_success() => Err(TranslateError::ApiError(format!("HTTP {status}"))),
        _ => Ok(()),
    }
}

async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TranslateError> {
    response
        .json()
        .await
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {e}")))
}

/// DeepL REST API, free or pro endpoint depending on `api_url`
#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLText>,
}

#[derive(Deserialize)]
struct DeepLText {
    text: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, api_url)
    }

    pub fn with_client(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        // DeepL wants upper-case codes
        let source = from.to_uppercase();
        let target = to.to_uppercase();
        let form = [
            ("text", text),
            ("source_lang", source.as_str()),
            ("target_lang", target.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&form)
            .send()
            .await?;
        check_status(response.status())?;

        let body: DeepLResponse = read_body(response).await?;
        let first = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: first.text,
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

/// Self-hostable LibreTranslate instance
#[derive(Clone)]
pub struct LibreTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: String,
}

impl LibreTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, api_url)
    }

    pub fn with_client(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let request = LibreRequest {
            q: text,
            source: &from,
            target: &to,
            format: "text",
            api_key: (!self.api_key.is_empty()).then_some(self.api_key.as_str()),
        };

        let response = self.client.post(&self.api_url).json(&request).send().await?;
        check_status(response.status())?;
        let body: LibreResponse = read_body(response).await?;

        Ok(Translation {
            text: body.translated_text,
            from,
            to,
            provider: "libretranslate".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Form;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn deepl_sends_key_and_reads_first_translation() {
        let app = Router::new().route(
            "/v2/translate",
            post(|headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "DeepL-Auth-Key secret" {
                    return (StatusCode::FORBIDDEN, Json(serde_json::json!({})));
                }
                assert_eq!(form["source_lang"], "ES");
                assert_eq!(form["target_lang"], "EN");
                (
                    StatusCode::OK,
                    Json(serde_json::json!({ "translations": [{ "text": "slowly" }] })),
                )
            }),
        );
        let base = serve(app).await;

        let translator = DeepLTranslator::new("secret".to_string(), format!("{base}/v2/translate"));
        let out = translator
            .translate("despacito", "es".to_string(), "en".to_string())
            .await
            .unwrap();
        assert_eq!(out.text, "slowly");

        let wrong = DeepLTranslator::new("nope".to_string(), format!("{base}/v2/translate"));
        let err = wrong
            .translate("despacito", "es".to_string(), "en".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn deepl_without_key_fails_fast() {
        let translator = DeepLTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let err = translator
            .translate("hola", "es".to_string(), "en".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn libretranslate_posts_json() {
        let app = Router::new().route(
            "/translate",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["source"], "fr");
                assert_eq!(body["target"], "en");
                assert!(body.get("api_key").is_none());
                Json(serde_json::json!({ "translatedText": format!("[{}]", body["q"].as_str().unwrap()) }))
            }),
        );
        let base = serve(app).await;

        let translator = LibreTranslator::new(String::new(), format!("{base}/translate"));
        let out = translator
            .translate("bonjour", "fr".to_string(), "en".to_string())
            .await
            .unwrap();
        assert_eq!(out.text, "[bonjour]");
        assert_eq!(out.provider, "libretranslate");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = TranslatorConfig {
            provider: "babelfish".to_string(),
            ..TranslatorConfig::default()
        };
        assert!(matches!(
            from_config(&config),
            Err(TranslateError::UnknownProvider(_))
        ));
    }

    #[tokio::test]
    async fn configured_timeout_applies() {
        let app = Router::new().route(
            "/translate",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Json(serde_json::json!({ "translatedText": "late" }))
            }),
        );
        let base = serve(app).await;

        let config = TranslatorConfig {
            provider: "LibreTranslate".to_string(),
            api_url: format!("{base}/translate"),
            timeout_seconds: 1,
            ..TranslatorConfig::default()
        };
        let translator = from_config(&config).unwrap();
        let err = translator
            .translate("bonjour", "fr".to_string(), "en".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::NetworkError(_)));
    }
}
