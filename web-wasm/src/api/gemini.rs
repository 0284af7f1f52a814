//! Gemini API連携（fetch版）
//!
//! リクエストの組み立てと応答の解釈は neuralynx_common::gemini を使い、
//! ここではブラウザのfetchで1回だけ送信する。

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use neuralynx_common::gemini::{build_request, interpret_response};
use neuralynx_common::{Error, ExtractorConfig, Result, TextExtractor};

use crate::browser::js_error_message;

/// ビルド時に埋め込まれたAPIキー
const BUILD_API_KEY: Option<&str> = match option_env!("GEMINI_API_KEY") {
    Some(key) => Some(key),
    None => option_env!("API_KEY"),
};

const BUILD_MODEL: Option<&str> = option_env!("GEMINI_MODEL");

/// fetchでGeminiを呼ぶ抽出クライアント
#[derive(Clone, Debug)]
pub struct FetchExtractor {
    config: Result<ExtractorConfig>,
}

impl FetchExtractor {
    pub fn new(config: Result<ExtractorConfig>) -> Self {
        Self { config }
    }

    /// ビルド環境の GEMINI_API_KEY（なければ API_KEY）から作る
    pub fn from_build_env() -> Self {
        let config = ExtractorConfig::from_optional(BUILD_API_KEY).map(|config| match BUILD_MODEL {
            Some(model) => config.with_model(model),
            None => config,
        });
        if let Err(e) = &config {
            tracing::warn!(error = %e, "extractor is not configured");
        }
        Self::new(config)
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_ok()
    }
}

#[async_trait(?Send)]
impl TextExtractor for FetchExtractor {
    async fn extract(&self, image_base64: &str, mime_type: &str) -> Result<String> {
        let config = self.config.as_ref().map_err(Clone::clone)?;

        let body = serde_json::to_string(&build_request(image_base64, mime_type))
            .map_err(|e| Error::System(e.to_string()))?;

        let (status, text) = post_json(&config.request_url(), &body)
            .await
            .map_err(|e| Error::System(js_error_message(&e)))?;

        tracing::debug!(status, model = %config.model, "gemini responded");
        interpret_response(status, &text)
    }
}

/// JSONをPOSTしてステータスと本文を返す
async fn post_json(url: &str, body: &str) -> std::result::Result<(u16, String), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}
