//! Gemini API連携（reqwest版）

use async_trait::async_trait;
use neuralynx_common::gemini::{build_request, interpret_response};
use neuralynx_common::{Error, ExtractorConfig, Result, TextExtractor};

/// reqwestでGeminiを呼ぶ抽出クライアント
///
/// 設定エラーを抱えたまま作れる。その場合は通信せずに毎回そのエラーを返す。
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: reqwest::Client,
    config: Result<ExtractorConfig>,
}

impl HttpExtractor {
    pub fn new(config: Result<ExtractorConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> Result<&ExtractorConfig> {
        self.config.as_ref().map_err(Clone::clone)
    }
}

#[async_trait(?Send)]
impl TextExtractor for HttpExtractor {
    async fn extract(&self, image_base64: &str, mime_type: &str) -> Result<String> {
        let config = self.config()?;

        let response = self
            .client
            .post(config.request_url())
            .json(&build_request(image_base64, mime_type))
            .send()
            .await
            .map_err(|e| Error::System(format!("API呼び出しエラー: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::System(format!("応答の読み込みに失敗: {}", e.without_url())))?;

        tracing::debug!(status, model = %config.model, "gemini responded");
        interpret_response(status, &body)
    }
}
