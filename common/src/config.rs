//! 抽出クライアントの設定
//!
//! APIキーは構築時に一度だけ検証する。未設定・空・プレースホルダは
//! CONFIG_ERROR として扱い、ネットワークには出ない。

use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// APIキーを読む環境変数（先頭優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

const PLACEHOLDER_KEYS: &[&str] = &[
    "undefined",
    "null",
    "none",
    "placeholder_api_key",
    "your_api_key",
    "your-api-key",
    "your_api_key_here",
    "gemini_api_key",
    "api_key",
    "changeme",
];

#[derive(Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl std::fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ExtractorConfig {
    /// APIキーを検証して設定を作る
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        validate_api_key(&api_key)?;
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// 値があれば検証、無ければ CONFIG_ERROR
    pub fn from_optional(api_key: Option<&str>) -> Result<Self> {
        match api_key {
            Some(key) => Self::new(key),
            None => Err(missing_key_error()),
        }
    }

    /// 実行環境の環境変数から読む
    pub fn from_env() -> Result<Self> {
        let key = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
        Self::from_optional(key.as_deref())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// generateContent のURL
    pub fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

fn missing_key_error() -> Error {
    Error::Config(format!(
        "APIキーが実行環境に見つかりません（{} を設定してください）",
        API_KEY_ENV_VARS.join(" または ")
    ))
}

/// 空・プレースホルダのキーを弾く
pub fn validate_api_key(api_key: &str) -> Result<()> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(missing_key_error());
    }
    if PLACEHOLDER_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
        return Err(Error::Config(format!(
            "APIキーがプレースホルダのままです: {}",
            key
        )));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(Error::Config("APIキーに空白が含まれています".to_string()));
    }
    Ok(())
}
