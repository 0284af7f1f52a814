use crate::error::{NeuralynxError, Result};
use neuralynx_common::config::{API_KEY_ENV_VARS, DEFAULT_MODEL};
use neuralynx_common::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `~/.config/neuralynx/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NeuralynxError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("neuralynx").join("config.json"))
    }

    /// 環境変数を優先し、なければ設定ファイルのキーを使う
    pub fn api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.api_key.clone())
    }

    /// 抽出クライアント用の設定を組み立てる
    ///
    /// キーが無い・不正な場合は CONFIG_ERROR をそのまま返す（クライアント側で全件失敗になる）。
    pub fn extractor_config(&self, model_override: Option<&str>) -> neuralynx_common::Result<ExtractorConfig> {
        let model = model_override.unwrap_or(&self.model);
        ExtractorConfig::from_optional(self.api_key().as_deref()).map(|config| config.with_model(model))
    }

    /// 保存前に検証してからキーを設定
    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        neuralynx_common::config::validate_api_key(&key)?;
        self.api_key = Some(key.trim().to_string());
        Ok(())
    }
}
