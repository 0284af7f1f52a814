use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuralynxError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("パスが見つかりません: {0}")]
    PathNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error(transparent)]
    Extraction(#[from] neuralynx_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NeuralynxError>;
