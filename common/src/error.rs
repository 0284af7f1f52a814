//! エラー型定義
//!
//! 表示文字列は `CONFIG_ERROR: ...` のように分類タグから始まる。
//! レコードの `error_message` にはこの表示文字列がそのまま入る。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 画像以外の入力（レコードは作らない）
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),

    /// APIキー未設定・不正（リクエストは送らない）
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// サービス側でAPIキーが拒否された
    #[error("AUTH_FAILURE: {0}")]
    Auth(String),

    /// その他のネットワーク・サービスエラー
    #[error("SYSTEM_FAILURE: {0}")]
    System(String),

    /// ローカルファイルの読み込み失敗
    #[error("BUFFER_READ_FAILURE: {0}")]
    BufferRead(String),

    /// カメラ取得失敗・不正な状態遷移
    #[error("CAMERA_ERROR: {0}")]
    Camera(String),
}

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Config,
    Auth,
    System,
    BufferRead,
    Camera,
}

impl ErrorKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Config => "CONFIG_ERROR",
            ErrorKind::Auth => "AUTH_FAILURE",
            ErrorKind::System => "SYSTEM_FAILURE",
            ErrorKind::BufferRead => "BUFFER_READ_FAILURE",
            ErrorKind::Camera => "CAMERA_ERROR",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::Auth(_) => ErrorKind::Auth,
            Error::System(_) => ErrorKind::System,
            Error::BufferRead(_) => ErrorKind::BufferRead,
            Error::Camera(_) => ErrorKind::Camera,
        }
    }

    /// タグを除いたメッセージ本体
    pub fn detail(&self) -> &str {
        match self {
            Error::Validation(m)
            | Error::Config(m)
            | Error::Auth(m)
            | Error::System(m)
            | Error::BufferRead(m)
            | Error::Camera(m) => m,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::System(format!("レスポンスの解析に失敗: {}", e))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_has_tag_prefix() {
        let cases = vec![
            (Error::Validation("x".into()), "VALIDATION_ERROR: x"),
            (Error::Config("x".into()), "CONFIG_ERROR: x"),
            (Error::Auth("x".into()), "AUTH_FAILURE: x"),
            (Error::System("x".into()), "SYSTEM_FAILURE: x"),
            (Error::BufferRead("x".into()), "BUFFER_READ_FAILURE: x"),
            (Error::Camera("x".into()), "CAMERA_ERROR: x"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
            assert!(expected.starts_with(error.kind().tag()));
        }
    }

    #[test]
    fn test_error_detail() {
        let error = Error::System("接続がリセットされました".to_string());
        assert_eq!(error.detail(), "接続がリセットされました");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert_eq!(error.kind(), ErrorKind::System);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
