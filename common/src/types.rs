//! 抽出レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RecordId: プロセス内で一意なレコードID
//! - ExtractionStatus: processing → completed / error の状態
//! - ExtractionResult: 画像1枚ぶんの抽出レコード

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// レコードID（再利用されない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// 新しいIDを払い出す
    pub fn next() -> Self {
        RecordId(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

/// 抽出ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Processing,
    Completed,
    Error,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Processing => "processing",
            ExtractionStatus::Completed => "completed",
            ExtractionStatus::Error => "error",
        }
    }

    /// completed / error はそれ以上遷移しない
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExtractionStatus::Processing)
    }
}

/// 抽出レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub id: RecordId,

    /// 元画像への参照（ブラウザではObject URL、CLIではファイルパス）
    pub image_source: String,

    pub file_name: String,

    /// completed のときだけ意味を持つ
    #[serde(default)]
    pub extracted_text: String,

    pub status: ExtractionStatus,

    /// error のときだけ Some
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// 作成時刻（UNIXエポックからのミリ秒）
    pub timestamp: i64,
}

impl ExtractionResult {
    pub fn is_completed(&self) -> bool {
        self.status == ExtractionStatus::Completed
    }

    /// コピー・ダウンロード対象のテキスト（completed のときのみ）
    pub fn completed_text(&self) -> Option<&str> {
        self.is_completed().then_some(self.extracted_text.as_str())
    }
}

/// 追加前のレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub file_name: String,
    pub image_source: String,
    pub timestamp: i64,
}

/// processing から抜ける唯一の更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordUpdate {
    Complete(String),
    Fail(String),
}

impl RecordUpdate {
    pub fn from_outcome(outcome: crate::Result<String>) -> Self {
        match outcome {
            Ok(text) => RecordUpdate::Complete(text),
            Err(e) => RecordUpdate::Fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_record_ids_are_unique_and_increasing() {
        let a = RecordId::next();
        let b = RecordId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ExtractionStatus::Processing.is_terminal());
        assert!(ExtractionStatus::Completed.is_terminal());
        assert!(ExtractionStatus::Error.is_terminal());
    }

    #[test]
    fn test_status_serialize_lowercase() {
        let json = serde_json::to_string(&ExtractionStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_result_serialize_camel_case() {
        let result = ExtractionResult {
            id: RecordId(7),
            image_source: "blob:abc".to_string(),
            file_name: "scan.jpg".to_string(),
            extracted_text: "Hello".to_string(),
            status: ExtractionStatus::Completed,
            error_message: None,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"imageSource\":\"blob:abc\""));
        assert!(json.contains("\"extractedText\":\"Hello\""));
        assert!(!json.contains("errorMessage"));
    }

    #[test]
    fn test_completed_text_only_when_completed() {
        let mut result = ExtractionResult {
            id: RecordId(1),
            image_source: String::new(),
            file_name: "a.png".to_string(),
            extracted_text: String::new(),
            status: ExtractionStatus::Processing,
            error_message: None,
            timestamp: 0,
        };
        assert_eq!(result.completed_text(), None);

        result.status = ExtractionStatus::Completed;
        result.extracted_text = "text".to_string();
        assert_eq!(result.completed_text(), Some("text"));
    }

    #[test]
    fn test_update_from_outcome() {
        assert_eq!(
            RecordUpdate::from_outcome(Ok("abc".to_string())),
            RecordUpdate::Complete("abc".to_string())
        );
        assert_eq!(
            RecordUpdate::from_outcome(Err(Error::Auth("rejected".to_string()))),
            RecordUpdate::Fail("AUTH_FAILURE: rejected".to_string())
        );
    }
}
