//! 抽出テキストの書き出し
//!
//! ダウンロード・クリップボードはどちらも `extracted_text` をそのまま使う。

use crate::types::ExtractionResult;

const EXPORT_SUFFIX: &str = "_extraction.txt";
const FALLBACK_BASE_NAME: &str = "image";

/// ダウンロード用ファイル名 `<元ファイル名の最初の.より前>_extraction.txt`
pub fn download_file_name(file_name: &str) -> String {
    let base = file_name.split('.').next().unwrap_or_default();
    let base = if base.trim().is_empty() { FALLBACK_BASE_NAME } else { base };
    format!("{}{}", base, EXPORT_SUFFIX)
}

/// 書き出し対象のテキスト（completed のレコードのみ）
pub fn export_text(record: &ExtractionResult) -> Option<&str> {
    record.completed_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtractionStatus, RecordId};

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("receipt.jpg"), "receipt_extraction.txt");
        assert_eq!(
            download_file_name("camera_capture_1700000000000.png"),
            "camera_capture_1700000000000_extraction.txt"
        );
        assert_eq!(download_file_name("scan.page1.png"), "scan_extraction.txt");
        assert_eq!(download_file_name("no_ext"), "no_ext_extraction.txt");
    }

    #[test]
    fn test_download_file_name_empty_base() {
        assert_eq!(download_file_name(".png"), "image_extraction.txt");
        assert_eq!(download_file_name(""), "image_extraction.txt");
    }

    #[test]
    fn test_export_text_requires_completed() {
        let record = ExtractionResult {
            id: RecordId::next(),
            image_source: String::new(),
            file_name: "a.png".to_string(),
            extracted_text: String::new(),
            status: ExtractionStatus::Error,
            error_message: Some("SYSTEM_FAILURE: x".to_string()),
            timestamp: 0,
        };
        assert_eq!(export_text(&record), None);
    }
}
