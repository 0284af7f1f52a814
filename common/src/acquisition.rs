//! 画像取得まわりの共通処理
//!
//! - validate_image_type: 宣言されたMIMEタイプが画像か判定
//! - capture_file_name: カメラ撮影時のファイル名生成
//! - mime_type_from_path: 拡張子からMIMEタイプを推定（CLI用）

use std::path::Path;

use crate::error::{Error, Result};

/// カメラ撮影画像のMIMEタイプ
pub const CAPTURE_MIME_TYPE: &str = "image/png";

const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// MIMEタイプが `image/` で始まるか検証
pub fn validate_image_type(mime_type: &str) -> Result<()> {
    if mime_type.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        let shown = if mime_type.is_empty() { "不明" } else { mime_type };
        Err(Error::Validation(format!(
            "画像ファイルではありません（{}）",
            shown
        )))
    }
}

/// カメラ撮影画像のファイル名
pub fn capture_file_name(timestamp_ms: i64) -> String {
    format!("camera_capture_{}.png", timestamp_ms)
}

/// 拡張子からMIMEタイプを推定
pub fn mime_type_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_image_types() {
        assert!(validate_image_type("image/jpeg").is_ok());
        assert!(validate_image_type("image/png").is_ok());
        assert!(validate_image_type("image/svg+xml").is_ok());
        assert!(validate_image_type("IMAGE/PNG").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_images() {
        for mime in ["application/pdf", "text/plain", "", "video/mp4", "imagex/png"] {
            let err = validate_image_type(mime).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", mime);
        }
    }

    #[test]
    fn test_capture_file_name() {
        assert_eq!(
            capture_file_name(1_700_000_000_123),
            "camera_capture_1700000000123.png"
        );
    }

    #[test]
    fn test_mime_type_from_path() {
        assert_eq!(mime_type_from_path(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_from_path(Path::new("dir/b.png")), Some("image/png"));
        assert_eq!(mime_type_from_path(Path::new("c.webp")), Some("image/webp"));
        assert_eq!(mime_type_from_path(Path::new("notes.txt")), None);
        assert_eq!(mime_type_from_path(Path::new("no_extension")), None);
    }
}
