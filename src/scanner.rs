use crate::error::{NeuralynxError, Result};
use neuralynx_common::mime_type_from_path;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 拡張子から推定できないときの種別（パイプラインで画像以外として弾かれる）
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl ImageInfo {
    fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_type_from_path(path).unwrap_or(UNKNOWN_MIME_TYPE);

        Self {
            path: path.to_path_buf(),
            file_name,
            mime_type: mime_type.to_string(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// 指定されたパスを入力一覧に展開する
///
/// ファイルは拡張子に関わらずそのまま含める（画像以外の判定は抽出時）。
/// フォルダは画像拡張子のファイルだけを、ファイル名順で含める。
pub fn scan_paths(paths: &[PathBuf], recursive: bool) -> Result<Vec<ImageInfo>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_file() {
            inputs.push(ImageInfo::from_path(path));
        } else if path.is_dir() {
            inputs.extend(scan_folder(path, recursive)?);
        } else {
            return Err(NeuralynxError::PathNotFound(path.display().to_string()));
        }
    }

    Ok(inputs)
}

pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(NeuralynxError::PathNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| ImageInfo::from_path(e.path()))
        .filter(ImageInfo::is_image)
        .collect();

    images.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(NeuralynxError::PathNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.png")).unwrap();
        File::create(dir.path().join("a.JPG")).unwrap();
        File::create(dir.path().join("b.webp")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap();

        let images = scan_folder(dir.path(), false).unwrap();
        let names: Vec<_> = images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, ["a.JPG", "b.webp", "c.png"]);
        assert_eq!(images[0].mime_type, "image/jpeg");
    }

    #[test]
    fn test_recursive_scan() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        File::create(dir.path().join("top.jpg")).unwrap();
        File::create(sub.join("nested.png")).unwrap();

        assert_eq!(scan_folder(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_folder(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_non_image_file_is_kept() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("notes.pdf");
        File::create(&doc).unwrap();

        let inputs = scan_paths(&[doc], false).unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(!inputs[0].is_image());
        assert_eq!(inputs[0].mime_type, UNKNOWN_MIME_TYPE);
    }
}
