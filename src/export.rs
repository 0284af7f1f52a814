//! 抽出結果のファイル出力

use crate::error::Result;
use neuralynx_common::{download_file_name, export_text, ExtractionResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 書き出し先 `<出力先 or 画像のフォルダ>/<name>_extraction.txt`
pub fn export_path(image_path: &Path, file_name: &str, output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| image_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(download_file_name(file_name))
}

/// completed のレコードだけテキストを書き出す
///
/// 書き出したときはそのパスを返す。
pub fn write_export(record: &ExtractionResult, path: &Path) -> Result<Option<PathBuf>> {
    let Some(text) = export_text(record) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    Ok(Some(path.to_path_buf()))
}

/// 1回の実行で書き出したファイルを覚えておき、同名の出力を上書きしない
///
/// `scan.page1.png` と `scan.page2.png` はどちらも `scan_extraction.txt` になるので、
/// 2つ目以降は `scan_extraction (2).txt` のように番号を付ける。既存のファイルも避ける。
#[derive(Debug, Default)]
pub struct ExportSession {
    written: HashSet<PathBuf>,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// completed のレコードを重ならないパスに書き出す
    pub fn write(&mut self, record: &ExtractionResult, path: &Path) -> Result<Option<PathBuf>> {
        if export_text(record).is_none() {
            return Ok(None);
        }

        let target = self.free_path(path);
        let written = write_export(record, &target)?;
        if let Some(written) = &written {
            self.written.insert(written.clone());
        }
        Ok(written)
    }

    /// 実際に書き出したファイル数
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    fn free_path(&self, path: &Path) -> PathBuf {
        let is_taken = |p: &Path| self.written.contains(p) || p.exists();
        if !is_taken(path) {
            return path.to_path_buf();
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = path.extension().map(|e| e.to_string_lossy().to_string());

        (2..)
            .map(|n| {
                let name = match &ext {
                    Some(ext) => format!("{} ({}).{}", stem, n, ext),
                    None => format!("{} ({})", stem, n),
                };
                path.with_file_name(name)
            })
            .find(|candidate| !is_taken(candidate))
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// 全レコードをJSONで保存（新しい順）
pub fn write_json(records: &[ExtractionResult], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 1行サマリー
pub fn summary_line(record: &ExtractionResult) -> String {
    match (&record.error_message, record.is_completed()) {
        (_, true) => format!(
            "✔ {} ({}文字)",
            record.file_name,
            record.extracted_text.chars().count()
        ),
        (Some(message), false) => format!("✗ {}: {}", record.file_name, message),
        (None, false) => format!("… {}", record.file_name),
    }
}
