//! Neuralynx CLI
//!
//! 画像ファイルからGeminiでテキストを抽出し、`<name>_extraction.txt` に書き出す。

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod export;
pub mod scanner;
