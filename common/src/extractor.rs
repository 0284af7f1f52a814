//! テキスト抽出クライアントの共通インターフェース

use async_trait::async_trait;

use crate::error::Result;

/// 画像（Base64）からテキストを取り出すクライアント
///
/// 1回の呼び出しにつきリクエストは1回だけ。呼び出し間で状態は持たない。
/// WASMではFutureが `Send` にならないので `?Send`。
#[async_trait(?Send)]
pub trait TextExtractor {
    async fn extract(&self, image_base64: &str, mime_type: &str) -> Result<String>;
}
