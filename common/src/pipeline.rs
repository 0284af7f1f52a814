//! 画像1枚ぶんの処理パイプライン
//!
//! 検証 → レコード追加(processing) → 読み込み・Base64化 → 抽出 → completed / error
//!
//! レコード作成後の失敗はそのレコードにだけ記録し、呼び出し元には返さない。

use std::future::Future;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::acquisition::validate_image_type;
use crate::error::Result;
use crate::extractor::TextExtractor;
use crate::store::RecordSink;
use crate::types::{NewRecord, RecordId, RecordUpdate};

/// 取得済み画像の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub file_name: String,
    /// 宣言されたMIMEタイプ（`File.type` 相当）
    pub mime_type: String,
    pub image_source: String,
    pub timestamp: i64,
}

/// 画像を1枚処理する
///
/// 画像以外なら VALIDATION_ERROR を返し、レコードは作らない。
/// それ以外は必ずレコードを1件作り、終端状態まで進めてそのIDを返す。
/// 途中でレコードが削除されていれば結果は捨てられる。
pub async fn process_submission<S, E, R>(
    sink: &S,
    extractor: &E,
    submission: Submission,
    read: R,
) -> Result<RecordId>
where
    S: RecordSink + ?Sized,
    E: TextExtractor + ?Sized,
    R: Future<Output = Result<Vec<u8>>>,
{
    validate_image_type(&submission.mime_type)?;

    let Submission {
        file_name,
        mime_type,
        image_source,
        timestamp,
    } = submission;

    let id = sink.append(NewRecord {
        file_name: file_name.clone(),
        image_source,
        timestamp,
    });
    tracing::debug!(%id, file = %file_name, mime = %mime_type, "extraction started");

    let outcome = match read.await {
        Ok(bytes) => {
            let encoded = STANDARD.encode(&bytes);
            extractor.extract(&encoded, &mime_type).await
        }
        Err(e) => Err(e),
    };

    match &outcome {
        Ok(text) => tracing::debug!(%id, chars = text.chars().count(), "extraction completed"),
        Err(e) => tracing::warn!(%id, file = %file_name, error = %e, "extraction failed"),
    }

    if !sink.settle(id, RecordUpdate::from_outcome(outcome)) {
        tracing::debug!(%id, "record no longer present; result dropped");
    }

    Ok(id)
}
