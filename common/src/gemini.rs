//! Gemini API のリクエスト/レスポンス定義
//!
//! 通信そのものは各フロントエンド（WASMはfetch、CLIはreqwest）が行い、
//! ここではボディの組み立てと応答の解釈・エラー分類だけを扱う。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompts::{EXTRACTION_INSTRUCTION, NO_TEXT_PLACEHOLDER};

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Gemini APIレスポンス
///
/// ブロック時などは candidates / parts / text が欠けるので全部省略可能にする。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeminiResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

/// エラー応答 `{"error": {...}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiError {
    code: u16,
    message: String,
    status: String,
    details: Vec<serde_json::Value>,
}

/// 画像1枚ぶんの抽出リクエスト
pub fn build_request(image_base64: &str, mime_type: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_base64.to_string(),
                    },
                },
                Part::Text {
                    text: EXTRACTION_INSTRUCTION.to_string(),
                },
            ],
        }],
    }
}

/// 先頭候補のテキストを連結して返す
///
/// 空・空白のみ・欠落はエラーではなくプレースホルダを返す。
pub fn response_text(response: &GeminiResponse) -> String {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        NO_TEXT_PLACEHOLDER.to_string()
    } else {
        text
    }
}

/// 成功応答のボディを解析
pub fn parse_response(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    Ok(response_text(&response))
}

/// HTTPステータスとボディから結果を決める
pub fn interpret_response(status: u16, body: &str) -> Result<String> {
    if (200..300).contains(&status) {
        parse_response(body)
    } else {
        Err(classify_failure(status, body))
    }
}

/// 失敗応答の分類
///
/// 401/403、またはAPIキー不正を示す400は AUTH_FAILURE、それ以外は SYSTEM_FAILURE。
pub fn classify_failure(status: u16, body: &str) -> Error {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error);

    let message = match &api_error {
        Some(e) if !e.message.is_empty() => e.message.clone(),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => "応答本文なし".to_string(),
    };

    let key_rejected = api_error.as_ref().is_some_and(|e| {
        e.status == "UNAUTHENTICATED"
            || e.status == "PERMISSION_DENIED"
            || e.details
                .iter()
                .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
    }) || body.contains("API_KEY_INVALID")
        || body.contains("API key not valid");

    let code = api_error.as_ref().map(|e| e.code).filter(|c| *c != 0).unwrap_or(status);

    if matches!(status, 401 | 403) || key_rejected {
        Error::Auth(format!("APIキーが拒否されました（HTTP {}）: {}", code, message))
    } else {
        Error::System(format!("HTTP {}: {}", code, message))
    }
}
