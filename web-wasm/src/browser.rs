//! ブラウザAPIの薄いラッパー
//!
//! Object URL、ファイル読み込み、クリップボード、テキストのダウンロード。

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use neuralynx_common::{Error, Result};

/// JsValueから読めるメッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// プレビュー用のObject URL
pub fn create_object_url(blob: &Blob) -> Result<String> {
    Url::create_object_url_with_blob(blob)
        .map_err(|e| Error::BufferRead(format!("プレビューを作成できません: {}", js_error_message(&e))))
}

pub fn revoke_object_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = Url::revoke_object_url(url);
    }
}

/// Blobの中身を読み込む
pub async fn read_blob_bytes(blob: Blob) -> Result<Vec<u8>> {
    let blob = gloo::file::Blob::from(blob);
    gloo::file::futures::read_as_bytes(&blob)
        .await
        .map_err(|e| Error::BufferRead(format!("ファイルを読み込めません: {}", e)))
}

/// クリップボードへテキストをそのまま書き込む
pub async fn copy_to_clipboard(text: &str) -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("Clipboard API unavailable"));
    }
    let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// テキストファイルとしてダウンロードさせる
pub fn download_text(file_name: &str, text: &str) -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("No body"))?;

    let parts = Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;
    Ok(())
}
