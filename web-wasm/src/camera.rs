//! カメラ（getUserMedia）とフレーム取り込み

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

use neuralynx_common::{Error, MediaStreamHandle, Result};

use crate::browser::js_error_message;

/// getUserMediaで得たストリーム
pub struct CameraStream(MediaStream);

impl CameraStream {
    pub fn media_stream(&self) -> &MediaStream {
        &self.0
    }
}

impl MediaStreamHandle for CameraStream {
    fn stop_all_tracks(&self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        tracing::debug!("camera tracks stopped");
    }
}

/// 背面カメラ優先・音声なしで映像を要求
pub async fn request_rear_camera() -> Result<CameraStream> {
    let window = web_sys::window().ok_or_else(|| Error::Camera("No window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| Error::Camera("この環境ではカメラを利用できません".to_string()))?;

    let video = Object::new();
    Reflect::set(&video, &JsValue::from_str("facingMode"), &JsValue::from_str("environment"))
        .map_err(|e| Error::Camera(js_error_message(&e)))?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| Error::Camera(js_error_message(&e)))?;

    let stream = JsFuture::from(promise).await.map_err(|e| {
        Error::Camera(format!(
            "カメラにアクセスできません。権限を確認してください（{}）",
            js_error_message(&e)
        ))
    })?;

    stream
        .dyn_into::<MediaStream>()
        .map(CameraStream)
        .map_err(|_| Error::Camera("MediaStreamを取得できません".to_string()))
}

/// 現在の映像フレームをキャンバスに描画
pub fn draw_frame(video: &HtmlVideoElement, canvas: &HtmlCanvasElement) -> Result<()> {
    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(Error::Camera("映像がまだ準備できていません".to_string()));
    }

    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .map_err(|_| Error::Camera("Failed to get 2d context".to_string()))?
        .ok_or_else(|| Error::Camera("Context is null".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| Error::Camera("Failed to cast to 2d context".to_string()))?;

    context
        .draw_image_with_html_video_element_and_dw_and_dh(
            video,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )
        .map_err(|e| Error::Camera(js_error_message(&e)))
}

/// キャンバスの内容を画像Blobにする
pub async fn canvas_to_blob(canvas: &HtmlCanvasElement, mime_type: &str) -> Result<Blob> {
    let promise = Promise::new(&mut |resolve, reject| {
        let reject_now = reject.clone();
        let on_blob = Closure::once_into_js(move |blob: JsValue| {
            if blob.is_null() {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Canvas is empty"));
            } else {
                let _ = resolve.call1(&JsValue::NULL, &blob);
            }
        });
        if let Err(e) = canvas.to_blob_with_type(on_blob.unchecked_ref(), mime_type) {
            let _ = reject_now.call1(&JsValue::NULL, &e);
        }
    });

    let blob = JsFuture::from(promise)
        .await
        .map_err(|e| Error::Camera(format!("画像に変換できません: {}", js_error_message(&e))))?;
    blob.dyn_into::<Blob>()
        .map_err(|_| Error::Camera("Blobを取得できません".to_string()))
}
