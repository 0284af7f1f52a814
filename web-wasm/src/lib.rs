//! Neuralynx Web App (Leptos + WASM)
//!
//! 画像をアップロードまたは撮影して、Geminiでテキストを抽出する。

mod api;
mod app;
mod browser;
mod camera;
mod components;

pub use api::gemini::FetchExtractor;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(app::App);
}
