//! 抽出結果カードコンポーネント
//!
//! 画像プレビューと、状態に応じたテキスト欄（解析中 / エラー / 抽出テキスト）。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use neuralynx_common::{download_file_name, export_text, ExtractionResult, ExtractionStatus, RecordId};

use crate::browser::{copy_to_clipboard, download_text, js_error_message};
use crate::components::progress_bar::ProgressBar;

const COPIED_RESET_MS: u32 = 2_000;

#[component]
pub fn ResultCard<F>(record: ExtractionResult, on_remove: F) -> impl IntoView
where
    F: Fn(RecordId) + 'static + Clone + Send + Sync,
{
    let (copied, set_copied) = signal(false);
    let status_class = format!("result-card {}", record.status.as_str());
    let status_text = match record.status {
        ExtractionStatus::Processing => "解析中",
        ExtractionStatus::Completed => "完了",
        ExtractionStatus::Error => "エラー",
    };

    let actions = export_text(&record).map(|text| {
        let text = text.to_string();
        let export_name = download_file_name(&record.file_name);

        let on_copy = {
            let text = text.clone();
            move |_| {
                let text = text.clone();
                spawn_local(async move {
                    match copy_to_clipboard(&text).await {
                        Ok(()) => {
                            set_copied.try_set(true);
                            Timeout::new(COPIED_RESET_MS, move || {
                                set_copied.try_set(false);
                            })
                            .forget();
                        }
                        Err(e) => tracing::warn!(error = %js_error_message(&e), "copy failed"),
                    }
                });
            }
        };

        let on_download = move |_| {
            if let Err(e) = download_text(&export_name, &text) {
                tracing::warn!(error = %js_error_message(&e), "download failed");
            }
        };

        view! {
            <div class="card-actions">
                <button
                    class=move || if copied.get() { "btn btn-small btn-success" } else { "btn btn-small btn-secondary" }
                    on:click=on_copy
                >
                    {move || if copied.get() { "コピーしました" } else { "コピー" }}
                </button>
                <button class="btn btn-small btn-primary" on:click=on_download>
                    "テキスト保存"
                </button>
            </div>
        }
    });

    let body = match record.status {
        ExtractionStatus::Processing => view! { <ProgressBar /> }.into_any(),
        ExtractionStatus::Error => {
            let message = record
                .error_message
                .clone()
                .unwrap_or_else(|| "不明なエラー".to_string());
            view! {
                <div class="error-panel">
                    <p class="error-title">"抽出に失敗しました"</p>
                    <p>{message}</p>
                </div>
            }
            .into_any()
        }
        ExtractionStatus::Completed => view! {
            <pre class="extracted-text">{record.extracted_text.clone()}</pre>
        }
        .into_any(),
    };

    let id = record.id;

    view! {
        <div class=status_class>
            <div class="card-preview">
                <img src=record.image_source.clone() alt=record.file_name.clone() />
                <button
                    class="btn btn-small btn-tertiary remove-button"
                    title="この結果を削除"
                    on:click={
                        let on_remove = on_remove.clone();
                        move |_| on_remove(id)
                    }
                >
                    "✕"
                </button>
            </div>
            <div class="card-body">
                <div class="card-header">
                    <h4>{record.file_name.clone()}</h4>
                    <span class=format!("result-status {}", record.status.as_str())>{status_text}</span>
                    {actions}
                </div>
                {body}
            </div>
        </div>
    }
}
