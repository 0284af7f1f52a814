//! アップロードエリアコンポーネント
//!
//! ファイル選択・ドラッグ&ドロップ・カメラ起動の入口。
//! 画像かどうかの判定は呼び出し側（パイプライン）で行う。

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

fn collect_files(files: FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

#[component]
pub fn UploadArea<F, FC>(on_files: F, on_camera: FC) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<Input> = NodeRef::new();

    let on_drop = {
        let on_files = on_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                on_files(collect_files(files));
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = {
        let on_files = on_files.clone();
        move |_| {
            let Some(input) = input_ref.get() else {
                return;
            };
            if let Some(files) = input.files() {
                on_files(collect_files(files));
            }
            // 同じファイルを続けて選べるように
            input.set_value("");
        }
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <input
                type="file"
                accept="image/*"
                multiple=true
                class="hidden"
                node_ref=input_ref
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            <p>
                {move || if is_dragover.get() { "ここにドロップ" } else { "画像をドラッグ&ドロップ または 下のボタンから選択" }}
            </p>
            <p class="text-muted">"対応形式: image/* （JPEG, PNG, WebP など）"</p>
            <div class="upload-actions">
                <button class="btn btn-primary" on:click=open_picker>
                    "ファイルを選択"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click={
                        let on_camera = on_camera.clone();
                        move |_| on_camera(())
                    }
                >
                    "カメラで撮影"
                </button>
            </div>
        </div>
    }
}
