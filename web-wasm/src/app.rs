//! メインアプリケーションコンポーネント

use leptos::html::{Canvas, Video};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{Blob, File};

use neuralynx_common::{
    capture_file_name, process_submission, validate_image_type, CameraSession, ExtractionResult,
    MediaStreamHandle, NewRecord, RecordId, RecordSink, RecordUpdate, ResultStore, Submission, CAPTURE_MIME_TYPE,
};

use crate::api::gemini::FetchExtractor;
use crate::browser::{create_object_url, read_blob_bytes, revoke_object_url};
use crate::camera::{canvas_to_blob, draw_frame, request_rear_camera, CameraStream};
use crate::components::{
    camera_view::CameraView, header::Header, notice_banner::NoticeBanner,
    result_feed::ResultFeed, upload_area::UploadArea,
};

/// シグナル上のストア
///
/// コンポーネント破棄後に届いた結果は捨てる。
#[derive(Clone, Copy)]
struct FeedStore(RwSignal<ResultStore>);

impl RecordSink for FeedStore {
    fn append(&self, record: NewRecord) -> RecordId {
        self.0
            .try_update(|store| store.append(record))
            .unwrap_or_else(RecordId::next)
    }

    fn settle(&self, id: RecordId, update: RecordUpdate) -> bool {
        self.0
            .try_update(|store| store.update(id, update))
            .unwrap_or(false)
    }
}

/// 画像の投入口（ファイル・カメラ共通）
#[derive(Clone, Copy)]
struct Feed {
    store: FeedStore,
    extractor: StoredValue<FetchExtractor>,
    notice: WriteSignal<Option<String>>,
}

impl Feed {
    fn notify(self, message: String) {
        self.notice.try_set(Some(message));
    }

    /// 1枚ぶんの処理を開始する
    fn submit(self, blob: Blob, file_name: String) {
        let mime_type = blob.type_();
        if let Err(e) = validate_image_type(&mime_type) {
            tracing::info!(file = %file_name, mime = %mime_type, "skipped non-image file");
            self.notify(format!("{}: {}", file_name, e.detail()));
            return;
        }

        let image_source = match create_object_url(&blob) {
            Ok(url) => url,
            Err(e) => {
                self.notify(e.to_string());
                return;
            }
        };

        let Some(extractor) = self.extractor.try_get_value() else {
            revoke_object_url(&image_source);
            return;
        };

        let submission = Submission {
            file_name,
            mime_type,
            image_source: image_source.clone(),
            timestamp: js_sys::Date::now() as i64,
        };

        spawn_local(async move {
            let result =
                process_submission(&self.store, &extractor, submission, read_blob_bytes(blob)).await;
            if let Err(e) = result {
                revoke_object_url(&image_source);
                self.notify(e.to_string());
            }
        });
    }
}

/// 確認が取れたときだけ全件削除する
///
/// 確認ダイアログはシグナルの外で出し、キャンセル時は購読側に通知しない。
fn clear_feed<F>(store: RwSignal<ResultStore>, confirm: F) -> Vec<ExtractionResult>
where
    F: FnOnce(usize) -> bool,
{
    let count = store.with_untracked(ResultStore::len);
    if count == 0 || !confirm(count) {
        return Vec::new();
    }
    store.try_update(ResultStore::clear).unwrap_or_default()
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let store = RwSignal::new(ResultStore::new());
    let (notice, set_notice) = signal(None::<String>);

    let extractor = FetchExtractor::from_build_env();
    let credential_ok = extractor.is_configured();

    let feed = Feed {
        store: FeedStore(store),
        extractor: StoredValue::new(extractor),
        notice: set_notice,
    };

    // MediaStreamはスレッド間で共有できないのでローカル保持
    let camera = StoredValue::new_local(CameraSession::<CameraStream>::new());
    let (camera_active, set_camera_active) = signal(false);
    let video_ref: NodeRef<Video> = NodeRef::new();
    let canvas_ref: NodeRef<Canvas> = NodeRef::new();

    // プレビュー要素が現れたらストリームをつなぐ
    Effect::new(move |_| {
        if !camera_active.get() {
            return;
        }
        if let Some(video) = video_ref.get() {
            camera.try_with_value(|session| {
                video.set_src_object(session.handle().map(CameraStream::media_stream));
            });
        }
    });

    on_cleanup(move || {
        camera.try_update_value(|session| session.stop());
    });

    let on_files = move |files: Vec<File>| {
        for file in files {
            let file_name = file.name();
            feed.submit(file.into(), file_name);
        }
    };

    let on_camera = move |_| {
        if camera.try_with_value(|session| session.is_active()).unwrap_or(true) {
            return;
        }
        spawn_local(async move {
            match request_rear_camera().await {
                Ok(stream) => {
                    if camera.is_disposed() {
                        stream.stop_all_tracks();
                        return;
                    }
                    match camera.try_update_value(|session| session.activate(stream)) {
                        Some(Ok(())) => {
                            set_camera_active.try_set(true);
                        }
                        Some(Err(e)) => feed.notify(e.to_string()),
                        None => {}
                    }
                }
                Err(e) => feed.notify(e.to_string()),
            }
        });
    };

    let on_capture = move |_| {
        let (Some(video), Some(canvas)) = (video_ref.get_untracked(), canvas_ref.get_untracked())
        else {
            return;
        };

        let grabbed = camera.try_update_value(|session| session.capture(|_| draw_frame(&video, &canvas)));
        set_camera_active.set(false);

        match grabbed {
            Some(Ok(())) => spawn_local(async move {
                match canvas_to_blob(&canvas, CAPTURE_MIME_TYPE).await {
                    Ok(blob) => {
                        let file_name = capture_file_name(js_sys::Date::now() as i64);
                        feed.submit(blob, file_name);
                    }
                    Err(e) => feed.notify(e.to_string()),
                }
            }),
            Some(Err(e)) => feed.notify(e.to_string()),
            None => {}
        }
    };

    let on_stop = move |_| {
        camera.try_update_value(|session| session.stop());
        set_camera_active.set(false);
    };

    let on_remove = move |id: RecordId| {
        if let Some(removed) = store.try_update(|s| s.remove(id)).flatten() {
            revoke_object_url(&removed.image_source);
        }
    };

    let on_clear = move |_| {
        let removed = clear_feed(store, |count| {
            gloo::dialogs::confirm(&format!("{}件の結果をすべて削除しますか？", count))
        });
        for record in &removed {
            revoke_object_url(&record.image_source);
        }
        if !removed.is_empty() {
            tracing::info!(count = removed.len(), "cleared all results");
        }
    };

    view! {
        <div class="container">
            <Header credential_ok=credential_ok />

            <NoticeBanner notice=notice on_dismiss=move |_| set_notice.set(None) />

            <Show
                when=move || camera_active.get()
                fallback=move || view! { <UploadArea on_files=on_files on_camera=on_camera /> }
            >
                <CameraView
                    video_ref=video_ref
                    canvas_ref=canvas_ref
                    on_capture=on_capture
                    on_stop=on_stop
                />
            </Show>

            <Show
                when=move || store.with(|s| !s.is_empty())
                fallback=|| view! { <p class="text-muted">"抽出結果はまだありません"</p> }
            >
                <ResultFeed store=store on_remove=on_remove on_clear=on_clear />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn store_with(names: &[&str]) -> RwSignal<ResultStore> {
        let mut store = ResultStore::new();
        for name in names {
            store.append(NewRecord {
                file_name: name.to_string(),
                image_source: format!("blob:{}", name),
                timestamp: 0,
            });
        }
        RwSignal::new(store)
    }

    #[wasm_bindgen_test]
    fn cancelled_clear_keeps_records() {
        let store = store_with(&["a.png", "b.png"]);
        let mut asked = None;

        let removed = clear_feed(store, |count| {
            asked = Some(count);
            false
        });

        assert!(removed.is_empty());
        assert_eq!(asked, Some(2));
        assert_eq!(store.with_untracked(ResultStore::len), 2);
    }

    #[wasm_bindgen_test]
    fn confirmed_clear_returns_removed_records() {
        let store = store_with(&["a.png", "b.png"]);

        let removed = clear_feed(store, |_| true);

        assert_eq!(removed.len(), 2);
        assert!(store.with_untracked(ResultStore::is_empty));
    }

    #[wasm_bindgen_test]
    fn empty_feed_never_asks() {
        let store = store_with(&[]);
        let removed = clear_feed(store, |_| panic!("confirm should not be shown"));
        assert!(removed.is_empty());
    }
}
