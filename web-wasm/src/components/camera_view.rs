//! カメラプレビューコンポーネント

use leptos::html::{Canvas, Video};
use leptos::prelude::*;

#[component]
pub fn CameraView<FC, FS>(
    video_ref: NodeRef<Video>,
    canvas_ref: NodeRef<Canvas>,
    on_capture: FC,
    on_stop: FS,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="camera-view">
            <video node_ref=video_ref autoplay=true playsinline=true muted=true />
            <canvas node_ref=canvas_ref class="hidden" />
            <div class="camera-actions">
                <button
                    class="btn btn-tertiary"
                    title="カメラを停止"
                    on:click={
                        let on_stop = on_stop.clone();
                        move |_| on_stop(())
                    }
                >
                    "停止"
                </button>
                <button
                    class="btn btn-primary btn-capture"
                    title="撮影して抽出"
                    on:click={
                        let on_capture = on_capture.clone();
                        move |_| on_capture(())
                    }
                >
                    "撮影"
                </button>
            </div>
        </div>
    }
}
