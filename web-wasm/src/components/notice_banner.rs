//! 一時的な通知バナー

use leptos::prelude::*;

#[component]
pub fn NoticeBanner<F>(notice: ReadSignal<Option<String>>, on_dismiss: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || notice.get().is_some()>
            <div class="notice" role="alert">
                <span>{move || notice.get().unwrap_or_default()}</span>
                <button
                    class="btn btn-small btn-tertiary"
                    on:click={
                        let on_dismiss = on_dismiss.clone();
                        move |_| on_dismiss(())
                    }
                >
                    "閉じる"
                </button>
            </div>
        </Show>
    }
}
