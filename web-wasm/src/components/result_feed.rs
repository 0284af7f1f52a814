//! 抽出結果フィード
//!
//! 新しい順に並べる。キーに状態を含め、状態が変わったカードは描き直す。

use leptos::prelude::*;

use neuralynx_common::{RecordId, ResultStore};

use crate::components::result_card::ResultCard;

#[component]
pub fn ResultFeed<FR, FC>(store: RwSignal<ResultStore>, on_remove: FR, on_clear: FC) -> impl IntoView
where
    FR: Fn(RecordId) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let summary = move || {
        store.with(|s| {
            let counts = s.counts();
            format!(
                "{}件（解析中 {} / 完了 {} / エラー {}）",
                s.len(),
                counts.processing,
                counts.completed,
                counts.error
            )
        })
    };

    view! {
        <section class="result-feed">
            <div class="feed-header">
                <h3>"抽出結果"</h3>
                <span class="text-muted">{summary}</span>
                <button
                    class="btn btn-small btn-tertiary"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "すべて削除"
                </button>
            </div>
            <div class="result-list">
                <For
                    each=move || store.with(|s| s.records().to_vec())
                    key=|record| (record.id, record.status)
                    children=move |record| {
                        let on_remove = on_remove.clone();
                        view! { <ResultCard record=record on_remove=on_remove /> }
                    }
                />
            </div>
        </section>
    }
}
