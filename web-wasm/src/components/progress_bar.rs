//! 解析中インジケーター

use leptos::prelude::*;

#[component]
pub fn ProgressBar() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar indeterminate">
                <div class="progress-fill" />
            </div>
            <p class="progress-text">"テキストを解析中..."</p>
        </div>
    }
}
