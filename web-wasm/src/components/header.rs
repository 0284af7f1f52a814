//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(credential_ok: bool) -> impl IntoView {
    let (badge_class, badge_text) = if credential_ok {
        ("status-badge active", "APIキー設定済み")
    } else {
        ("status-badge missing", "APIキー未設定")
    };

    view! {
        <header class="header">
            <h1>"Neuralynx - 画像テキスト抽出"</h1>
            <span class=badge_class>{badge_text}</span>
        </header>
    }
}
