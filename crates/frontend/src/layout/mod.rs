use crate::shared::toast::ToastHost;
use leptos::prelude::*;

/// Application shell for the single-page admin panel.
///
/// ```text
/// +------------------------------------------+
/// |               Top bar                    |
/// +------------------------------------------+
/// |               Content                    |
/// +------------------------------------------+
/// ```
///
/// The toast outlet overlays everything and is rendered once here.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="app-header__title">"Item Catalog"</h1>
                <span class="app-header__subtitle">"Predefined items setup"</span>
            </header>

            <main class="app-main">
                {children()}
            </main>

            <ToastHost />
        </div>
    }
}
