use crate::routes::routes::AppRoutes;
use crate::shared::toast::ToastService;
use crate::system::session::Session;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Resolve auth/tenant scope once at startup; every tenant-scoped API
    // call reads this context instead of re-deriving it per request.
    provide_context(Session::resolve());

    // Provide ToastService for transient notifications
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
    }
}
