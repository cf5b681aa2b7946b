use crate::domain::a001_predefined_item::ui::list::PredefinedItemsPage;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Shell>
            <PredefinedItemsPage />
        </Shell>
    }
}
