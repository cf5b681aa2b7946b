pub mod state;

use self::state::{create_state, ListPhase};
use super::details::ItemDetails;
use super::import::CsvImportDialog;
use crate::domain::a001_predefined_item::api::{self, ListQuery};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::search_input::SearchInput;
use crate::shared::download::download_bytes;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use contracts::domain::a001_predefined_item::PredefinedItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Which dialog overlays the list, if any. Opening one replaces whatever
/// was open before, so the dialogs never stack.
#[derive(Clone, Default)]
enum OpenDialog {
    #[default]
    None,
    /// `None` inside means create mode
    Form(Option<PredefinedItem>),
    Delete {
        id: String,
        name: String,
    },
    Import,
}

#[component]
pub fn PredefinedItemsPage() -> impl IntoView {
    let session = StoredValue::new(use_session());
    let toast = use_toast();

    let state = create_state();
    let items: RwSignal<Vec<PredefinedItem>> = RwSignal::new(Vec::new());
    let dialog: RwSignal<OpenDialog> = RwSignal::new(OpenDialog::None);
    let (deleting, set_deleting) = signal(false);
    let (exporting, set_exporting) = signal(false);

    // Reload the current page. Each call takes a fresh ticket; a response
    // that lost the race against a newer call is dropped on the floor.
    let load_items = move || {
        let mut ticket = 0;
        state.update(|s| ticket = s.begin_load());
        let query =
            state.with_untracked(|s| ListQuery::browse(s.page, &s.search, &s.category));
        let session = session.get_value();
        spawn_local(async move {
            match api::fetch_items(&session, &query).await {
                Ok(page) => {
                    let has_rows = !page.items.is_empty();
                    let mut applied = false;
                    state.update(|s| {
                        applied = s.apply_page(
                            ticket,
                            page.current_page,
                            page.total_pages,
                            page.total_elements,
                            has_rows,
                        )
                    });
                    if applied {
                        items.set(page.items);
                    }
                }
                Err(e) => {
                    let mut applied = false;
                    state.update(|s| applied = s.fail_load(ticket));
                    if applied {
                        items.set(Vec::new());
                        toast.error(format!("Failed to load items: {}", e));
                    }
                }
            }
        });
    };

    // Distinct categories for the filter dropdown, via the oversized-page
    // workaround. Failures only get logged; the dropdown keeps its old list.
    let load_categories = move || {
        let session = session.get_value();
        spawn_local(async move {
            match api::fetch_items(&session, &ListQuery::fetch_all()).await {
                Ok(page) => {
                    let mut categories: Vec<String> = page
                        .items
                        .into_iter()
                        .filter_map(|item| item.category)
                        .filter(|c| !c.trim().is_empty())
                        .collect();
                    categories.sort();
                    categories.dedup();
                    state.update(|s| s.categories = categories);
                }
                Err(e) => leptos::logging::log!("Failed to load categories: {}", e),
            }
        });
    };

    // Edit needs the full record; there is no single-item endpoint, so scan
    // an oversized page for the id, exactly like the category loader.
    let open_edit = move |id: String| {
        let session = session.get_value();
        spawn_local(async move {
            match api::fetch_items(&session, &ListQuery::fetch_all()).await {
                Ok(page) => {
                    match page.items.into_iter().find(|item| item.id.as_string() == id) {
                        Some(item) => dialog.set(OpenDialog::Form(Some(item))),
                        None => toast.error("Item not found"),
                    }
                }
                Err(e) => toast.error(format!("Failed to load item details: {}", e)),
            }
        });
    };

    let confirm_delete = move |id: String| {
        let session = session.get_value();
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_item(&session, &id).await {
                Ok(()) => {
                    toast.success("Item deleted successfully");
                    dialog.set(OpenDialog::None);
                    load_items();
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_deleting.set(false);
        });
    };

    let handle_export = move |_| {
        let session = session.get_value();
        set_exporting.set(true);
        spawn_local(async move {
            match api::export_csv(&session).await {
                Ok(export) => {
                    let filename = export
                        .filename
                        .unwrap_or_else(api::default_export_filename);
                    match download_bytes(&export.bytes, "text/csv;charset=utf-8;", &filename) {
                        Ok(()) => toast.success("CSV exported successfully"),
                        Err(e) => toast.error(format!("Failed to export CSV: {}", e)),
                    }
                }
                Err(e) => toast.error(format!("Failed to export CSV: {}", e)),
            }
            set_exporting.set(false);
        });
    };

    // initial load
    load_items();
    load_categories();

    let close_dialog = move || dialog.set(OpenDialog::None);
    let reload_all = move || {
        close_dialog();
        load_items();
        load_categories();
    };

    view! {
        <div class="page" id="a001_predefined_item--list">
            // Toolbar
            <div class="page__toolbar">
                <SearchInput
                    value=Signal::derive(move || state.with(|s| s.search.clone()))
                    on_change=Callback::new(move |value: String| {
                        state.update(|s| s.set_search(value));
                        load_items();
                    })
                    placeholder="Search items..."
                />

                <select
                    class="filter-select"
                    prop:value=move || state.with(|s| s.category.clone())
                    on:change=move |ev| {
                        state.update(|s| s.set_category(event_target_value(&ev)));
                        load_items();
                    }
                >
                    <option value="">"All Categories"</option>
                    {move || {
                        state
                            .with(|s| s.categories.clone())
                            .into_iter()
                            .map(|category| {
                                view! {
                                    <option value=category.clone()>{category.clone()}</option>
                                }
                            })
                            .collect_view()
                    }}
                </select>

                <button
                    class="button button--secondary"
                    on:click=move |_| {
                        state.update(|s| s.clear_filters());
                        load_items();
                    }
                >
                    {icon("x")}
                    " Clear Filters"
                </button>

                <div class="page__toolbar-spacer"></div>

                <button
                    class="button button--primary"
                    on:click=move |_| dialog.set(OpenDialog::Form(None))
                >
                    {icon("plus")}
                    " Add Item"
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| dialog.set(OpenDialog::Import)
                >
                    {icon("upload")}
                    " Import CSV"
                </button>
                <button
                    class="button button--secondary"
                    on:click=handle_export
                    disabled=move || exporting.get()
                >
                    {icon("download")}
                    " Export CSV"
                </button>
            </div>

            // Content: loading / empty / table
            {move || match state.with(|s| s.phase) {
                ListPhase::Idle | ListPhase::Loading => view! {
                    <div class="page__state page__state--loading">"Loading items..."</div>
                }.into_any(),
                ListPhase::Empty => view! {
                    <div class="page__state page__state--empty">
                        "No items found. Add your first item or import a CSV."
                    </div>
                }.into_any(),
                ListPhase::Populated => view! {
                    <div class="page__content">
                        <table class="items-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Category"</th>
                                    <th>"Unit Type"</th>
                                    <th>"SKU"</th>
                                    <th>"Default Price"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    items
                                        .get()
                                        .into_iter()
                                        .map(|item| {
                                            let edit_id = item.id.as_string();
                                            let delete_id = edit_id.clone();
                                            let delete_name = item.name.clone();
                                            let category = item
                                                .category
                                                .clone()
                                                .unwrap_or_else(|| "-".to_string());
                                            let sku = item
                                                .sku
                                                .clone()
                                                .unwrap_or_else(|| "Auto".to_string());
                                            let price = item
                                                .default_price
                                                .map(|p| format!("${:.2}", p))
                                                .unwrap_or_else(|| "-".to_string());
                                            view! {
                                                <tr>
                                                    <td>{item.name.clone()}</td>
                                                    <td>{category}</td>
                                                    <td>{item.unit_type.clone()}</td>
                                                    <td>{sku}</td>
                                                    <td>{price}</td>
                                                    <td>
                                                        <div class="item-actions">
                                                            <button
                                                                class="icon-btn icon-btn--edit"
                                                                title="Edit"
                                                                on:click=move |_| open_edit(edit_id.clone())
                                                            >
                                                                {icon("pencil")}
                                                            </button>
                                                            <button
                                                                class="icon-btn icon-btn--delete"
                                                                title="Delete"
                                                                on:click=move |_| {
                                                                    dialog.set(OpenDialog::Delete {
                                                                        id: delete_id.clone(),
                                                                        name: delete_name.clone(),
                                                                    })
                                                                }
                                                            >
                                                                {icon("trash")}
                                                            </button>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>

                        <div class="page__footer">
                            <span class="page__count">
                                {move || format!("Total: {}", state.with(|s| s.total_count))}
                            </span>
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.page))
                                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                                on_page_change=Callback::new(move |page: u32| {
                                    state.update(|s| s.goto_page(page));
                                    load_items();
                                })
                            />
                        </div>
                    </div>
                }.into_any(),
            }}

            // Dialogs (one at a time)
            {move || match dialog.get() {
                OpenDialog::None => view! { <></> }.into_any(),
                OpenDialog::Form(editing) => view! {
                    <ItemDetails
                        editing=editing
                        on_saved=Callback::new(move |_| reload_all())
                        on_cancel=Callback::new(move |_| close_dialog())
                    />
                }.into_any(),
                OpenDialog::Delete { id, name } => {
                    let message = format!(
                        "Are you sure you want to delete \"{}\"? This will mark it as inactive.",
                        name
                    );
                    view! {
                        <Modal
                            title="Delete Item"
                            on_close=Callback::new(move |_| close_dialog())
                        >
                            <p class="delete-message">{message}</p>
                            <div class="form-actions">
                                <button
                                    class="button button--secondary"
                                    on:click=move |_| close_dialog()
                                    disabled=move || deleting.get()
                                >
                                    "Cancel"
                                </button>
                                <button
                                    class="button button--danger"
                                    on:click=move |_| confirm_delete(id.clone())
                                    disabled=move || deleting.get()
                                >
                                    {move || if deleting.get() {
                                        view! { <span class="button-spinner"></span> }.into_any()
                                    } else {
                                        view! { <span>"Delete"</span> }.into_any()
                                    }}
                                </button>
                            </div>
                        </Modal>
                    }.into_any()
                }
                OpenDialog::Import => view! {
                    <CsvImportDialog
                        on_success=Callback::new(move |_| reload_all())
                        on_cancel=Callback::new(move |_| close_dialog())
                    />
                }.into_any(),
            }}
        </div>
    }
}
