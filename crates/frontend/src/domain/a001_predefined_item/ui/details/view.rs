use super::view_model::{FormErrors, ItemForm};
use crate::domain::a001_predefined_item::api;
use crate::shared::modal::Modal;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use contracts::domain::a001_predefined_item::PredefinedItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Add/Edit form dialog. `editing = None` opens a blank create form;
/// `Some(item)` pre-populates the fields and switches save to update.
#[component]
pub fn ItemDetails(
    editing: Option<PredefinedItem>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = StoredValue::new(use_session());
    let toast = use_toast();

    let editing_id = StoredValue::new(editing.as_ref().map(|item| item.id.as_string()));
    let is_edit = editing.is_some();

    let form = RwSignal::new(
        editing
            .as_ref()
            .map(ItemForm::from_item)
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FormErrors::default());
    let (saving, set_saving) = signal(false);

    let title = if is_edit { "Edit Item" } else { "Add Item" };
    let save_label = if is_edit { "Update Item" } else { "Save Item" };

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let current = form.get_untracked();
        let validation = current.validate();
        if !validation.is_empty() {
            errors.set(validation);
            return;
        }
        errors.set(FormErrors::default());

        let draft = current.to_draft();
        let session = session.get_value();
        let id = editing_id.get_value();

        set_saving.set(true);
        spawn_local(async move {
            let result = match &id {
                Some(id) => api::update_item(&session, id, &draft)
                    .await
                    .map(|_| "Item updated successfully"),
                None => api::create_item(&session, &draft)
                    .await
                    .map(|_| "Item added successfully"),
            };
            match result {
                Ok(message) => {
                    toast.success(message);
                    on_saved.run(());
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title=title on_close=on_cancel>
            <form class="item-form" on:submit=handle_submit>
                <div class="form-group">
                    <label class="form-label" for="itemName">"Name *"</label>
                    <input
                        id="itemName"
                        class="form-input"
                        type="text"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    {move || errors.get().name.map(|e| view! { <span class="form-error">{e}</span> })}
                </div>

                <div class="form-group">
                    <label class="form-label" for="itemCategory">"Category"</label>
                    <input
                        id="itemCategory"
                        class="form-input"
                        type="text"
                        prop:value=move || form.get().category
                        on:input=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label class="form-label" for="itemUnitType">"Unit Type *"</label>
                    <input
                        id="itemUnitType"
                        class="form-input"
                        type="text"
                        placeholder="pcs, kg, box, board-ft..."
                        prop:value=move || form.get().unit_type
                        on:input=move |ev| form.update(|f| f.unit_type = event_target_value(&ev))
                    />
                    {move || errors.get().unit_type.map(|e| view! { <span class="form-error">{e}</span> })}
                </div>

                <div class="form-group">
                    <label class="form-label" for="itemDescription">"Description"</label>
                    <textarea
                        id="itemDescription"
                        class="form-input"
                        prop:value=move || form.get().description
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label class="form-label" for="itemDefaultPrice">"Default Price"</label>
                    <input
                        id="itemDefaultPrice"
                        class="form-input"
                        type="number"
                        step="0.01"
                        min="0"
                        prop:value=move || form.get().default_price
                        on:input=move |ev| form.update(|f| f.default_price = event_target_value(&ev))
                    />
                </div>

                <div class="form-actions">
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| on_cancel.run(())
                        disabled=move || saving.get()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() {
                            view! { <span class="button-spinner"></span> }.into_any()
                        } else {
                            view! { <span>{save_label}</span> }.into_any()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
