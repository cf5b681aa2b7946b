//! CSV import dialog: pick a file, preview the parsed rows, surface
//! advisory warnings, then forward the *original* file to the backend.
//! The parsed staging buffer only ever feeds the preview.

use crate::domain::a001_predefined_item::api;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use contracts::domain::a001_predefined_item::{parse_csv, validate_csv, CsvDocument};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

/// The preview table shows at most this many data rows.
const PREVIEW_ROWS: usize = 5;

/// Staged file plus its parsed form; alive only while the dialog is open.
#[derive(Clone)]
struct CsvStaging {
    file: web_sys::File,
    document: CsvDocument,
    warnings: Vec<String>,
}

async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| "file is not readable as text".to_string())
}

/// Warnings shown in the dialog: validation findings first, then one line
/// per row the parser had to skip for a column-count mismatch.
fn collect_warnings(document: &CsvDocument) -> Vec<String> {
    let mut warnings = validate_csv(&document.headers, &document.rows);
    for line in &document.skipped {
        warnings.push(format!(
            "Line {}: column count does not match header, row skipped",
            line
        ));
    }
    warnings
}

#[component]
pub fn CsvImportDialog(
    /// Fired after a completed import so the owner can reload and close
    on_success: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = StoredValue::new(use_session());
    let toast = use_toast();

    // holds a web_sys::File, so this stays on the local arena
    let staging = RwSignal::new_local(Option::<CsvStaging>::None);
    let (parse_error, set_parse_error) = signal(Option::<String>::None);
    let (importing, set_importing) = signal(false);

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(input) = input else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_parse_error.set(None);
        spawn_local(async move {
            match read_file_text(&file).await {
                Ok(text) => {
                    let document = parse_csv(&text);
                    let warnings = collect_warnings(&document);
                    staging.set(Some(CsvStaging {
                        file,
                        document,
                        warnings,
                    }));
                }
                Err(e) => {
                    staging.set(None);
                    set_parse_error.set(Some(format!("Failed to parse CSV file: {}", e)));
                }
            }
        });
    };

    let handle_import = move |_| {
        let Some(current) = staging.get_untracked() else {
            toast.error("Please select a CSV file first");
            return;
        };
        let session = session.get_value();

        set_importing.set(true);
        spawn_local(async move {
            match api::import_csv(&session, &current.file).await {
                Ok(summary) => {
                    if summary.failed == 0 {
                        toast.success(format!(
                            "Successfully imported {} items",
                            summary.successful
                        ));
                    } else {
                        toast.warning(format!(
                            "Imported {} of {} items. {} failed.",
                            summary.successful, summary.total, summary.failed
                        ));
                    }
                    on_success.run(());
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_importing.set(false);
        });
    };

    let handle_cancel = move |_: ()| {
        if importing.get_untracked() {
            return;
        }
        // the staging buffer dies with the dialog
        on_cancel.run(());
    };

    view! {
        <Modal title="Import Items from CSV" on_close=Callback::new(handle_cancel)>
            <div class="csv-import">
                <div class="csv-import__filebar">
                    <label class="button button--primary csv-import__file-btn" for="csv-file-input">
                        {icon("file")}
                        " Select CSV file"
                    </label>
                    <input
                        id="csv-file-input"
                        type="file"
                        accept=".csv"
                        class="hidden"
                        on:change=handle_file_select
                    />
                    {move || match staging.get() {
                        Some(s) => view! {
                            <span class="csv-import__fileinfo"><strong>{s.file.name()}</strong></span>
                        }.into_any(),
                        None => view! {
                            <span class="csv-import__filehint">"No file selected"</span>
                        }.into_any(),
                    }}
                </div>

                {move || parse_error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                {move || staging.get().map(|s| {
                    let warnings = s.warnings.clone();
                    (!warnings.is_empty()).then(|| view! {
                        <div class="warning-box csv-import__warnings">
                            <strong>"Warnings:"</strong>
                            <ul>
                                {warnings.into_iter().map(|w| view! { <li>{w}</li> }).collect_view()}
                            </ul>
                        </div>
                    })
                })}

                {move || staging.get().map(|s| {
                    let headers = s.document.headers.clone();
                    let total_rows = s.document.rows.len();
                    let preview: Vec<_> = s.document.rows.iter().take(PREVIEW_ROWS).cloned().collect();
                    let header_cells = headers.clone();
                    view! {
                        <div class="csv-preview">
                            <table class="csv-preview__table">
                                <thead>
                                    <tr>
                                        {header_cells.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                                    </tr>
                                </thead>
                                <tbody>
                                    {preview.into_iter().map(|row| {
                                        let cells = headers.iter().map(|h| {
                                            let value = row.get(h).cloned().unwrap_or_default();
                                            view! { <td>{value}</td> }
                                        }).collect_view();
                                        view! { <tr>{cells}</tr> }
                                    }).collect_view()}
                                </tbody>
                            </table>
                            {(total_rows > PREVIEW_ROWS).then(|| view! {
                                <div class="csv-preview__note">
                                    {format!("Showing first {} of {} rows", PREVIEW_ROWS, total_rows)}
                                </div>
                            })}
                        </div>
                    }
                })}

                <div class="form-actions">
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| handle_cancel(())
                        disabled=move || importing.get()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="button button--primary"
                        on:click=handle_import
                        disabled=move || staging.get().is_none() || importing.get()
                    >
                        {move || if importing.get() {
                            view! { <span class="button-spinner"></span> }.into_any()
                        } else {
                            view! {
                                <>
                                    {icon("upload")}
                                    " Import"
                                </>
                            }.into_any()
                        }}
                    </button>
                </div>
            </div>
        </Modal>
    }
}
