//! CSV 批量导入

use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::log_error;
use vaxportal_shared::services::import_summary;

use crate::api::portal_api;
use crate::components::icons::Upload;
use crate::web::file::read_upload;

/// 批量导入区域
///
/// 导入结果通过 `on_message` / `on_error` 交给页面展示，成功后调用 `on_imported` 刷新列表。
#[component]
pub fn BulkImport(
    busy: RwSignal<bool>,
    #[prop(into)] on_message: Callback<String>,
    #[prop(into)] on_error: Callback<String>,
    #[prop(into)] on_imported: Callback<()>,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let has_file = RwSignal::new(false);

    let selected_file = move || {
        input_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let on_change = move |_| has_file.set(selected_file().is_some());

    let on_upload = move |_| {
        let Some(file) = selected_file() else {
            on_error.run("Please select a file to import.".to_string());
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = match read_upload(&file).await {
                Ok(upload) => portal_api().students().bulk_import(upload).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(imported) => {
                    on_message.run(import_summary(imported.len()));
                    if let Some(input) = input_ref.get_untracked() {
                        input.set_value("");
                    }
                    has_file.set(false);
                    on_imported.run(());
                }
                Err(e) => {
                    log_error!("[Students] Bulk import failed: {}", e);
                    on_error.run(e.to_string());
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="flex flex-wrap items-center gap-2 border border-base-300 rounded-box px-4 py-2">
            <label for="bulk-import-file" class="text-sm font-medium">
                "Bulk Import Students (CSV)"
            </label>
            <input
                id="bulk-import-file"
                type="file"
                accept=".csv"
                class="file-input file-input-bordered file-input-sm"
                node_ref=input_ref
                on:change=on_change
            />
            <button
                class="btn btn-secondary btn-sm gap-2"
                disabled=move || !has_file.get() || busy.get()
                on:click=on_upload
            >
                <Upload attr:class="h-4 w-4" />
                {move || if busy.get() { "Importing..." } else { "Upload & Import" }}
            </button>
        </div>
    }
}
