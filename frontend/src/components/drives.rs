//! 接种活动页面：列出未完成的近期活动，支持新建、编辑与删除

mod drive_form;

use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::date::format_optional_date;
use vaxportal_shared::{DriveDraft, FetchState, VaccinationDrive, log_error};

use crate::api::portal_api;
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::components::layout::Notice;
use crate::web::dialog;

use drive_form::{DriveForm, DriveFormState};

#[component]
pub fn DrivesPage() -> impl IntoView {
    let drives = RwSignal::new(FetchState::<Vec<VaccinationDrive>>::default());
    let busy = RwSignal::new(false);
    let message = RwSignal::new(Option::<String>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let form = DriveFormState::new();

    let load_drives = move || {
        let Some(ticket) = drives.try_update(|s| s.begin()) else {
            return;
        };
        spawn_local(async move {
            let result = portal_api()
                .drives()
                .upcoming()
                .await
                .map(|list| list.into_iter().filter(|d| !d.completed).collect::<Vec<_>>());
            if let Err(e) = &result {
                log_error!("[Drives] Failed to fetch drives: {}", e);
            }
            drives.try_update(|s| s.settle(ticket, result));
        });
    };

    load_drives();

    let clear_notices = move || {
        message.set(None);
        action_error.set(None);
    };

    let save_drive = move |(id, draft): (Option<i64>, DriveDraft)| {
        clear_notices();
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                action_error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        spawn_local(async move {
            let api = portal_api();
            let result = match id {
                Some(id) => api
                    .drives()
                    .update(id, &payload)
                    .await
                    .map(|_| "Drive updated successfully!"),
                None => api
                    .drives()
                    .create(&payload)
                    .await
                    .map(|_| "Drive created successfully!"),
            };
            match result {
                Ok(done) => {
                    message.set(Some(done.to_string()));
                    form.close();
                    load_drives();
                }
                Err(e) => {
                    log_error!("[Drives] Failed to save drive: {}", e);
                    action_error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    let delete_drive = move |id: i64| {
        if !dialog::confirm("Are you sure you want to delete this drive?") {
            return;
        }
        clear_notices();
        busy.set(true);
        spawn_local(async move {
            match portal_api().drives().delete(id).await {
                Ok(()) => {
                    message.set(Some("Drive deleted successfully!".to_string()));
                    load_drives();
                }
                Err(e) => {
                    log_error!("[Drives] Failed to delete drive: {}", e);
                    action_error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    let list_error = Signal::derive(move || drives.with(|s| s.error.clone()));
    let is_loading = move || drives.with(|s| s.is_loading);
    let is_empty = move || drives.with(|s| s.is_empty());

    view! {
        <div class="flex items-center justify-between">
            <h1 class="text-3xl font-bold">"Vaccination Drives"</h1>
            <button class="btn btn-primary gap-2" on:click=move |_| form.open_new()>
                <Plus attr:class="h-4 w-4" /> "Add New Drive"
            </button>
        </div>

        <Notice message=message />
        <Notice message=action_error error=true />
        <Notice message=list_error error=true />

        <DriveForm state=form busy=busy on_submit=save_drive />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0 overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Vaccine Name"</th>
                            <th>"Date"</th>
                            <th>"Applicable Classes"</th>
                            <th>"Available Doses"</th>
                            <th>"Completed"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || is_loading() && is_empty()>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span>
                                    " Loading drives..."
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !is_loading() && is_empty() && list_error.get().is_none()>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-base-content/50">
                                    "No active drives found."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || drives.with(|s| s.items().to_vec())
                            // 以整条记录为键，任何字段变化都会重新渲染该行
                            key=|d| d.clone()
                            children=move |drive| {
                                let id = drive.id;
                                let for_edit = drive.clone();
                                view! {
                                    <tr>
                                        <td class="font-medium">{drive.vaccine_name.clone()}</td>
                                        <td>{format_optional_date(drive.date)}</td>
                                        <td>{drive.applicable_classes.join(", ")}</td>
                                        <td>{drive.available_doses}</td>
                                        <td>
                                            {if drive.completed {
                                                view! { <span class="badge badge-success">"Yes"</span> }
                                            } else {
                                                view! { <span class="badge badge-ghost">"No"</span> }
                                            }}
                                        </td>
                                        <td>
                                            <div class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs gap-1"
                                                    on:click=move |_| form.open_edit(&for_edit)
                                                >
                                                    <Pencil attr:class="h-3 w-3" /> "Edit"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error gap-1"
                                                    disabled=move || busy.get() || id.is_none()
                                                    on:click=move |_| {
                                                        if let Some(id) = id {
                                                            delete_drive(id);
                                                        }
                                                    }
                                                >
                                                    <Trash2 attr:class="h-3 w-3" /> "Delete"
                                                </button>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}
