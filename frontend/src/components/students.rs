//! 学生管理页面
//!
//! 检索、增删改、标记接种与批量导入。
//! 列表由 `FetchState` 持有，检索条件每次变化都重新拉取，过期结果被丢弃。

mod bulk_import;
mod student_form;
mod vaccinate_dialog;

use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::date::format_optional_date;
use vaxportal_shared::{
    FetchState, Student, StudentPayload, StudentSearch, VaccinationDrive, log_error, log_warn,
    selectable_drives,
};

use crate::api::portal_api;
use crate::components::icons::{Pencil, Plus, Search, Syringe, Trash2};
use crate::components::layout::Notice;
use crate::web::{clock, dialog};

use bulk_import::BulkImport;
use student_form::{StudentForm, StudentFormState};
use vaccinate_dialog::{VaccinateDialog, VaccinateState};

#[component]
pub fn StudentsPage() -> impl IntoView {
    let search = RwSignal::new(StudentSearch::default());
    let students = RwSignal::new(FetchState::<Vec<Student>>::default());
    let drives = RwSignal::new(Vec::<VaccinationDrive>::new());

    let busy = RwSignal::new(false);
    let message = RwSignal::new(Option::<String>::None);
    let action_error = RwSignal::new(Option::<String>::None);

    let form = StudentFormState::new();
    let vaccinate = VaccinateState::new();

    // =========================================================
    // 数据加载
    // =========================================================

    let load_students = move || {
        let filters = search.get_untracked();
        let Some(ticket) = students.try_update(|s| s.begin()) else {
            return;
        };
        spawn_local(async move {
            let result = portal_api().students().search(&filters).await;
            if let Err(e) = &result {
                log_error!("[Students] Failed to fetch students: {}", e);
            }
            students.try_update(|s| s.settle(ticket, result));
        });
    };

    // 剂量由后端维护，每次接种后都要重新拉取
    let load_drives = move || {
        spawn_local(async move {
            match portal_api().drives().upcoming().await {
                Ok(list) => {
                    drives.try_set(selectable_drives(&list, clock::today()));
                }
                Err(e) => log_warn!("[Students] Failed to fetch drives for selection: {}", e),
            }
        });
    };

    // 检索条件变化即重新拉取
    Effect::new(move |_| {
        search.track();
        load_students();
    });
    load_drives();

    let clear_notices = move || {
        message.set(None);
        action_error.set(None);
    };

    // =========================================================
    // 变更操作
    // =========================================================

    let save_student = move |(id, payload): (Option<i64>, StudentPayload)| {
        clear_notices();
        if let Err(e) = payload.validate() {
            action_error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        spawn_local(async move {
            let api = portal_api();
            let result = match id {
                Some(id) => api
                    .students()
                    .update(id, &payload)
                    .await
                    .map(|_| "Student updated successfully!"),
                None => api
                    .students()
                    .create(&payload)
                    .await
                    .map(|_| "Student added successfully!"),
            };
            match result {
                Ok(done) => {
                    message.set(Some(done.to_string()));
                    form.close();
                    load_students();
                }
                Err(e) => {
                    log_error!("[Students] Failed to save student: {}", e);
                    action_error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    let delete_student = move |id: i64| {
        if !dialog::confirm("Are you sure you want to delete this student?") {
            return;
        }
        clear_notices();
        busy.set(true);
        spawn_local(async move {
            match portal_api().students().delete(id).await {
                Ok(()) => {
                    message.set(Some("Student deleted successfully!".to_string()));
                    load_students();
                }
                Err(e) => {
                    log_error!("[Students] Failed to delete student: {}", e);
                    action_error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    let confirm_vaccination = move |_: ()| {
        let student_id = vaccinate.student.with_untracked(|s| s.as_ref().and_then(|s| s.id));
        let drive = drives.with_untracked(|list| vaccinate.selected_drive(list));
        let (Some(student_id), Some(drive)) = (student_id, drive) else {
            action_error.set(Some("Please select a student and a drive.".to_string()));
            return;
        };
        let Some(drive_id) = drive.id else {
            action_error.set(Some("Invalid drive selected.".to_string()));
            return;
        };

        clear_notices();
        busy.set(true);
        spawn_local(async move {
            let result = portal_api()
                .students()
                .mark_vaccinated(student_id, drive_id, &drive.vaccine_name)
                .await;
            match result {
                Ok(updated) => {
                    message.set(Some(format!(
                        "{} marked as vaccinated with {}.",
                        updated.name, drive.vaccine_name
                    )));
                    vaccinate.close();
                    load_students();
                    load_drives();
                }
                Err(e) => {
                    log_error!("[Students] Failed to mark student as vaccinated: {}", e);
                    action_error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    // =========================================================
    // 视图
    // =========================================================

    let list_error = Signal::derive(move || students.with(|s| s.error.clone()));
    let is_loading = move || students.with(|s| s.is_loading);
    let is_empty = move || students.with(|s| s.is_empty());

    view! {
        <h1 class="text-3xl font-bold">"Student Management"</h1>

        <Notice message=message />
        <Notice message=action_error error=true />

        <form
            class="flex flex-wrap items-center gap-2"
            // 检索条件的每次变化都已触发拉取，提交只需阻止默认行为
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                clear_notices();
            }
        >
            {search_field(search, "Search by Name", |s, v| s.name = v)}
            {search_field(search, "Class/Grade", |s, v| s.class_grade = v)}
            {search_field(search, "Student ID", |s, v| s.student_id = v)}
            {search_field(search, "Vaccine", |s, v| s.vaccine_name = v)}
            <button type="submit" class="btn btn-primary btn-sm gap-2">
                <Search attr:class="h-4 w-4" /> "Search"
            </button>
        </form>

        <div class="flex flex-wrap items-center justify-between gap-4">
            <button class="btn btn-primary gap-2" on:click=move |_| form.open_new()>
                <Plus attr:class="h-4 w-4" /> "Add New Student"
            </button>
            <BulkImport
                busy=busy
                on_message=move |m: String| {
                    action_error.set(None);
                    message.set(Some(m));
                }
                on_error=move |e: String| {
                    message.set(None);
                    action_error.set(Some(e));
                }
                on_imported=move |_| load_students()
            />
        </div>

        <StudentForm state=form busy=busy on_submit=save_student />
        <VaccinateDialog state=vaccinate drives=drives busy=busy on_confirm=confirm_vaccination />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0 overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Student ID"</th>
                            <th>"Class/Grade"</th>
                            <th>"Vaccination Records"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || is_loading() && is_empty()>
                            <tr>
                                <td colspan="5" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span>
                                    " Loading students..."
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !is_loading() && is_empty() && list_error.get().is_none()>
                            <tr>
                                <td colspan="5" class="text-center py-8 text-base-content/50">
                                    "No students found."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || students.with(|s| s.items().to_vec())
                            // 以整条记录为键，编辑后的姓名、班级等都会重新渲染
                            key=|s| s.clone()
                            children=move |student| {
                                let id = student.id;
                                let has_records = student.has_vaccination_records();
                                let for_edit = student.clone();
                                let for_vaccinate = student.clone();
                                let (vaccinate_label, vaccinate_hint) = if has_records {
                                    ("Add Another Vac.", "Add another vaccination (e.g., different vaccine, booster)")
                                } else {
                                    ("Mark Vaccinated", "Record a vaccination for this student")
                                };
                                view! {
                                    <tr>
                                        <td class="font-medium">{student.name.clone()}</td>
                                        <td class="font-mono text-sm">{student.student_id.clone()}</td>
                                        <td>{student.class_grade.clone()}</td>
                                        <td>
                                            {if has_records {
                                                view! {
                                                    <ul class="list-disc pl-4 text-sm">
                                                        {student
                                                            .vaccination_records
                                                            .iter()
                                                            .map(|r| {
                                                                view! {
                                                                    <li>{format!("{} on {}", r.vaccine_name, format_optional_date(r.date))}</li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                }
                                                    .into_any()
                                            } else {
                                                view! { <span class="text-base-content/50">"No records"</span> }.into_any()
                                            }}
                                        </td>
                                        <td>
                                            <div class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs gap-1"
                                                    on:click=move |_| form.open_edit(&for_edit)
                                                >
                                                    <Pencil attr:class="h-3 w-3" /> "Edit Info"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error gap-1"
                                                    disabled=move || busy.get() || id.is_none()
                                                    on:click=move |_| {
                                                        if let Some(id) = id {
                                                            delete_student(id);
                                                        }
                                                    }
                                                >
                                                    <Trash2 attr:class="h-3 w-3" /> "Delete"
                                                </button>
                                                <button
                                                    class="btn btn-outline btn-secondary btn-xs gap-1"
                                                    title=vaccinate_hint
                                                    on:click=move |_| vaccinate.open_for(for_vaccinate.clone())
                                                >
                                                    <Syringe attr:class="h-3 w-3" />
                                                    {vaccinate_label}
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

        <Notice message=list_error error=true />
    }
}

/// 检索输入框，每次输入都写回检索条件
fn search_field(
    search: RwSignal<StudentSearch>,
    label: &'static str,
    apply: fn(&mut StudentSearch, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            placeholder=label
            class="input input-bordered input-sm grow min-w-[8rem]"
            on:input=move |ev| {
                let value = event_target_value(&ev);
                search.update(|s| apply(s, value));
            }
        />
    }
}
