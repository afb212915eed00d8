//! "标记已接种"对话框

use leptos::prelude::*;
use vaxportal_shared::date::format_optional_date;
use vaxportal_shared::{Student, VaccinationDrive};

use crate::components::modal::Modal;

#[derive(Clone, Copy)]
pub struct VaccinateState {
    pub open: RwSignal<bool>,
    pub student: RwSignal<Option<Student>>,
    /// `<select>` 的值，未选择时为空串
    pub drive_id: RwSignal<String>,
}

impl VaccinateState {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            student: RwSignal::new(None),
            drive_id: RwSignal::new(String::new()),
        }
    }

    pub fn open_for(&self, student: Student) {
        self.student.set(Some(student));
        self.drive_id.set(String::new());
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.student.set(None);
    }

    /// 当前选中的活动，只在可选列表中查找
    pub fn selected_drive(&self, drives: &[VaccinationDrive]) -> Option<VaccinationDrive> {
        let id = self.drive_id.get_untracked().parse::<i64>().ok()?;
        drives.iter().find(|d| d.id == Some(id)).cloned()
    }
}

#[component]
pub fn VaccinateDialog(
    state: VaccinateState,
    /// 可选活动（已过滤掉无剩余剂量、已完成和已过期的活动）
    #[prop(into)] drives: Signal<Vec<VaccinationDrive>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let title = Signal::derive(move || {
        state
            .student
            .with(|s| s.as_ref().map(|s| format!("Mark {} as Vaccinated", s.name)))
            .unwrap_or_default()
    });

    view! {
        <Modal open=state.open title=title>
            <div class="form-control">
                <label for="drive-select" class="label">
                    <span class="label-text">"Select Vaccination Drive"</span>
                </label>
                <select
                    id="drive-select"
                    class="select select-bordered w-full"
                    on:change=move |ev| state.drive_id.set(event_target_value(&ev))
                    prop:value=move || state.drive_id.get()
                >
                    <option value="">"-- Select Drive --"</option>
                    <For
                        each=move || drives.get()
                        key=|d| d.clone()
                        children=move |drive| {
                            let value = drive.id.map(|id| id.to_string()).unwrap_or_default();
                            view! {
                                <option value=value>
                                    {format!(
                                        "{} on {} (Doses: {})",
                                        drive.vaccine_name,
                                        format_optional_date(drive.date),
                                        drive.available_doses,
                                    )}
                                </option>
                            }
                        }
                    />
                </select>
                <Show when=move || drives.with(|d| d.is_empty())>
                    <span class="label-text-alt text-warning mt-2">
                        "No upcoming drives with available doses."
                    </span>
                </Show>
            </div>
            <div class="modal-action">
                <button type="button" class="btn btn-ghost" on:click=move |_| state.close()>
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled=move || state.drive_id.with(String::is_empty) || busy.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {move || if busy.get() { "Saving..." } else { "Confirm Vaccination" }}
                </button>
            </div>
        </Modal>
    }
}
