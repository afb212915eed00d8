//! 接种活动表单
//!
//! 字段以原始文本保存在 `DriveDraft` 中，提交时统一解析与校验。

use leptos::prelude::*;
use vaxportal_shared::{DriveDraft, VaccinationDrive};

use crate::components::modal::Modal;

#[derive(Clone, Copy)]
pub struct DriveFormState {
    pub open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub draft: RwSignal<DriveDraft>,
}

impl DriveFormState {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            editing: RwSignal::new(None),
            draft: RwSignal::new(DriveDraft::default()),
        }
    }

    pub fn open_new(&self) {
        self.editing.set(None);
        self.draft.set(DriveDraft::default());
        self.open.set(true);
    }

    pub fn open_edit(&self, drive: &VaccinationDrive) {
        self.editing.set(drive.id);
        self.draft.set(DriveDraft::from_drive(drive));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.editing.set(None);
    }
}

#[component]
pub fn DriveForm(
    state: DriveFormState,
    #[prop(into)] busy: Signal<bool>,
    /// 参数为 (活动 ID, 表单草稿)
    #[prop(into)]
    on_submit: Callback<(Option<i64>, DriveDraft)>,
) -> impl IntoView {
    let draft = state.draft;
    let is_editing = move || state.editing.get().is_some();

    let title = Signal::derive(move || {
        if is_editing() {
            "Edit Vaccination Drive".to_string()
        } else {
            "Create New Vaccination Drive".to_string()
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run((state.editing.get_untracked(), draft.get_untracked()));
    };

    view! {
        <Modal open=state.open title=title>
            <form on:submit=submit class="space-y-4">
                <div class="form-control">
                    <label for="vaccine-name" class="label">
                        <span class="label-text">"Vaccine Name"</span>
                    </label>
                    <input id="vaccine-name" type="text" required
                        class="input input-bordered w-full"
                        on:input=move |ev| draft.update(|d| d.vaccine_name = event_target_value(&ev))
                        prop:value=move || draft.with(|d| d.vaccine_name.clone())
                    />
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div class="form-control">
                        <label for="drive-date" class="label">
                            <span class="label-text">"Date"</span>
                        </label>
                        <input id="drive-date" type="date" required
                            class="input input-bordered w-full"
                            on:input=move |ev| draft.update(|d| d.date = event_target_value(&ev))
                            prop:value=move || draft.with(|d| d.date.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label for="available-doses" class="label">
                            <span class="label-text">"Available Doses"</span>
                        </label>
                        <input id="available-doses" type="number" min="1" required
                            class="input input-bordered w-full"
                            on:input=move |ev| draft.update(|d| d.available_doses = event_target_value(&ev))
                            prop:value=move || draft.with(|d| d.available_doses.clone())
                        />
                    </div>
                </div>
                <div class="form-control">
                    <label for="applicable-classes" class="label">
                        <span class="label-text">"Applicable Classes (comma separated)"</span>
                    </label>
                    <input id="applicable-classes" type="text" required placeholder="e.g. 5A, 6B"
                        class="input input-bordered w-full"
                        on:input=move |ev| draft.update(|d| d.applicable_classes = event_target_value(&ev))
                        prop:value=move || draft.with(|d| d.applicable_classes.clone())
                    />
                </div>
                <Show when=is_editing>
                    <label class="label cursor-pointer justify-start gap-3">
                        <input type="checkbox" class="checkbox checkbox-primary"
                            on:change=move |ev| draft.update(|d| d.completed = event_target_checked(&ev))
                            prop:checked=move || draft.with(|d| d.completed)
                        />
                        <span class="label-text">"Completed"</span>
                    </label>
                </Show>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| state.close()>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                        {move || if is_editing() { "Update Drive" } else { "Create Drive" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
