//! 学生表单
//!
//! 新增与编辑共用同一个模态框，`editing` 为 `Some` 时表示编辑。

use leptos::prelude::*;
use vaxportal_shared::{Student, StudentPayload};

use crate::components::modal::Modal;

/// 表单状态，`RwSignal` 实现了 `Copy`，可直接作为 Props 传递
#[derive(Clone, Copy)]
pub struct StudentFormState {
    pub open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub name: RwSignal<String>,
    pub student_id: RwSignal<String>,
    pub class_grade: RwSignal<String>,
}

impl StudentFormState {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            student_id: RwSignal::new(String::new()),
            class_grade: RwSignal::new(String::new()),
        }
    }

    pub fn open_new(&self) {
        self.editing.set(None);
        self.fill(&StudentPayload::default());
        self.open.set(true);
    }

    pub fn open_edit(&self, student: &Student) {
        self.editing.set(student.id);
        self.fill(&StudentPayload::from(student));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.editing.set(None);
    }

    fn fill(&self, payload: &StudentPayload) {
        self.name.set(payload.name.clone());
        self.student_id.set(payload.student_id.clone());
        self.class_grade.set(payload.class_grade.clone());
    }

    pub fn to_payload(&self) -> StudentPayload {
        StudentPayload {
            name: self.name.get_untracked().trim().to_string(),
            class_grade: self.class_grade.get_untracked().trim().to_string(),
            student_id: self.student_id.get_untracked().trim().to_string(),
        }
    }
}

#[component]
pub fn StudentForm(
    state: StudentFormState,
    #[prop(into)] busy: Signal<bool>,
    /// 参数为 (学生数据库 ID, 载荷)
    #[prop(into)]
    on_submit: Callback<(Option<i64>, StudentPayload)>,
) -> impl IntoView {
    let title = Signal::derive(move || {
        if state.editing.get().is_some() {
            "Edit Student".to_string()
        } else {
            "Add New Student".to_string()
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run((state.editing.get_untracked(), state.to_payload()));
    };

    view! {
        <Modal open=state.open title=title>
            <form on:submit=submit class="space-y-4">
                <div class="form-control">
                    <label for="student-name" class="label">
                        <span class="label-text">"Full Name"</span>
                    </label>
                    <input id="student-name" type="text" required
                        class="input input-bordered w-full"
                        on:input=move |ev| state.name.set(event_target_value(&ev))
                        prop:value=move || state.name.get()
                    />
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div class="form-control">
                        <label for="student-id" class="label">
                            <span class="label-text">"Student ID"</span>
                        </label>
                        <input id="student-id" type="text" required
                            class="input input-bordered w-full"
                            on:input=move |ev| state.student_id.set(event_target_value(&ev))
                            prop:value=move || state.student_id.get()
                        />
                    </div>
                    <div class="form-control">
                        <label for="student-class" class="label">
                            <span class="label-text">"Class/Grade"</span>
                        </label>
                        <input id="student-class" type="text" required placeholder="5A"
                            class="input input-bordered w-full"
                            on:input=move |ev| state.class_grade.set(event_target_value(&ev))
                            prop:value=move || state.class_grade.get()
                        />
                    </div>
                </div>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| state.close()>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                        {move || if state.editing.get().is_some() { "Update Student" } else { "Add Student" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
