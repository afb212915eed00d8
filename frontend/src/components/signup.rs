use std::time::Duration;

use crate::api::portal_api;
use crate::components::icons::ShieldCheck;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::{AppRoute, AuthRequest, log_error};

/// 注册成功后停留多久再跳转到登录页
const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[component]
pub fn SignupPage() -> impl IntoView {
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_success_msg.set(None);

        let request = AuthRequest::new(&username.get_untracked(), &password.get_untracked());
        if let Err(e) = request.validate_signup(&confirm.get_untracked()) {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        spawn_local(async move {
            match portal_api()
                .auth()
                .signup(&request.username, &request.password)
                .await
            {
                Ok(message) => {
                    set_success_msg.try_set(Some(format!("{} You can now log in.", message)));
                    set_timeout(
                        move || router.navigate(AppRoute::Login.to_path()),
                        REDIRECT_DELAY,
                    );
                }
                Err(e) => {
                    log_error!("[Signup] Registration failed: {}", e);
                    set_error_msg.try_set(Some(e.to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    let field = |id: &'static str,
                 label: &'static str,
                 kind: &'static str,
                 value: ReadSignal<String>,
                 set: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                    required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Student Vaccination Portal"</h1>
                        <p class="text-base-content/70">"Create Account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {field("username", "Username", "text", username, set_username)}
                        {field("password", "Password", "password", password, set_password)}
                        {field("confirm-password", "Confirm Password", "password", confirm, set_confirm)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login.to_path() class="link link-primary">
                                "Login here"
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
