//! 已认证页面的外壳：导航栏 + 内容区

use leptos::prelude::*;
use vaxportal_shared::AppRoute;

use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Syringe};
use crate::web::router::{Link, use_router};

const NAV_ITEMS: [AppRoute; 4] = [
    AppRoute::Dashboard,
    AppRoute::Students,
    AppRoute::Drives,
    AppRoute::Reports,
];

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let username = auth.username();

    let on_logout = move |_| {
        logout(&auth);
        router.navigate(AppRoute::auth_failure_redirect().to_path());
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <Syringe attr:class="text-primary h-6 w-6" />
                    <span class="text-xl font-bold hidden md:inline">"Vaccination Portal"</span>
                    <ul class="menu menu-horizontal px-1 gap-1">
                        {NAV_ITEMS
                            .into_iter()
                            .map(|route| {
                                let class = move || {
                                    if router.current_route().get() == route {
                                        "active".to_string()
                                    } else {
                                        String::new()
                                    }
                                };
                                view! {
                                    <li class=class>
                                        <Link to=route.to_path()>{route.title()}</Link>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
                <div class="flex-none gap-3">
                    <Show when=move || username.get().is_some()>
                        <span class="text-sm text-base-content/70 hidden md:inline">
                            "Welcome, " {move || username.get().unwrap_or_default()}
                        </span>
                    </Show>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">{children()}</main>
        </div>
    }
}

/// 页面内的成功/错误提示
#[component]
pub fn Notice(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] error: bool,
) -> impl IntoView {
    let class = if error {
        "alert alert-error shadow-sm"
    } else {
        "alert alert-success shadow-sm"
    };

    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class=class>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
