use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::{DashboardData, FetchState, log_error};

use crate::api::portal_api;
use crate::components::icons::*;
use crate::components::layout::Notice;

/// 仪表盘
///
/// 快照完全由后端计算，每次进入页面都重新拉取。
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = RwSignal::new(FetchState::<DashboardData>::default());

    let load = move || {
        let Some(ticket) = state.try_update(|s| s.begin()) else {
            return;
        };
        spawn_local(async move {
            let result = portal_api().dashboard().fetch().await;
            if let Err(e) = &result {
                log_error!("[Dashboard] Failed to load dashboard data: {}", e);
            }
            state.try_update(|s| s.settle(ticket, result));
        });
    };

    // 初始加载
    load();

    let error = Signal::derive(move || state.with(|s| s.error.clone()));
    let data = move || state.with(|s| s.data.clone());

    view! {
        <div class="flex items-center justify-between">
            <h1 class="text-3xl font-bold">"Vaccination Portal Dashboard"</h1>
            <button
                on:click=move |_| load()
                disabled=move || state.with(|s| s.is_loading)
                class="btn btn-ghost btn-circle"
            >
                <RefreshCw attr:class=move || {
                    if state.with(|s| s.is_loading) { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                } />
            </button>
        </div>

        <Notice message=error error=true />

        <Show
            when=move || state.with(|s| s.data.is_some())
            fallback=move || {
                view! {
                    <Show when=move || state.with(|s| s.is_loading)>
                        <div class="flex justify-center py-12">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    </Show>
                }
            }
        >
            {move || {
                data().map(|d| {
                    view! {
                        <div class="stats shadow w-full stats-vertical lg:stats-horizontal bg-base-100">
                            <div class="stat">
                                <div class="stat-figure text-primary">
                                    <Users attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Total Students"</div>
                                <div class="stat-value text-primary">{d.total_students}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-success">
                                    <ShieldCheck attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Total Vaccinated"</div>
                                <div class="stat-value text-success">{d.vaccinated_students}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-secondary">
                                    <Percent attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Vaccination Rate"</div>
                                <div class="stat-value text-secondary">{d.vaccinated_rate_label()}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-accent">
                                    <CalendarDays attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Upcoming Drives"</div>
                                <div class="stat-value text-accent">{d.upcoming_drives.len()}</div>
                            </div>
                        </div>
                    }
                })
            }}
        </Show>
    }
}
