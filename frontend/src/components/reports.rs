//! 接种报表页面：按疫苗筛选、分页浏览并导出文件

use leptos::prelude::*;
use leptos::task::spawn_local;
use vaxportal_shared::date::format_optional_date;
use vaxportal_shared::{
    FetchState, ReportFormat, ReportPage, ReportQuery, log_error, log_info, report_rows,
};

use crate::api::portal_api;
use crate::components::icons::{Download, Search};
use crate::components::layout::Notice;
use crate::config::client_config;
use crate::web::file::save_download;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let query = RwSignal::new(ReportQuery {
        size: client_config().report_page_size,
        ..ReportQuery::default()
    });
    // 输入框内容，点击筛选后才写入 query
    let vaccine_filter = RwSignal::new(String::new());
    let report = RwSignal::new(FetchState::<ReportPage>::default());
    let download_error = RwSignal::new(Option::<String>::None);
    let downloading = RwSignal::new(false);

    Effect::new(move |_| {
        let current = query.get();
        let Some(ticket) = report.try_update(|s| s.begin()) else {
            return;
        };
        spawn_local(async move {
            let result = portal_api().reports().page(&current).await;
            if let Err(e) = &result {
                log_error!("[Reports] Failed to fetch page {}: {}", current.page, e);
            }
            report.try_update(|s| s.settle(ticket, result));
        });
    });

    // 筛选条件变化时回到第一页
    let apply_filters = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let vaccine_name = vaccine_filter.get_untracked();
        query.update(|q| {
            q.vaccine_name = vaccine_name;
            q.page = 1;
        });
    };

    let download = move |format: ReportFormat| {
        download_error.set(None);
        downloading.set(true);
        let vaccine_name = query.with_untracked(|q| q.vaccine_name.clone());
        spawn_local(async move {
            let result = match portal_api().reports().download(format, &vaccine_name).await {
                Ok(file) => save_download(&file).map(|()| file.file_name),
                Err(e) => Err(e),
            };
            match result {
                Ok(name) => log_info!("[Reports] Saved {}", name),
                Err(e) => {
                    log_error!("[Reports] {} download failed: {}", format.label(), e);
                    download_error.try_set(Some(format!("Failed to download report: {}", e)));
                }
            }
            downloading.try_set(false);
        });
    };

    let rows = move || {
        report.with(|s| {
            s.data
                .as_ref()
                .map(report_rows)
                .unwrap_or_default()
        })
    };
    let page_error = Signal::derive(move || report.with(|s| s.error.clone()));
    let is_loading = move || report.with(|s| s.is_loading);
    let page_number = move || query.with(|q| q.page);
    let has_next = move || {
        let page = page_number();
        report.with(|s| s.data.as_ref().is_some_and(|p| p.has_next_page(page)))
    };

    view! {
        <h1 class="text-3xl font-bold">"Vaccination Reports"</h1>

        <Notice message=page_error error=true />
        <Notice message=download_error error=true />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <form class="flex flex-wrap items-end gap-3" on:submit=apply_filters>
                    <div class="form-control">
                        <label for="report-vaccine" class="label">
                            <span class="label-text">"Vaccine Name"</span>
                        </label>
                        <input id="report-vaccine" type="text" placeholder="Filter by vaccine"
                            class="input input-bordered input-sm"
                            on:input=move |ev| vaccine_filter.set(event_target_value(&ev))
                            prop:value=vaccine_filter
                        />
                    </div>
                    <button type="submit" class="btn btn-primary btn-sm gap-2">
                        <Search attr:class="h-4 w-4" /> "Apply Filters"
                    </button>
                    <div class="flex-1"></div>
                    {ReportFormat::ALL
                        .into_iter()
                        .map(|format| {
                            view! {
                                <button type="button" class="btn btn-outline btn-sm gap-2"
                                    disabled=move || downloading.get()
                                    on:click=move |_| download(format)
                                >
                                    <Download attr:class="h-4 w-4" />
                                    {format!("Download {}", format.label())}
                                </button>
                            }
                        })
                        .collect_view()}
                </form>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0 overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Vaccine Name"</th>
                            <th>"Student Name"</th>
                            <th>"Vaccination Date"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || !is_loading() && rows().is_empty() && page_error.get().is_none()>
                            <tr>
                                <td colspan="3" class="text-center py-8 text-base-content/50">
                                    "No reports found."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=rows
                            key=|row| row.clone()
                            children=|row| {
                                view! {
                                    <tr>
                                        <td>{row.vaccine_name}</td>
                                        <td class="font-medium">{row.student_name}</td>
                                        <td>{format_optional_date(row.date)}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>

        <div class="flex items-center justify-center gap-4">
            <button class="btn btn-sm"
                disabled=move || page_number() <= 1 || is_loading()
                on:click=move |_| query.update(|q| *q = q.previous())
            >
                "Previous"
            </button>
            <span class="text-sm">
                "Page " {page_number}
                <Show when=is_loading>
                    <span class="loading loading-spinner loading-xs ml-2"></span>
                </Show>
            </span>
            <button class="btn btn-sm"
                disabled=move || !has_next() || is_loading()
                on:click=move |_| query.update(|q| *q = q.next())
            >
                "Next"
            </button>
        </div>
    }
}
