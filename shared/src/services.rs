//! 领域服务
//!
//! 每个服务都是网关客户端之上的薄封装，把一个后端资源映射为类型化的请求与响应：
//! `api.auth()`, `api.students()`, `api.drives()`, `api.dashboard()`, `api.reports()`。

mod auth;
mod dashboard;
mod drive;
mod report;
mod student;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use drive::DriveService;
pub use report::ReportService;
pub use student::{StudentService, import_summary};

use crate::gateway::{ApiClient, Navigator};
use crate::http::HttpTransport;
use crate::session::KeyValueStore;

impl<T, S, N> ApiClient<T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn auth(&self) -> AuthService<'_, T, S, N> {
        AuthService { api: self }
    }

    pub fn students(&self) -> StudentService<'_, T, S, N> {
        StudentService { api: self }
    }

    pub fn drives(&self) -> DriveService<'_, T, S, N> {
        DriveService { api: self }
    }

    pub fn dashboard(&self) -> DashboardService<'_, T, S, N> {
        DashboardService { api: self }
    }

    pub fn reports(&self) -> ReportService<'_, T, S, N> {
        ReportService { api: self }
    }
}

#[cfg(test)]
mod tests;
