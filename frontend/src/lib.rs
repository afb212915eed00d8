//! 学生疫苗接种门户前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `vaxportal_shared::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod drives;
    mod icons;
    pub mod layout;
    pub mod login;
    mod modal;
    pub mod reports;
    pub mod signup;
    pub mod students;
}
mod config;

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::drives::DrivesPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::reports::ReportsPage;
use crate::components::signup::SignupPage;
use crate::components::students::StudentsPage;

use leptos::prelude::*;

// 浏览器原生 API 封装模块
// 共享核心中的传输、存储与导航抽象在这里落到 web_sys 上。
pub(crate) mod web {
    pub mod clock;
    pub mod dialog;
    pub mod file;
    mod http;
    mod location;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use location::BrowserNavigator;
    pub use storage::LocalStorage;
}

use vaxportal_shared::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，受保护页面包在 `AppShell` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Dashboard => view! { <AppShell><DashboardPage /></AppShell> }.into_any(),
        AppRoute::Students => view! { <AppShell><StudentsPage /></AppShell> }.into_any(),
        AppRoute::Drives => view! { <AppShell><DrivesPage /></AppShell> }.into_any(),
        AppRoute::Reports => view! { <AppShell><ReportsPage /></AppShell> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 恢复会话）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
