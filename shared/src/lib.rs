//! 疫苗接种门户共享核心
//!
//! 与平台无关的客户端逻辑，前端 (wasm32) 与原生测试共用：
//! - `model`: 领域模型（学生、接种活动、接种记录、仪表盘、报表）
//! - `protocol`: 后端 REST 契约
//! - `http`: 传输层抽象
//! - `session`: 持久化会话状态
//! - `gateway`: API 网关客户端（401 拦截）
//! - `services`: 领域服务
//! - `route`: 路由定义与守卫
//! - `fetch`: 页面级请求状态

pub mod config;
pub mod date;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod http;
pub mod model;
pub mod protocol;
pub mod route;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use fetch::{FetchState, FetchTicket};
pub use gateway::{ApiClient, Navigator};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportError};
pub use model::*;
pub use route::{AppRoute, RouteDecision};
pub use session::{KeyValueStore, Session};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化的认证标记键
pub const STORAGE_AUTH_KEY: &str = "isAuthenticated";
/// 持久化的用户名键
pub const STORAGE_USERNAME_KEY: &str = "username";
/// 认证标记的唯一有效值
pub const AUTH_SENTINEL: &str = "true";

/// 批量导入时的 multipart 字段名
pub const BULK_IMPORT_FIELD: &str = "file";

// =========================================================
// 跨平台日志宏
// =========================================================

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub use web_sys as __web_sys;

#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        $crate::__web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!($($t)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        $crate::__web_sys::console::warn_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($t)*);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        $crate::__web_sys::console::error_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($t)*);
    }};
}
