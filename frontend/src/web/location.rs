//! 地址栏与 History API
//!
//! 所有对 `window.location` / `window.history` 的访问都集中在此。

use vaxportal_shared::{Navigator, log_warn};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
pub fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 替换 History 状态（用于重定向）
pub fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 整页导航器，401 拦截时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        current_path()
    }

    fn assign(&self, path: &str) {
        let assigned = web_sys::window().map(|w| w.location().assign(path));
        if !matches!(assigned, Some(Ok(()))) {
            log_warn!("[Navigator] Could not load {}", path);
        }
    }
}
