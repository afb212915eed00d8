//! 持久化会话状态
//!
//! 会话只由两项字符串键值组成：认证标记与用户名。
//! 标记没有过期时间，只有显式清除（注销或 401）才会失效。

use crate::{AUTH_SENTINEL, STORAGE_AUTH_KEY, STORAGE_USERNAME_KEY};

/// 字符串键值存储抽象（浏览器中即 LocalStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 会话状态
#[derive(Debug, Clone, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 登录成功后写入
    pub fn set(&self, username: &str) {
        self.store.set(STORAGE_AUTH_KEY, AUTH_SENTINEL);
        self.store.set(STORAGE_USERNAME_KEY, username);
        crate::log_info!("[Session] Signed in as {}", username);
    }

    /// 注销或收到 401 时清除
    pub fn clear(&self) {
        self.store.remove(STORAGE_AUTH_KEY);
        self.store.remove(STORAGE_USERNAME_KEY);
    }

    /// 仅当标记恰好为 `"true"` 时视为已认证
    pub fn is_authenticated(&self) -> bool {
        self.store.get(STORAGE_AUTH_KEY).as_deref() == Some(AUTH_SENTINEL)
    }

    pub fn username(&self) -> Option<String> {
        self.store
            .get(STORAGE_USERNAME_KEY)
            .filter(|name| !name.is_empty())
    }
}
