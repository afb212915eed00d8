//! 页面级请求状态
//!
//! 每个拉取列表的页面独立持有 `FetchState`：加载标记、错误与数据。
//! 每次发起请求都会领取一个递增的票据，只有最新票据的结果才会被写入，
//! 被新请求取代的旧结果直接丢弃。

use std::fmt::Display;

/// 请求票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    latest: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            latest: 0,
        }
    }
}

impl<T> FetchState<T> {
    /// 发起新请求：进入加载状态并清除旧错误
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.is_loading = true;
        self.error = None;
        FetchTicket(self.latest)
    }

    /// 写入请求结果
    ///
    /// 票据已过期时什么都不做并返回 false。
    /// 失败时保留之前的数据，只记录错误消息。
    pub fn settle<E: Display>(&mut self, ticket: FetchTicket, result: Result<T, E>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }
}

impl<T> FetchState<Vec<T>> {
    /// 列表数据，未加载时为空
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}
