use std::fmt;

// =========================================================
// 错误类别枚举
// =========================================================

/// 客户端错误类别
///
/// 每个类别对应一种用户可见的失败来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 表单校验失败，请求从未发出
    Validation,
    /// 后端拒绝，错误体是纯字符串（直接作为提示消息）
    Rejected,
    /// 后端拒绝，错误体是结构化或不透明内容
    Status,
    /// 401: 会话失效，由网关统一处理
    Unauthorized,
    /// 网络或传输层失败
    Network,
    /// 成功响应但响应体无法解析
    Decode,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Validation => "VALIDATION_FAILED",
            ApiErrorKind::Rejected => "REQUEST_REJECTED",
            ApiErrorKind::Status => "HTTP_STATUS",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Decode => "DECODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误
///
/// `Display` 只输出 `message`，页面直接把它展示给用户。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// 触发错误的 HTTP 状态码（网络错误和校验错误没有）
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message).with_status(401)
    }

    /// 通用状态码错误，消息与浏览器端 HTTP 库保持一致
    pub fn status(status: u16) -> Self {
        Self::new(
            ApiErrorKind::Status,
            format!("Request failed with status code {}", status),
        )
        .with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// 根据非 2xx 响应体构造错误
    ///
    /// 纯字符串错误体被解包为消息，其余情况退化为通用状态码错误。
    pub fn from_rejection(status: u16, body: &[u8]) -> Self {
        let message = plain_message(body);
        if status == 401 {
            return Self::unauthorized(
                message.unwrap_or_else(|| format!("Request failed with status code {}", status)),
            );
        }
        match message {
            Some(message) => Self::new(ApiErrorKind::Rejected, message).with_status(status),
            None => Self::status(status),
        }
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

/// 提取纯字符串错误体
///
/// JSON 字符串字面量或非 JSON 的非空文本视为纯字符串；
/// JSON 对象、数组、数字以及空响应体都不是。
pub(crate) fn plain_message(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(_) => Some(text.to_string()),
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<crate::http::TransportError> for ApiError {
    fn from(e: crate::http::TransportError) -> Self {
        ApiError::network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}
