//! API 网关客户端
//!
//! 所有出站请求的唯一入口：
//! 1. 固定的 API 根地址与 JSON 内容协商
//! 2. 每个请求都携带凭据（Cookie）
//! 3. 每个响应都经过 401 拦截：清除会话并整页跳转到登录页

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use crate::protocol::ApiRequest;
use crate::route::AppRoute;
use crate::session::{KeyValueStore, Session};
use crate::{log_error, log_info, log_warn};

const ACCEPT: &str = "application/json, text/plain, */*";
const JSON_CONTENT_TYPE: &str = "application/json";

/// 整页导航抽象（浏览器中即 `window.location`）
pub trait Navigator {
    /// 当前页面路径
    fn current_path(&self) -> String;
    /// 整页跳转，页面状态全部丢弃
    fn assign(&self, path: &str);
}

/// API 网关客户端
///
/// 持有传输层、会话存储与导航器；克隆成本与其组成部分相同。
#[derive(Debug, Clone)]
pub struct ApiClient<T, S, N> {
    base_url: String,
    transport: T,
    session: Session<S>,
    navigator: N,
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(config: &ClientConfig, transport: T, store: S, navigator: N) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            transport,
            session: Session::new(store),
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 拼接完整 URL 与查询串
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// 执行 JSON 请求并解析响应体
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let response = self.send(request).await?;
        response.json::<R::Response>().map_err(|e| {
            log_warn!("[Gateway] Undecodable body from {}: {}", request.path(), e);
            ApiError::from(e)
        })
    }

    /// 执行请求，返回未解析的成功响应
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpResponse> {
        let url = self.url(&request.path(), &request.query());
        let mut req = HttpRequest::new(&url, R::METHOD);
        if let Some(body) = request.body() {
            req = req.with_body(RequestBody::Json(serde_json::to_string(body)?));
        }
        self.dispatch(req).await
    }

    /// 发送已构建的请求
    ///
    /// 非 2xx 响应转换为 `ApiError`；401 先触发拦截再返回错误。
    pub async fn dispatch(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let request = self.prepare(request);
        let method = request.method;
        log_info!("[Gateway] {} {}", method, request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            log_error!("[Gateway] {} failed: {}", method, e);
            ApiError::from(e)
        })?;

        self.intercept(&response);

        if response.is_success() {
            Ok(response)
        } else {
            log_warn!("[Gateway] {} answered {}", method, response.status);
            Err(ApiError::from_rejection(response.status, &response.body))
        }
    }

    fn prepare(&self, request: HttpRequest) -> HttpRequest {
        let request = request.with_header("Accept", ACCEPT).with_credentials();
        if matches!(request.body, RequestBody::Json(_)) {
            request.with_header("Content-Type", JSON_CONTENT_TYPE)
        } else {
            request
        }
    }

    /// 401 拦截
    ///
    /// 清除会话；当前已在登录/注册页时不再跳转，避免重定向循环。
    /// 返回是否发生了跳转。
    fn intercept(&self, response: &HttpResponse) -> bool {
        if response.status != 401 {
            return false;
        }
        self.session.clear();

        let current = self.navigator.current_path();
        let on_public_page = AppRoute::from_path(&current)
            .map(|route| !route.requires_auth())
            .unwrap_or(false);
        if on_public_page {
            log_warn!("[Gateway] Unauthorized (401) on {}, session cleared.", current);
            return false;
        }

        log_warn!("[Gateway] Unauthorized (401), session cleared. Redirecting to login.");
        self.navigator.assign(AppRoute::Login.to_path());
        true
    }
}
