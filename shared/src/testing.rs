//! 测试工具：内存存储、记录型导航器与模拟传输层

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::gateway::{ApiClient, Navigator};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::session::KeyValueStore;

pub const TEST_BASE_URL: &str = "http://api.test/api";

// =========================================================
// MemoryStore
// =========================================================

/// 克隆之间共享数据的内存键值存储
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }
}

// =========================================================
// RecordingNavigator
// =========================================================

/// 记录所有整页跳转的导航器
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    current: Rc<RefCell<String>>,
    pub assigned: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        let navigator = Self::default();
        *navigator.current.borrow_mut() = path.to_string();
        navigator
    }

    pub fn assigned(&self) -> Vec<String> {
        self.assigned.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.borrow().clone()
    }

    fn assign(&self, path: &str) {
        *self.current.borrow_mut() = path.to_string();
        self.assigned.borrow_mut().push(path.to_string());
    }
}

// =========================================================
// MockTransport
// =========================================================

/// 按 (方法, 不含查询串的 URL) 返回预置响应，并记录每个请求
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RefCell<HashMap<(HttpMethod, String), HttpResponse>>,
    offline: RefCell<bool>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_json(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.mock(
            method,
            path,
            HttpResponse::new(status, body.to_string()).with_content_type("application/json"),
        );
    }

    pub fn mock(&self, method: HttpMethod, path: &str, response: HttpResponse) {
        self.responses
            .borrow_mut()
            .insert((method, format!("{}{}", TEST_BASE_URL, path)), response);
    }

    /// 之后的请求全部以网络错误失败
    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(req.clone());
        if *self.offline.borrow() {
            return Err(TransportError::NetworkError("Network Error".to_string()));
        }

        let parsed = url::Url::parse(&req.url)
            .map_err(|e| TransportError::RequestBuildFailed(e.to_string()))?;
        let mut key = parsed.clone();
        key.set_query(None);

        let responses = self.responses.borrow();
        Ok(responses
            .get(&(req.method, key.to_string()))
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "Not Found")))
    }
}

/// 查询参数（已解码）
pub fn query_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    url::Url::parse(&request.url)
        .map(|u| u.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

pub type TestClient = ApiClient<MockTransport, MemoryStore, RecordingNavigator>;

/// 构建测试客户端，返回与其共享状态的存储与导航器
pub fn test_client(path: &str) -> (TestClient, MemoryStore, RecordingNavigator) {
    let config = ClientConfig {
        api_base_url: TEST_BASE_URL.to_string(),
        ..ClientConfig::default()
    };
    let store = MemoryStore::default();
    let navigator = RecordingNavigator::at(path);
    let client = ApiClient::new(&config, MockTransport::new(), store.clone(), navigator.clone());
    (client, store, navigator)
}
