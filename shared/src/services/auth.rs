use crate::error::{ApiResult, plain_message};
use crate::gateway::{ApiClient, Navigator};
use crate::http::HttpTransport;
use crate::model::{AuthRequest, AuthResponse};
use crate::protocol::{LoginRequest, RegisterRequest};
use crate::session::KeyValueStore;
use crate::log_info;

/// 认证服务
pub struct AuthService<'a, T, S, N> {
    pub(super) api: &'a ApiClient<T, S, N>,
}

impl<T, S, N> AuthService<'_, T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    /// 登录
    ///
    /// 后端返回 `success: true` 时写入会话；返回 false 时会话保持不变。
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = LoginRequest(AuthRequest::new(username, password));
        let response = self.api.execute(&request).await?;
        if response.success {
            self.api.session().set(username);
        } else {
            log_info!("[Auth] Login rejected for {}", username);
        }
        Ok(response)
    }

    /// 注册，返回后端的提示消息
    pub async fn signup(&self, username: &str, password: &str) -> ApiResult<String> {
        let request = RegisterRequest(AuthRequest::new(username, password));
        let response = self.api.send(&request).await?;
        Ok(signup_message(&response.body))
    }

    /// 注销：只清除本地会话，后端没有对应接口
    pub fn logout(&self) {
        self.api.session().clear();
        log_info!("[Auth] Signed out.");
    }
}

/// 注册成功消息：纯文本、JSON 字符串或 `{ "message": ... }`
fn signup_message(body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }
    plain_message(body).unwrap_or_else(|| "User registered successfully".to_string())
}
