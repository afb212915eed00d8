//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 持久化的会话（LocalStorage）是唯一事实来源，此处只保存它的响应式镜像，
//! 路由服务通过注入的认证信号来检查认证状态。

use leptos::prelude::*;
use vaxportal_shared::{ApiResult, AuthResponse, Session};

use crate::api::portal_api;
use crate::web::LocalStorage;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    is_authenticated: RwSignal<bool>,
    username: RwSignal<Option<String>>,
}

impl AuthContext {
    /// 从持久化会话创建
    pub fn new() -> Self {
        let ctx = Self {
            is_authenticated: RwSignal::new(false),
            username: RwSignal::new(None),
        };
        ctx.refresh();
        ctx
    }

    /// 重新读取持久化会话
    pub fn refresh(&self) {
        let session = Session::new(LocalStorage);
        self.is_authenticated.set(session.is_authenticated());
        self.username.set(session.username());
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.into()
    }

    pub fn username(&self) -> Signal<Option<String>> {
        self.username.into()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
///
/// 成功后会话已写入，认证信号随之变化，跳转由路由服务处理。
pub async fn login(ctx: &AuthContext, username: &str, password: &str) -> ApiResult<AuthResponse> {
    let result = portal_api().auth().login(username, password).await;
    ctx.refresh();
    result
}

/// 注销并清除状态
///
/// 调用方随后无条件导航到登录页。
pub fn logout(ctx: &AuthContext) {
    portal_api().auth().logout();
    ctx.refresh();
}
