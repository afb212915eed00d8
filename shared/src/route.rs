//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、各路由是否需要认证，以及每次导航的守卫决策。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    #[default]
    Login,
    /// 注册页面
    Signup,
    /// 仪表盘 (默认受保护页面)
    Dashboard,
    /// 学生管理
    Students,
    /// 接种活动
    Drives,
    /// 接种报表
    Reports,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，未匹配返回 None
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Dashboard),
            "/students" => Some(Self::Students),
            "/drives" => Some(Self::Drives),
            "/reports" => Some(Self::Reports),
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            _ => None,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/",
            Self::Students => "/students",
            Self::Drives => "/drives",
            Self::Reports => "/reports",
        }
    }

    /// **核心守卫逻辑：除登录与注册外的页面都需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }

    /// 定义已认证用户是否应该离开此路由
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的默认目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Create Account",
            Self::Dashboard => "Dashboard",
            Self::Students => "Students",
            Self::Drives => "Vaccination Drives",
            Self::Reports => "Vaccination Reports",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 单次导航的守卫决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// 放行，渲染目标路由
    Render(AppRoute),
    /// 重定向；`return_to` 记录被拦截的原始地址，登录成功后返回
    Redirect {
        to: AppRoute,
        return_to: Option<String>,
    },
}

impl RouteDecision {
    /// 决策最终落地的路由
    pub fn route(&self) -> AppRoute {
        match self {
            RouteDecision::Render(route) => *route,
            RouteDecision::Redirect { to, .. } => *to,
        }
    }
}

/// 导航守卫
///
/// 流程：解析 -> 验证(Guard) -> 放行或重定向
pub fn resolve(path: &str, is_authenticated: bool) -> RouteDecision {
    let Some(route) = AppRoute::from_path(path) else {
        // 未匹配路径：已认证去默认页，否则去登录页，不记录来源
        let to = if is_authenticated {
            AppRoute::auth_success_redirect()
        } else {
            AppRoute::auth_failure_redirect()
        };
        return RouteDecision::Redirect { to, return_to: None };
    };

    if route.requires_auth() && !is_authenticated {
        return RouteDecision::Redirect {
            to: AppRoute::auth_failure_redirect(),
            return_to: Some(path.to_string()),
        };
    }

    if route.should_redirect_when_authenticated() && is_authenticated {
        return RouteDecision::Redirect {
            to: AppRoute::auth_success_redirect(),
            return_to: None,
        };
    }

    RouteDecision::Render(route)
}

/// 登录成功后的目标地址
///
/// 优先返回被拦截的受保护地址；没有记录或记录的是公开页面时回到默认页。
pub fn login_destination(return_to: Option<&str>) -> String {
    return_to
        .filter(|path| AppRoute::from_path(path).is_some_and(|r| r.requires_auth()))
        .map(str::to_string)
        .unwrap_or_else(|| AppRoute::auth_success_redirect().to_path().to_string())
}
