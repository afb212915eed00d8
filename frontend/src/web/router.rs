//! 路由服务模块 - 核心引擎
//!
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//! 守卫决策来自 `vaxportal_shared::route::resolve`，此模块只负责把决策落到
//! History API 和信号上，并记录被拦截的原始地址，登录后返回。

use leptos::prelude::*;
use vaxportal_shared::log_info;
use vaxportal_shared::route::{AppRoute, RouteDecision, login_destination, resolve};
use wasm_bindgen::prelude::*;

use super::location::{current_path, push_history_state, replace_history_state};

const APP_TITLE: &str = "Student Vaccination Portal";

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 被守卫拦截的受保护地址
    return_to: RwSignal<Option<String>>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::default());
        let router = Self {
            current_route,
            set_route,
            return_to: RwSignal::new(None),
            is_authenticated,
        };

        // 首次加载同样经过守卫，重定向不产生历史记录
        let path = current_path();
        router.apply(&path, resolve(&path, is_authenticated.get_untracked()), false);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let decision = resolve(path, self.is_authenticated.get_untracked());
        self.apply(path, decision, true);
    }

    /// 登录成功后返回被拦截的地址，没有记录时进入仪表盘
    pub fn navigate_after_login(&self) {
        let target = login_destination(self.return_to.get_untracked().as_deref());
        self.return_to.set(None);
        self.navigate(&target);
    }

    /// 把守卫决策落到 History 与路由信号上
    ///
    /// `use_push` 为 true 使用 pushState，否则 replaceState。
    fn apply(&self, requested: &str, decision: RouteDecision, use_push: bool) {
        let write_history = if use_push {
            push_history_state
        } else {
            replace_history_state
        };

        match decision {
            RouteDecision::Render(route) => {
                if requested != route.to_path() {
                    write_history(route.to_path());
                } else if use_push {
                    write_history(requested);
                }
                self.set_route.set(route);
            }
            RouteDecision::Redirect { to, return_to } => {
                log_info!("[Router] {} is not available here. Redirecting to {}.", requested, to);
                if let Some(original) = return_to {
                    self.return_to.set(Some(original));
                }
                write_history(to.to_path());
                self.set_route.set(to);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            // popstate 时也执行守卫逻辑；地址栏已经变化，重定向只能替换
            let decision = resolve(&path, router.is_authenticated.get_untracked());
            router.apply(&path, decision, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                log_info!("[Router] Auth state changed: logged in.");
                router.navigate_after_login();
            } else if !is_auth && route.requires_auth() {
                // 注销不记录来源地址
                log_info!("[Router] Auth state changed: logged out, redirecting to login.");
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                router.set_route.set(redirect);
            }
        });
    }

    /// 路由变化时同步文档标题
    fn sync_document_title(&self) {
        let current_route = self.current_route;
        Effect::new(move |_| {
            let route = current_route.get();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                document.set_title(&format!("{} | {}", route.title(), APP_TITLE));
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();
    router.sync_document_title();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 应用内链接，点击时走路由服务而不是整页加载
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
