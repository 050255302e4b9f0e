//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫规则来自核心库的 `AppRoute::decide`，此处只负责执行：
//! 监听 -> 决策 -> 重定向(replace) / 渲染。

use catalogo::{AppRoute, RouteDecision, SessionState};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 记录
///
/// `replace` 用于重定向：后退时不会回到被拦截的页面。
fn write_history(path: &str, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if result.is_err() {
        log::warn!("[Router] history update rejected for {}", path);
    }
}

/// 路由器服务
///
/// 通过注入会话状态信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由
    current_route: RwSignal<AppRoute>,
    /// 会话状态（注入的信号）
    session: Signal<SessionState>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        Self {
            current_route: RwSignal::new(initial_route),
            session,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route.read_only()
    }

    /// 当前守卫决策（追踪路由与会话两个信号）
    pub fn decision(&self) -> RouteDecision {
        self.current_route.get().decide(self.session.get())
    }

    /// 导航到指定路由 (pushState)
    ///
    /// 守卫在随后的决策中执行；被拦截时以 replace 方式改写这条记录。
    pub fn navigate(&self, route: AppRoute) {
        log::debug!("[Router] navigate {}", route);
        write_history(route.to_path(), false);
        self.current_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let current_route = self.current_route;

        let on_popstate = Closure::<dyn Fn()>::new(move || {
            current_route.set(AppRoute::from_path(&current_path()));
        });

        let registered = web_sys::window().map(|w| {
            w.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
        });
        if !matches!(registered, Some(Ok(()))) {
            log::warn!("[Router] popstate listener not installed");
        }

        // 监听器与页面同寿
        on_popstate.forget();
    }

    /// 守卫重定向
    ///
    /// 路由或会话状态任一变化都会重新求值，不缓存结果：
    /// 在受保护页面注销后，下一次求值即重定向。
    fn setup_guard_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            if let RouteDecision::Redirect(target) = router.decision() {
                log::info!("[Router] redirect -> {}", target);
                write_history(target.to_path(), true);
                router.current_route.set(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard_redirect();

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
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 会话未确定或即将重定向时不渲染任何路由内容。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收放行的路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision() {
        RouteDecision::Render(route) => matcher(route),
        RouteDecision::Pending => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        RouteDecision::Redirect(_) => ().into_any(),
    }
}

/// 站内链接
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
