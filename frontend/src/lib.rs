//! Catalogo 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `session`: 会话上下文（凭据存储 + 请求网关 + 会话守卫）
//! - `web::router`: 路由服务（History API + 守卫决策）
//! - `components`: UI 组件层
//!
//! 路由表与守卫规则、产品同步逻辑都在 `catalogo` 核心库中。

mod components {
    pub mod dashboard;
    pub mod login;
    pub mod navbar;
    pub mod register;
}
mod session;
pub(crate) mod web;

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;
use crate::session::{SessionContext, init_session};

use catalogo::{AppRoute, ClientConfig};
use leptos::prelude::*;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 只会收到守卫放行的路由；`Root` 总是被重定向，不会到达这里。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Root | AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session = SessionContext::new(ClientConfig::from_env());
    provide_context(session.clone());

    // 2. 从 LocalStorage 解析会话 (Unknown -> Authenticated / Unauthenticated)
    init_session(&session);

    // 3. 会话状态信号注入路由服务
    let state = session.state_signal();

    view! {
        <Router session=state>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
