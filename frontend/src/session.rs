//! 会话模块
//!
//! 持有会话守卫与请求网关，二者共享同一个 `AuthHandle`，
//! 与路由系统解耦：路由服务只拿到一个只读的会话状态信号。

use crate::web::{BrowserStorage, FetchClient, SignalCell};
use catalogo::{AppRoute, AuthHandle, ClientConfig, Gateway, SessionGuard, SessionState, StateCell};
use leptos::prelude::*;

/// 会话上下文
#[derive(Clone)]
pub struct SessionContext {
    pub guard: SignalCell<SessionGuard<BrowserStorage>>,
    pub gateway: Gateway<FetchClient>,
    pub config: ClientConfig,
}

impl SessionContext {
    pub fn new(config: ClientConfig) -> Self {
        let auth = AuthHandle::new();
        let gateway = Gateway::new(
            config.api_base_url.clone(),
            FetchClient::new(config.request_timeout),
            auth.clone(),
        );
        let store = BrowserStorage::new(&config.token_key);
        Self {
            guard: SignalCell::new(SessionGuard::new(store, auth)),
            gateway,
            config,
        }
    }

    /// 会话状态信号（用于路由服务和导航栏）
    pub fn state_signal(&self) -> Signal<SessionState> {
        let guard = self.guard.signal();
        Signal::derive(move || guard.with(|g| g.state()))
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 初始化会话状态
pub fn init_session(ctx: &SessionContext) {
    ctx.guard.with_mut(|guard| guard.resolve());
}

/// 注销：清除存储和请求头，返回需要跳转的路由
pub fn logout(ctx: &SessionContext) -> AppRoute {
    ctx.guard.with_mut(|guard| guard.logout())
}
