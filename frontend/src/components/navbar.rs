use crate::session::{logout, use_session};
use crate::web::router::use_router;
use catalogo::SessionState;
use leptos::prelude::*;

/// 顶部导航栏：只在会话已认证时显示
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let state = session.state_signal();

    let on_logout = move |_| {
        let target = logout(&session);
        router.navigate(target);
    };

    view! {
        <Show when=move || state.get() == SessionState::Authenticated>
            <div class="navbar bg-base-100 shadow-xl">
                <div class="flex-1">
                    <span class="btn btn-ghost text-xl">"Product Catalog"</span>
                </div>
                <div class="flex-none">
                    <button on:click=on_logout.clone() class="btn btn-outline btn-error">
                        "Log out"
                    </button>
                </div>
            </div>
        </Show>
    }
}
