use crate::session::use_session;
use crate::web::SignalCell;
use crate::web::router::{Link, use_router};
use catalogo::auth::{self, REGISTER_FAILED};
use catalogo::validation::RegisterForm;
use catalogo::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (nombre, set_nombre) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let busy = SignalCell::new(false);
    let busy_view = busy.signal();
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let form = RegisterForm {
            nombre: nombre.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let gateway = session.gateway.clone();
        let busy = busy.clone();
        spawn_local(async move {
            match auth::register(&gateway, &busy, &form).await {
                Ok(outcome) => {
                    // 注册不建立会话：提示后回到登录页
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&outcome.message);
                    }
                    router.navigate(outcome.redirect);
                }
                Err(e) => set_error_msg.set(Some(e.user_message(REGISTER_FAILED))),
            }
        });
    };

    let is_submitting = move || busy_view.get();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="nombre">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="nombre"
                                type="text"
                                on:input=move |ev| set_nombre.set(event_target_value(&ev))
                                prop:value=nombre
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="At least 6 characters"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
