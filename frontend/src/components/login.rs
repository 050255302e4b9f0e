use crate::session::use_session;
use crate::web::SignalCell;
use crate::web::router::{Link, use_router};
use catalogo::auth::{self, LOGIN_FAILED};
use catalogo::validation::LoginForm;
use catalogo::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let busy = SignalCell::new(false);
    let busy_view = busy.signal();
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let session = session.clone();
        let busy = busy.clone();
        spawn_local(async move {
            match auth::login(&session.gateway, &session.guard, &busy, &form).await {
                Ok(route) => router.navigate(route),
                Err(e) => set_error_msg.set(Some(e.user_message(LOGIN_FAILED))),
            }
        });
    };

    let is_submitting = move || busy_view.get();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Log in"</h1>
                    <p class="text-base-content/70">"Sign in to manage the catalog"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
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
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
