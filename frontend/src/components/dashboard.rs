use crate::session::{SessionContext, logout, use_session};
use crate::web::SignalCell;
use crate::web::router::use_router;
use catalogo::catalog::{EditProductDraft, NewProductDraft, ProductMirror, ProductSync};
use catalogo::{ClientError, Product, StateCell};
use leptos::prelude::*;
use leptos::task::spawn_local;

const LOAD_FAILED: &str = "Could not load products.";
const ADD_FAILED: &str = "Could not add product.";
const UPDATE_FAILED: &str = "Could not update product.";
const DELETE_FAILED: &str = "Could not delete product.";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    // 页面状态：每次挂载重建，从后端重新加载
    let mirror = SignalCell::new(ProductMirror::default());
    let busy = SignalCell::new(false);
    let new_draft = SignalCell::new(NewProductDraft::default());
    let edit_draft = SignalCell::new(Option::<EditProductDraft>::None);

    let products = mirror.signal();
    let is_busy = busy.signal();
    let new_view = new_draft.signal();
    let edit_view = edit_draft.signal();
    let search = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let notification = RwSignal::new(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let sync = StoredValue::new(
        ProductSync::new(session.gateway.clone(), mirror, busy).with_delete_key(session.config.delete_key),
    );
    let session = StoredValue::new(session);
    let new_draft = StoredValue::new(new_draft);
    let edit_draft = StoredValue::new(edit_draft);

    let notify = move |message: String| notification.set(Some((message, false)));

    // 401/403：令牌已被后端拒绝，视为会话过期
    // 会话上下文在发起请求时取出并随任务移动：请求返回时页面可能已卸载
    let fail = move |session: &SessionContext, e: ClientError, fallback: &str| {
        if e.is_unauthorized() {
            log::warn!("session rejected by backend, logging out");
            let target = logout(session);
            router.navigate(target);
        } else {
            notification.set(Some((e.user_message(fallback), true)));
        }
    };

    let load_products = move || {
        let sync = sync.get_value();
        let session = session.get_value();
        loading.set(true);
        spawn_local(async move {
            if let Err(e) = sync.load().await {
                fail(&session, e, LOAD_FAILED);
            }
            loading.set(false);
        });
    };

    // 初始加载
    load_products();

    let on_add = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let sync = sync.get_value();
        let draft = new_draft.get_value();
        let session = session.get_value();
        spawn_local(async move {
            match sync.submit_new(&draft).await {
                Ok(product) => notify(format!("Added {}", product.name().unwrap_or("product"))),
                Err(e) => fail(&session, e, ADD_FAILED),
            }
        });
    };

    let on_save = move |_| {
        let sync = sync.get_value();
        let draft = edit_draft.get_value();
        let session = session.get_value();
        spawn_local(async move {
            match sync.submit_edit(&draft).await {
                Ok(Some(_)) => notify("Product updated".to_string()),
                Ok(None) => {}
                Err(e) => fail(&session, e, UPDATE_FAILED),
            }
        });
    };

    let on_edit = move |product: &Product| {
        edit_draft
            .get_value()
            .set(Some(EditProductDraft::from_product(product)));
    };

    let on_cancel = move |_| edit_draft.get_value().set(None);

    let on_delete = move |product: Product| {
        let sync = sync.get_value();
        let session = session.get_value();
        spawn_local(async move {
            match sync.remove_product(&product).await {
                Ok(_) => notify("Product deleted".to_string()),
                Err(e) => fail(&session, e, DELETE_FAILED),
            }
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(move || notification.set(None), std::time::Duration::from_secs(3));
        }
    });

    let total = move || products.with(|m| m.len());
    let visible = move || {
        let term = search.get();
        products.with(|m| m.filtered(&term).into_iter().cloned().collect::<Vec<_>>())
    };
    let editing = move |id: &str| edit_view.with(|d| d.as_ref().is_some_and(|d| d.id == id));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                // 通知提示框
                {move || notification.get().map(|(msg, is_err)| view! {
                    <div class="toast toast-top toast-end z-50">
                        <div class=if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }>
                            <span>{msg}</span>
                        </div>
                    </div>
                })}

                <div class="stats shadow w-full bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Products"</div>
                        <div class="stat-value text-primary">{total}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body flex-row flex-wrap gap-2 items-end" on:submit=on_add>
                        <input
                            type="text"
                            placeholder="Name"
                            class="input input-bordered"
                            prop:value=move || new_view.with(|d| d.nombre.clone())
                            on:input=move |ev| new_view.update(|d| d.nombre = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            inputmode="decimal"
                            placeholder="Price"
                            class="input input-bordered"
                            prop:value=move || new_view.with(|d| d.precio.clone())
                            on:input=move |ev| new_view.update(|d| d.precio = event_target_value(&ev))
                        />
                        <button class="btn btn-primary" disabled=move || is_busy.get()>
                            "Add product"
                        </button>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between gap-4 p-6 pb-2">
                            <input
                                type="search"
                                placeholder="Search by name"
                                class="input input-bordered w-full max-w-xs"
                                prop:value=search
                                on:input=move |ev| search.set(event_target_value(&ev))
                            />
                            <button
                                on:click=move |_| load_products()
                                disabled=move || loading.get() || is_busy.get()
                                class="btn btn-ghost"
                            >
                                {move || if loading.get() { "Loading..." } else { "Refresh" }}
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Price"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                "No products yet."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=visible
                                        key=|p| (p.id.clone(), p.nombre.clone(), p.precio.to_bits())
                                        let:product
                                    >
                                        {
                                            let id = product.id.clone();
                                            move || if editing(&id) {
                                                view! {
                                                    <tr>
                                                        <td>
                                                            <input
                                                                type="text"
                                                                class="input input-bordered input-sm"
                                                                prop:value=move || edit_view.with(|d| d.as_ref().map(|d| d.nombre.clone()).unwrap_or_default())
                                                                on:input=move |ev| edit_view.update(|d| if let Some(d) = d { d.nombre = event_target_value(&ev) })
                                                            />
                                                        </td>
                                                        <td>
                                                            <input
                                                                type="text"
                                                                inputmode="decimal"
                                                                class="input input-bordered input-sm"
                                                                prop:value=move || edit_view.with(|d| d.as_ref().map(|d| d.precio.clone()).unwrap_or_default())
                                                                on:input=move |ev| edit_view.update(|d| if let Some(d) = d { d.precio = event_target_value(&ev) })
                                                            />
                                                        </td>
                                                        <td class="flex gap-2 justify-end">
                                                            <button class="btn btn-sm btn-primary" on:click=on_save disabled=move || is_busy.get()>
                                                                "Save"
                                                            </button>
                                                            <button class="btn btn-sm btn-ghost" on:click=on_cancel>
                                                                "Cancel"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }.into_any()
                                            } else {
                                                let row = product.clone();
                                                let to_delete = product.clone();
                                                view! {
                                                    <tr>
                                                        <td>{row.name().unwrap_or("(unnamed)").to_string()}</td>
                                                        <td>{format!("{:.2}", row.precio)}</td>
                                                        <td class="flex gap-2 justify-end">
                                                            <button class="btn btn-sm btn-ghost" on:click=move |_| on_edit(&row)>
                                                                "Edit"
                                                            </button>
                                                            <button
                                                                class="btn btn-sm btn-outline btn-error"
                                                                disabled=move || is_busy.get()
                                                                on:click=move |_| on_delete(to_delete.clone())
                                                            >
                                                                "Delete"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }.into_any()
                                            }
                                        }
                                    </For>
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
