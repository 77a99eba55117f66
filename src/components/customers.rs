//! 客户管理页面
//!
//! 结构与设备页一致：记录集 + 搜索 + 弹窗表单 + 删除确认。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{Pencil, Plus, RefreshCw, Search, Trash2, Users};
use crate::components::records::use_records;
use crate::error::ApiError;
use crate::model::{Customer, CustomerPayload, TABLE_CUSTOMERS};
use crate::session::use_session;

#[derive(Clone, Copy)]
struct CustomerForm {
    name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    address: RwSignal<String>,
}

impl CustomerForm {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.phone.set(String::new());
        self.address.set(String::new());
    }

    fn fill(&self, customer: &Customer) {
        self.name.set(customer.name.clone());
        self.email.set(customer.email.clone().unwrap_or_default());
        self.phone.set(customer.phone.clone().unwrap_or_default());
        self.address.set(customer.address.clone().unwrap_or_default());
    }

    fn to_payload(&self) -> CustomerPayload {
        let opt = |value: String| {
            let value = value.trim().to_string();
            if value.is_empty() { None } else { Some(value) }
        };
        CustomerPayload {
            name: self.name.get().trim().to_string(),
            email: opt(self.email.get()),
            phone: opt(self.phone.get()),
            address: opt(self.address.get()),
        }
    }
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let session = use_session();

    let customers = use_records("Erro ao carregar clientes", move || {
        let api = session.api();
        async move {
            let api = api.ok_or_else(|| ApiError::remote("sessão encerrada"))?;
            let query = crate::api::TableQuery::new().select("*").order_asc("name");
            api.query::<Customer>(TABLE_CUSTOMERS, &query).await
        }
    });

    let form = CustomerForm::new();
    let (search_term, set_search_term) = signal(String::new());
    let (open, set_open) = signal(false);
    let (saving, set_saving) = signal(false);
    let (editing_id, set_editing_id) = signal(Option::<String>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let filtered = move || {
        let term = search_term.get();
        customers
            .items()
            .get()
            .into_iter()
            .filter(|c| c.matches(&term))
            .collect::<Vec<_>>()
    };

    let open_create = move |_| {
        set_editing_id.set(None);
        form.reset();
        set_open.set(true);
    };

    let open_edit = move |customer: &Customer| {
        set_editing_id.set(Some(customer.id.clone()));
        form.fill(customer);
        set_open.set(true);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = form.to_payload();
        if payload.name.is_empty() {
            set_notification.set(Some(("Informe o nome do cliente".to_string(), true)));
            return;
        }

        let api = session.api();
        let editing = editing_id.get();
        set_saving.set(true);
        spawn_local(async move {
            let result = match api {
                None => Err(ApiError::remote("sessão encerrada")),
                Some(api) => match editing {
                    Some(id) => api
                        .update::<_, Customer>(TABLE_CUSTOMERS, &id, &payload)
                        .await
                        .map(|_| ()),
                    None => api
                        .insert::<_, Customer>(TABLE_CUSTOMERS, &payload)
                        .await
                        .map(|_| ()),
                },
            };
            match result {
                Ok(()) => {
                    set_notification.set(Some(("Cliente salvo".to_string(), false)));
                    set_open.set(false);
                    set_editing_id.set(None);
                    form.reset();
                    customers.reload();
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("save failed: {}", err).into());
                    set_notification.set(Some(("Erro ao salvar cliente".to_string(), true)));
                }
            }
            set_saving.set(false);
        });
    };

    let handle_delete = move |id: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Tem certeza que deseja excluir este cliente?")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api = session.api();
        spawn_local(async move {
            let result = match api {
                None => Err(ApiError::remote("sessão encerrada")),
                Some(api) => api.remove(TABLE_CUSTOMERS, &id).await,
            };
            match result {
                Ok(()) => {
                    set_notification.set(Some(("Cliente excluído".to_string(), false)));
                    customers.retain(|c| c.id != id);
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("delete failed: {}", err).into());
                    set_notification.set(Some(("Erro ao excluir cliente".to_string(), true)));
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || {
                        let (_, is_err) = notification.get().unwrap();
                        if is_err {
                            "alert alert-error shadow-lg"
                        } else {
                            "alert alert-success shadow-lg"
                        }
                    }>
                        <span>{move || notification.get().unwrap().0}</span>
                    </div>
                </div>
            </Show>

            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-semibold">"Clientes"</h1>
                <button class="btn btn-primary gap-2" on:click=open_create>
                    <Plus attr:class="h-5 w-5" />
                    "Novo Cliente"
                </button>
            </div>

            <Show when=move || customers.error().get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || customers.error().get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between gap-4 px-6 py-4 border-b border-base-300">
                        <label class="input input-bordered flex items-center gap-2 flex-1 max-w-md">
                            <Search attr:class="h-5 w-5 text-base-content/40" />
                            <input
                                type="text"
                                class="grow"
                                placeholder="Buscar clientes..."
                                prop:value=search_term
                                on:input=move |ev| set_search_term.set(event_target_value(&ev))
                            />
                        </label>
                        <button
                            class="btn btn-ghost btn-circle"
                            disabled=move || customers.loading().get()
                            on:click=move |_| customers.reload()
                        >
                            <RefreshCw attr:class=move || {
                                if customers.loading().get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                            } />
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Nome"</th>
                                    <th>"Email"</th>
                                    <th>"Telefone"</th>
                                    <th class="hidden md:table-cell">"Endereço"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || customers.loading().get() && filtered().is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Carregando clientes..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !customers.loading().get() && filtered().is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-12 text-base-content/50">
                                            <Users attr:class="mx-auto h-12 w-12 opacity-40" />
                                            <p class="mt-2 font-medium">"Nenhum cliente encontrado"</p>
                                            <p class="text-sm">
                                                {move || if search_term.get().is_empty() {
                                                    "Comece cadastrando um novo cliente."
                                                } else {
                                                    "Tente uma busca diferente."
                                                }}
                                            </p>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filtered
                                    key=|c| c.id.clone()
                                    children=move |customer| {
                                        let id = customer.id.clone();
                                        let edit_source = customer.clone();
                                        view! {
                                            <tr>
                                                <td class="font-medium">{customer.name.clone()}</td>
                                                <td>{customer.email.clone().unwrap_or_default()}</td>
                                                <td>{customer.phone.clone().unwrap_or_default()}</td>
                                                <td class="hidden md:table-cell">
                                                    {customer.address.clone().unwrap_or_default()}
                                                </td>
                                                <td class="text-right whitespace-nowrap">
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square text-primary"
                                                        on:click=move |_| open_edit(&edit_source)
                                                    >
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square text-error"
                                                        on:click=move |_| handle_delete(id.clone())
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
                <div class="modal-box max-w-lg">
                    <h3 class="font-bold text-lg mb-4">
                        {move || if editing_id.get().is_some() { "Editar Cliente" } else { "Novo Cliente" }}
                    </h3>
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Nome *"</span></label>
                            <input
                                type="text"
                                class="input input-bordered"
                                required
                                prop:value=move || form.name.get()
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Email"</span></label>
                            <input
                                type="email"
                                class="input input-bordered"
                                prop:value=move || form.email.get()
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Telefone"</span></label>
                            <input
                                type="tel"
                                class="input input-bordered"
                                prop:value=move || form.phone.get()
                                on:input=move |ev| form.phone.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Endereço"</span></label>
                            <input
                                type="text"
                                class="input input-bordered"
                                prop:value=move || form.address.get()
                                on:input=move |ev| form.address.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn"
                                on:click=move |_| {
                                    set_open.set(false);
                                    set_editing_id.set(None);
                                }
                            >
                                "Cancelar"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                {move || if saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Salvando..." }.into_any()
                                } else if editing_id.get().is_some() {
                                    "Salvar".into_any()
                                } else {
                                    "Criar".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </dialog>
        </div>
    }
}
