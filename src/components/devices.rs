//! 设备管理页面
//!
//! 完整的 CRUD 视图：搜索、创建/编辑弹窗、删除、状态徽章。
//! 变更成功后走"失效即重载"约定。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{Laptop, Pencil, Plus, RefreshCw, Search, Trash2, UserIcon};
use crate::components::records::use_records;
use crate::error::ApiError;
use crate::model::{
    Customer, DEVICE_TYPES, Device, DevicePayload, DeviceStatus, TABLE_CUSTOMERS, TABLE_DEVICES,
};
use crate::session::use_session;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，便于在闭包间传递。
#[derive(Clone, Copy)]
struct DeviceForm {
    customer_id: RwSignal<String>,
    device_type: RwSignal<String>,
    brand: RwSignal<String>,
    model: RwSignal<String>,
    serial_number: RwSignal<String>,
    status: RwSignal<DeviceStatus>,
    reported_issues: RwSignal<String>,
    technical_notes: RwSignal<String>,
}

impl DeviceForm {
    fn new() -> Self {
        Self {
            customer_id: RwSignal::new(String::new()),
            device_type: RwSignal::new(DEVICE_TYPES[0].to_string()),
            brand: RwSignal::new(String::new()),
            model: RwSignal::new(String::new()),
            serial_number: RwSignal::new(String::new()),
            status: RwSignal::new(DeviceStatus::default()),
            reported_issues: RwSignal::new(String::new()),
            technical_notes: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    fn reset(&self) {
        self.customer_id.set(String::new());
        self.device_type.set(DEVICE_TYPES[0].to_string());
        self.brand.set(String::new());
        self.model.set(String::new());
        self.serial_number.set(String::new());
        self.status.set(DeviceStatus::default());
        self.reported_issues.set(String::new());
        self.technical_notes.set(String::new());
    }

    /// 用现有记录填充表单（编辑模式）
    fn fill(&self, device: &Device) {
        self.customer_id.set(device.customer_id.clone());
        self.device_type.set(device.device_type.clone());
        self.brand.set(device.brand.clone());
        self.model.set(device.model.clone());
        self.serial_number
            .set(device.serial_number.clone().unwrap_or_default());
        self.status.set(device.status);
        self.reported_issues
            .set(device.reported_issues.clone().unwrap_or_default());
        self.technical_notes
            .set(device.technical_notes.clone().unwrap_or_default());
    }

    /// 将表单状态转换为写入载荷
    fn to_payload(&self) -> DevicePayload {
        let opt = |value: String| {
            let value = value.trim().to_string();
            if value.is_empty() { None } else { Some(value) }
        };
        DevicePayload {
            customer_id: self.customer_id.get(),
            device_type: self.device_type.get(),
            brand: self.brand.get(),
            model: self.model.get(),
            serial_number: opt(self.serial_number.get()),
            status: self.status.get(),
            reported_issues: opt(self.reported_issues.get()),
            technical_notes: opt(self.technical_notes.get()),
        }
    }
}

#[component]
pub fn DevicesPage() -> impl IntoView {
    let session = use_session();

    let devices = use_records("Erro ao carregar aparelhos", move || {
        let api = session.api();
        async move {
            let api = api.ok_or_else(|| ApiError::remote("sessão encerrada"))?;
            let query = crate::api::TableQuery::new()
                .select("*,customer:customers(name,phone)")
                .order_desc("created_at");
            api.query::<Device>(TABLE_DEVICES, &query).await
        }
    });

    let customers = use_records("Erro ao carregar clientes", move || {
        let api = session.api();
        async move {
            let api = api.ok_or_else(|| ApiError::remote("sessão encerrada"))?;
            let query = crate::api::TableQuery::new()
                .select("id,name")
                .order_asc("name");
            api.query::<Customer>(TABLE_CUSTOMERS, &query).await
        }
    });

    let form = DeviceForm::new();
    let (search_term, set_search_term) = signal(String::new());
    let (open, set_open) = signal(false);
    let (saving, set_saving) = signal(false);
    // 正在编辑的设备 id；None 表示新建
    let (editing_id, set_editing_id) = signal(Option::<String>::None);
    // 消息内容, 是否出错
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

    // 3秒后清除通知
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
        devices
            .items()
            .get()
            .into_iter()
            .filter(|d| d.matches(&term))
            .collect::<Vec<_>>()
    };

    let open_create = move |_| {
        set_editing_id.set(None);
        form.reset();
        set_open.set(true);
    };

    let open_edit = move |device: &Device| {
        set_editing_id.set(Some(device.id.clone()));
        form.fill(device);
        set_open.set(true);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = form.to_payload();
        if payload.customer_id.is_empty() {
            set_notification.set(Some(("Selecione um cliente".to_string(), true)));
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
                        .update::<_, Device>(TABLE_DEVICES, &id, &payload)
                        .await
                        .map(|_| ()),
                    None => api
                        .insert::<_, Device>(TABLE_DEVICES, &payload)
                        .await
                        .map(|_| ()),
                },
            };
            match result {
                Ok(()) => {
                    set_notification.set(Some(("Aparelho salvo".to_string(), false)));
                    set_open.set(false);
                    set_editing_id.set(None);
                    form.reset();
                    devices.reload();
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("save failed: {}", err).into());
                    set_notification.set(Some(("Erro ao salvar aparelho".to_string(), true)));
                }
            }
            set_saving.set(false);
        });
    };

    let handle_delete = move |id: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Tem certeza que deseja excluir este aparelho?")
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
                Some(api) => api.remove(TABLE_DEVICES, &id).await,
            };
            match result {
                Ok(()) => {
                    set_notification.set(Some(("Aparelho excluído".to_string(), false)));
                    devices.retain(|d| d.id != id);
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("delete failed: {}", err).into());
                    set_notification.set(Some(("Erro ao excluir aparelho".to_string(), true)));
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            // 通知提示框
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
                <h1 class="text-2xl font-semibold">"Aparelhos"</h1>
                <button class="btn btn-primary gap-2" on:click=open_create>
                    <Plus attr:class="h-5 w-5" />
                    "Novo Aparelho"
                </button>
            </div>

            <Show when=move || devices.error().get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || devices.error().get().unwrap_or_default()}</span>
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
                                placeholder="Buscar aparelhos..."
                                prop:value=search_term
                                on:input=move |ev| set_search_term.set(event_target_value(&ev))
                            />
                        </label>
                        <button
                            class="btn btn-ghost btn-circle"
                            disabled=move || devices.loading().get()
                            on:click=move |_| devices.reload()
                        >
                            <RefreshCw attr:class=move || {
                                if devices.loading().get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                            } />
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Cliente"</th>
                                    <th>"Aparelho"</th>
                                    <th>"Status"</th>
                                    <th class="hidden md:table-cell">"Detalhes"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || devices.loading().get() && filtered().is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Carregando aparelhos..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !devices.loading().get() && filtered().is_empty()>
                                    <tr>
                                        <td colspan="5" class="text-center py-12 text-base-content/50">
                                            <Laptop attr:class="mx-auto h-12 w-12 opacity-40" />
                                            <p class="mt-2 font-medium">"Nenhum aparelho encontrado"</p>
                                            <p class="text-sm">
                                                {move || if search_term.get().is_empty() {
                                                    "Comece adicionando um novo aparelho."
                                                } else {
                                                    "Tente uma busca diferente."
                                                }}
                                            </p>
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filtered
                                    key=|d| d.id.clone()
                                    children=move |device| {
                                        let id = device.id.clone();
                                        let edit_source = device.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-3">
                                                        <UserIcon attr:class="h-8 w-8 text-base-content/30" />
                                                        <div>
                                                            <div class="text-sm font-medium">
                                                                {device.customer.as_ref().map(|c| c.name.clone()).unwrap_or_default()}
                                                            </div>
                                                            <div class="text-sm text-base-content/60">
                                                                {device.customer.as_ref().and_then(|c| c.phone.clone()).unwrap_or_default()}
                                                            </div>
                                                        </div>
                                                    </div>
                                                </td>
                                                <td>
                                                    <div class="text-sm">{device.brand.clone()} " " {device.model.clone()}</div>
                                                    <div class="text-sm text-base-content/60">{device.device_type.clone()}</div>
                                                    <Show when={
                                                        let has_serial = device.serial_number.is_some();
                                                        move || has_serial
                                                    }>
                                                        <div class="text-xs text-base-content/60">
                                                            "S/N: " {device.serial_number.clone().unwrap_or_default()}
                                                        </div>
                                                    </Show>
                                                </td>
                                                <td>
                                                    <span class=device.status.badge_class()>{device.status.label()}</span>
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    <div class="text-sm max-w-xs">
                                                        {device.reported_issues.clone().map(|issues| view! {
                                                            <p class="mb-1">
                                                                <span class="font-medium">"Problema relatado: "</span>
                                                                {issues}
                                                            </p>
                                                        })}
                                                        {device.technical_notes.clone().map(|notes| view! {
                                                            <p>
                                                                <span class="font-medium">"Notas técnicas: "</span>
                                                                {notes}
                                                            </p>
                                                        })}
                                                    </div>
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

            // 创建/编辑弹窗
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
                <div class="modal-box max-w-lg">
                    <h3 class="font-bold text-lg mb-4">
                        {move || if editing_id.get().is_some() { "Editar Aparelho" } else { "Novo Aparelho" }}
                    </h3>
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Cliente *"</span></label>
                            <select
                                class="select select-bordered w-full"
                                required
                                prop:value=move || form.customer_id.get()
                                on:change=move |ev| form.customer_id.set(event_target_value(&ev))
                            >
                                <option value="">"Selecione um cliente"</option>
                                <For
                                    each=move || customers.items().get()
                                    key=|c| c.id.clone()
                                    children=|customer| view! {
                                        <option value=customer.id.clone()>{customer.name.clone()}</option>
                                    }
                                />
                            </select>
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Tipo *"</span></label>
                                <select
                                    class="select select-bordered w-full"
                                    required
                                    prop:value=move || form.device_type.get()
                                    on:change=move |ev| form.device_type.set(event_target_value(&ev))
                                >
                                    {DEVICE_TYPES
                                        .into_iter()
                                        .map(|t| view! { <option value=t>{t}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Status *"</span></label>
                                <select
                                    class="select select-bordered w-full"
                                    required
                                    prop:value=move || form.status.get().as_str()
                                    on:change=move |ev| form.status.set(DeviceStatus::parse(&event_target_value(&ev)))
                                >
                                    {DeviceStatus::ALL
                                        .into_iter()
                                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Marca *"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    required
                                    prop:value=move || form.brand.get()
                                    on:input=move |ev| form.brand.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Modelo *"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    required
                                    prop:value=move || form.model.get()
                                    on:input=move |ev| form.model.set(event_target_value(&ev))
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Número de Série"</span></label>
                            <input
                                type="text"
                                class="input input-bordered"
                                prop:value=move || form.serial_number.get()
                                on:input=move |ev| form.serial_number.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Problema Relatado"</span></label>
                            <textarea
                                class="textarea textarea-bordered"
                                rows="3"
                                prop:value=move || form.reported_issues.get()
                                on:input=move |ev| form.reported_issues.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Notas Técnicas"</span></label>
                            <textarea
                                class="textarea textarea-bordered"
                                rows="3"
                                prop:value=move || form.technical_notes.get()
                                on:input=move |ev| form.technical_notes.set(event_target_value(&ev))
                            ></textarea>
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
