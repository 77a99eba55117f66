//! 登录/注册页面
//!
//! 同一表单在登录与注册两种模式间切换。登录成功后不在此处导航：
//! 路由服务监听会话阶段变化并自动重定向。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{AlertCircle, CheckCircle, Wrench};
use crate::session::use_session;

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();

    let (is_sign_up, set_is_sign_up) = signal(false);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    // 提示内容, 是否成功
    let (notice, set_notice) = signal(Option::<(String, bool)>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_notice.set(Some(("Preencha todos os campos".to_string(), false)));
            return;
        }

        set_is_submitting.set(true);
        set_notice.set(None);

        let store = session.store();
        let sign_up = is_sign_up.get();
        spawn_local(async move {
            if sign_up {
                match store.sign_up(&email.get_untracked(), &password.get_untracked()).await {
                    Ok(()) => {
                        set_notice.set(Some((
                            "Conta criada com sucesso! Você já pode fazer login.".to_string(),
                            true,
                        )));
                        set_is_sign_up.set(false);
                    }
                    Err(err) => {
                        set_notice.set(Some((err.user_message().to_string(), false)));
                    }
                }
            } else {
                // 成功时无需处理：路由守卫会随阶段变化自动跳转
                if let Err(err) = store
                    .sign_in(&email.get_untracked(), &password.get_untracked())
                    .await
                {
                    set_notice.set(Some((err.user_message().to_string(), false)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Wrench attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"TechAssist"</h1>
                        <p class="text-base-content/70">
                            {move || if is_sign_up.get() { "Crie sua conta" } else { "Entre na sua conta" }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || notice.get().is_some()>
                            <div
                                role="alert"
                                class=move || {
                                    let (_, is_success) = notice.get().unwrap();
                                    if is_success {
                                        "alert alert-success text-sm py-2"
                                    } else {
                                        "alert alert-error text-sm py-2"
                                    }
                                }
                            >
                                {move || {
                                    let (_, is_success) = notice.get().unwrap();
                                    if is_success {
                                        view! { <CheckCircle attr:class="h-5 w-5 shrink-0" /> }.into_any()
                                    } else {
                                        view! { <AlertCircle attr:class="h-5 w-5 shrink-0" /> }.into_any()
                                    }
                                }}
                                <span>{move || notice.get().unwrap().0}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete=move || if is_sign_up.get() { "new-password" } else { "current-password" }
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    if is_sign_up.get() {
                                        view! { <span class="loading loading-spinner"></span> "Criando conta..." }.into_any()
                                    } else {
                                        view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                    }
                                } else if is_sign_up.get() {
                                    "Criar conta".into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                    </form>

                    <div class="px-8 pb-6">
                        <button
                            type="button"
                            class="w-full text-center text-sm link link-primary no-underline hover:underline"
                            on:click=move |_| {
                                set_is_sign_up.update(|v| *v = !*v);
                                set_notice.set(None);
                            }
                        >
                            {move || if is_sign_up.get() {
                                "Já tem uma conta? Entre aqui"
                            } else {
                                "Não tem uma conta? Cadastre-se"
                            }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
