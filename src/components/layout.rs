//! 导航外壳
//!
//! 持久侧边栏 + 内容区。只在受保护子树内渲染，
//! 注销按钮触发会话存储，导航由路由服务的阶段监听自动处理。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::*;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 各导航项的图标
fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Customers => view! { <Users attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Devices => view! { <Laptop attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::ServiceOrders => view! { <Wrench attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Inventory => view! { <Package attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Financial => view! { <DollarSign attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Reports => view! { <FileText attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <SettingsIcon attr:class="h-5 w-5" /> }.into_any(),
    }
}

/// 侧边栏导航项
#[component]
fn NavItem(route: AppRoute) -> impl IntoView {
    let router = use_router();

    let is_active = move || router.current_route().get() == route;
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(route.to_path());
    };

    view! {
        <li>
            <a
                href=route.to_path()
                class=move || if is_active() { "active" } else { "" }
                on:click=on_click
            >
                {nav_icon(route)}
                {route.label()}
            </a>
        </li>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();

    let on_sign_out = move |_| {
        let store = session.store();
        spawn_local(async move {
            // 远端撤销失败也会清除本地会话
            store.sign_out().await;
        });
    };

    let user_email = move || {
        session
            .phase()
            .get()
            .session()
            .map(|s| s.email.clone())
            .unwrap_or_default()
    };

    view! {
        <div class="flex min-h-screen bg-base-200">
            // 侧边栏
            <aside class="hidden md:flex flex-col w-64 bg-base-100 border-r border-base-300">
                <div class="flex items-center gap-2 px-4 py-5">
                    <Wrench attr:class="w-8 h-8 text-primary" />
                    <span class="text-xl font-semibold">"TechAssist"</span>
                </div>
                <nav class="flex-1 overflow-y-auto">
                    <ul class="menu px-2 gap-1">
                        {AppRoute::NAVIGATION
                            .into_iter()
                            .map(|route| view! { <NavItem route=route /> })
                            .collect_view()}
                    </ul>
                </nav>
                <div class="border-t border-base-300 p-4">
                    <button class="w-full flex items-center gap-3 group" on:click=on_sign_out>
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content w-9 rounded-full">
                                <UserIcon attr:class="h-5 w-5" />
                            </div>
                        </div>
                        <div class="text-left">
                            <p class="text-sm font-medium">"Técnico"</p>
                            <p class="text-xs text-base-content/60 group-hover:text-base-content flex items-center gap-1">
                                "Sair" <LogOut attr:class="inline-block w-4 h-4" />
                            </p>
                        </div>
                    </button>
                    <p class="mt-2 text-xs text-base-content/40 truncate">{user_email}</p>
                </div>
            </aside>

            // 内容区
            <main class="flex-1 overflow-y-auto">
                <div class="py-6">
                    <div class="max-w-7xl mx-auto px-4 sm:px-6 md:px-8">{children()}</div>
                </div>
            </main>
        </div>
    }
}
