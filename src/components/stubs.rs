//! 占位页面
//!
//! 路由表已包含全部业务区块，尚未实现的区块先挂占位页，
//! 保证导航结构完整。

use leptos::prelude::*;

use crate::components::icons::{DollarSign, FileText, Package, SettingsIcon, Wrench};
use crate::web::route::AppRoute;

#[component]
fn StubPage(route: AppRoute, children: Children) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-semibold">{route.label()}</h1>
            <div class="card bg-base-100 shadow">
                <div class="card-body items-center text-center py-16 text-base-content/50">
                    {children()}
                    <p class="mt-2 font-medium">"Esta seção será implementada em breve"</p>
                    <p class="text-sm">"Acompanhe as próximas atualizações do TechAssist."</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ServiceOrdersPage() -> impl IntoView {
    view! {
        <StubPage route=AppRoute::ServiceOrders>
            <Wrench attr:class="h-12 w-12 opacity-40" />
        </StubPage>
    }
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    view! {
        <StubPage route=AppRoute::Inventory>
            <Package attr:class="h-12 w-12 opacity-40" />
        </StubPage>
    }
}

#[component]
pub fn FinancialPage() -> impl IntoView {
    view! {
        <StubPage route=AppRoute::Financial>
            <DollarSign attr:class="h-12 w-12 opacity-40" />
        </StubPage>
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <StubPage route=AppRoute::Reports>
            <FileText attr:class="h-12 w-12 opacity-40" />
        </StubPage>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <StubPage route=AppRoute::Settings>
            <SettingsIcon attr:class="h-12 w-12 opacity-40" />
        </StubPage>
    }
}
