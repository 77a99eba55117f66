//! TechAssist 前端应用
//!
//! 面向托管后端（BaaS）的单页应用，采用 Context-Driven 的
//! 高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含认证守卫）
//! - `session`: 会话状态管理（可原生测试的状态机）
//! - `api`: 数据访问门面（REST 表约定）
//! - `components`: UI 组件层

pub mod api;
mod config;
pub mod error;
pub mod model;
pub mod session;
mod components {
    mod auth_page;
    mod customers;
    mod dashboard;
    mod devices;
    mod icons;
    mod layout;
    mod records;
    mod stubs;

    pub use auth_page::AuthPage;
    pub use customers::CustomersPage;
    pub use dashboard::DashboardPage;
    pub use devices::DevicesPage;
    pub use layout::Layout;
    pub use stubs::{FinancialPage, InventoryPage, ReportsPage, ServiceOrdersPage, SettingsPage};
}

// 浏览器侧集成模块
// 路由器封装 History API，存储实现基于 LocalStorage 的会话缓存。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalSessionCache;
}

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::BackendApi;
use crate::components::*;
use crate::session::{SessionContext, SessionStore};
use crate::web::LocalSessionCache;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 受保护路由统一包在导航外壳里。
fn route_matcher(route: AppRoute) -> AnyView {
    fn shell<F, IV>(page: F) -> AnyView
    where
        F: Fn() -> IV + Send + 'static,
        IV: IntoView + 'static,
    {
        view! { <Layout>{page()}</Layout> }.into_any()
    }

    match route {
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        AppRoute::Dashboard => shell(|| view! { <DashboardPage /> }),
        AppRoute::Customers => shell(|| view! { <CustomersPage /> }),
        AppRoute::Devices => shell(|| view! { <DevicesPage /> }),
        AppRoute::ServiceOrders => shell(|| view! { <ServiceOrdersPage /> }),
        AppRoute::Inventory => shell(|| view! { <InventoryPage /> }),
        AppRoute::Financial => shell(|| view! { <FinancialPage /> }),
        AppRoute::Reports => shell(|| view! { <ReportsPage /> }),
        AppRoute::Settings => shell(|| view! { <SettingsPage /> }),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 组装会话存储：REST 身份服务 + LocalStorage 缓存
    let provider = Rc::new(BackendApi::from_env());
    let cache = Rc::new(LocalSessionCache);
    let store = Rc::new(SessionStore::new(provider, cache));

    // 2. 创建会话上下文（阶段镜像到信号）
    let session = SessionContext::new(store.clone());
    provide_context(session);

    // 3. 启动时恢复持久化的会话（阶段从 Unknown 解析）
    spawn_local(async move {
        store.initialize().await;
    });

    view! {
        // 4. 路由器组件：注入会话阶段信号实现守卫
        <Router phase=session.phase_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
