//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证(守卫) -> 处理 -> 加载"的导航流程。
//!
//! 守卫契约（按会话阶段）：
//! - `Unknown`: 不重定向，出口渲染中性占位符（避免加载间隙误判闪跳）
//! - `Anonymous`: 受保护路由重定向到登录页，原始路径被丢弃
//! - `Authenticated`: 原样渲染请求的子树

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::session::SessionPhase;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 守卫裁决（纯函数）
///
/// 给定目标路由与会话阶段，返回实际应加载的路由：
/// - 明确匿名时受保护路由改写为登录页，原始路径被丢弃
/// - 已认证时登录页改写为面板
/// - Unknown 阶段放行，由出口渲染占位符，待阶段解析后守卫效果再纠正
///
/// navigate 与 popstate 共用同一裁决，保证前进/后退不会绕过守卫。
fn resolve_route(target: AppRoute, phase: &SessionPhase) -> AppRoute {
    if target.requires_auth() && *phase == SessionPhase::Anonymous {
        AppRoute::auth_failure_redirect()
    } else if target.should_redirect_when_authenticated() && phase.is_authenticated() {
        AppRoute::auth_success_redirect()
    } else {
        target
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话阶段信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话阶段（注入的信号，实现解耦）
    phase: Signal<SessionPhase>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `phase` - 会话阶段信号，由外部注入实现解耦
    fn new(phase: Signal<SessionPhase>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            phase,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前会话阶段（响应式读取）
    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // --- Step 1: 验证目标路由 ---
        let phase = self.phase.get_untracked();
        let resolved = resolve_route(target_route, &phase);
        if resolved != target_route {
            web_sys::console::log_1(
                &format!("[Router] Guard redirect: {} -> {}", target_route, resolved).into(),
            );
        }

        // --- Step 2: 加载页面 (更新状态) ---
        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let phase = self.phase;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);

            // popstate 时执行与 navigate 相同的守卫裁决
            let resolved = resolve_route(target_route, &phase.get_untracked());
            if resolved != target_route {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话阶段变化时的自动重定向
    ///
    /// 后台登出（令牌过期等）必须立即把用户逐出受保护视图。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let phase = self.phase;

        Effect::new(move |_| {
            let phase = phase.get();
            let route = current_route.get_untracked();

            match phase {
                SessionPhase::Anonymous if route.requires_auth() => {
                    let redirect = AppRoute::auth_failure_redirect();
                    push_history_state(redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Session ended: redirecting to login.".into(),
                    );
                }
                SessionPhase::Authenticated(_) if route.should_redirect_when_authenticated() => {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Session started: redirecting to dashboard.".into(),
                    );
                }
                // Unknown 阶段不做任何决策
                _ => {}
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(phase: Signal<SessionPhase>) -> RouterService {
    let router = RouterService::new(phase);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话阶段信号
    phase: Signal<SessionPhase>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(phase);

    children()
}

/// 路由出口组件 - 守卫的最后一道防线
///
/// 根据当前路由状态渲染对应的组件。
/// 受保护的子树只在 `Authenticated` 阶段渲染；
/// `Unknown` 和 `Anonymous` 阶段渲染中性占位符
/// （后者随即被守卫效果重定向）。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        if current.requires_auth() && !router.phase().is_authenticated() {
            view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any()
        } else {
            matcher(current)
        }
    }
}

#[cfg(test)]
mod tests;
