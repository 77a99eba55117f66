//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 显式的路由表：路径 ⇄ 枚举，外加能力标记（公开/受保护）。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录/注册页面（默认路由，唯一的公开业务页面）
    #[default]
    Auth,
    /// 总览面板（需要认证）
    Dashboard,
    /// 客户管理（需要认证）
    Customers,
    /// 设备管理（需要认证）
    Devices,
    /// 服务工单（需要认证）
    ServiceOrders,
    /// 库存管理（需要认证）
    Inventory,
    /// 财务（需要认证）
    Financial,
    /// 报表（需要认证）
    Reports,
    /// 系统设置（需要认证）
    Settings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/auth" => Self::Auth,
            "/" => Self::Dashboard,
            "/customers" => Self::Customers,
            "/devices" => Self::Devices,
            "/service-orders" => Self::ServiceOrders,
            "/inventory" => Self::Inventory,
            "/financial" => Self::Financial,
            "/reports" => Self::Reports,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Auth => "/auth",
            Self::Dashboard => "/",
            Self::Customers => "/customers",
            Self::Devices => "/devices",
            Self::ServiceOrders => "/service-orders",
            Self::Inventory => "/inventory",
            Self::Financial => "/financial",
            Self::Reports => "/reports",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Auth | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// 获取认证失败时的重定向目标
    ///
    /// 原始请求路径被丢弃（不支持登录后回跳深链）。
    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 侧边栏导航标签（pt-BR）
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auth => "Login",
            Self::Dashboard => "Dashboard",
            Self::Customers => "Clientes",
            Self::Devices => "Aparelhos",
            Self::ServiceOrders => "Ordens de Serviço",
            Self::Inventory => "Estoque",
            Self::Financial => "Financeiro",
            Self::Reports => "Relatórios",
            Self::Settings => "Configurações",
            Self::NotFound => "404",
        }
    }

    /// 侧边栏展示的受保护路由（按导航顺序）
    pub const NAVIGATION: [AppRoute; 8] = [
        Self::Dashboard,
        Self::Customers,
        Self::Devices,
        Self::ServiceOrders,
        Self::Inventory,
        Self::Financial,
        Self::Reports,
        Self::Settings,
    ];
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests;
