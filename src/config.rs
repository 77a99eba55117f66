//! 后端端点配置模块
//!
//! 前端是纯静态 SPA，后端是托管服务（身份认证 + 表存储），
//! 因此端点在编译期注入，不存在运行时配置文件。

/// 本地开发环境的默认后端地址
const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

/// 本地开发环境的默认匿名公钥（非机密，随前端分发）
const DEFAULT_ANON_KEY: &str = "techassist-dev-anon-key";

/// 获取后端基础 URL
///
/// 通过 `TECHASSIST_BACKEND_URL` 环境变量在编译期覆盖。
pub fn backend_url() -> String {
    option_env!("TECHASSIST_BACKEND_URL")
        .unwrap_or(DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

/// 获取后端匿名公钥
///
/// 通过 `TECHASSIST_ANON_KEY` 环境变量在编译期覆盖。
pub fn anon_key() -> String {
    option_env!("TECHASSIST_ANON_KEY")
        .unwrap_or(DEFAULT_ANON_KEY)
        .to_string()
}
