//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，
//! 以及基于它的会话持久化实现。

use crate::session::{Session, SessionCache};

/// 会话持久化键
const STORAGE_SESSION_KEY: &str = "techassist_session";

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值
    ///
    /// # 返回
    /// - `true` 如果操作成功
    /// - `false` 如果操作失败（如隐私模式下配额为零）
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 基于 LocalStorage 的会话缓存
///
/// 会话以 JSON 形式持久化；解析失败按无会话处理
/// （旧版本格式残留不应阻塞启动）。
pub struct LocalSessionCache;

impl SessionCache for LocalSessionCache {
    fn load(&self) -> Option<Session> {
        let raw = LocalStorage::get(STORAGE_SESSION_KEY)?;
        serde_json_wasm::from_str(&raw).ok()
    }

    fn store(&self, session: &Session) {
        if let Ok(raw) = serde_json_wasm::to_string(session) {
            LocalStorage::set(STORAGE_SESSION_KEY, &raw);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(STORAGE_SESSION_KEY);
    }
}
