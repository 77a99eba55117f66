//! 会话管理模块
//!
//! 会话状态的唯一事实来源，与路由系统解耦。
//! 核心 `SessionStore` 不依赖浏览器类型：身份服务和持久化缓存
//! 都通过注入的 trait 提供，因此状态机可以在原生环境下测试。
//! 路由服务通过注入的会话阶段信号来检查认证状态。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::BackendApi;
use crate::error::ApiResult;

// =========================================================
// 会话数据
// =========================================================

/// 已认证身份的客户端记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
}

/// 会话阶段
///
/// 状态机：`Unknown → {Authenticated, Anonymous}`，
/// `Anonymous ⇄ Authenticated`。`Unknown` 是唯一的初始状态，
/// 必须在路由守卫做出首次渲染决策前解析完毕。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Session),
}

impl SessionPhase {
    pub fn is_unknown(&self) -> bool {
        matches!(self, SessionPhase::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

// =========================================================
// 注入的协作者
// =========================================================

/// 身份服务边界
///
/// 生产实现是托管身份服务的 REST 客户端，测试中用内存 Mock 替代。
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// 密码登录，成功时返回新会话
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session>;

    /// 注册新账户（服务端要求邮件确认，因此不返回会话）
    async fn sign_up(&self, email: &str, password: &str) -> ApiResult<()>;

    /// 撤销远端会话（尽力而为）
    async fn sign_out(&self, access_token: &str) -> ApiResult<()>;

    /// 校验持久化的令牌是否仍然有效（启动恢复时使用）
    async fn validate(&self, access_token: &str) -> ApiResult<()>;
}

/// 会话持久化边界
///
/// 生产实现基于 LocalStorage，测试中用 RefCell 替代。
pub trait SessionCache {
    fn load(&self) -> Option<Session>;
    fn store(&self, session: &Session);
    fn clear(&self);
}

// =========================================================
// 会话存储（纯状态机）
// =========================================================

pub type SubscriptionId = u64;

type Subscriber = Rc<dyn Fn(&SessionPhase)>;

/// 会话存储
///
/// 会话值的唯一写入者。订阅者在阶段真正变化时各收到一次通知，
/// 重复设置相同阶段不会触发通知。
pub struct SessionStore {
    provider: Rc<dyn IdentityProvider>,
    cache: Rc<dyn SessionCache>,
    phase: RefCell<SessionPhase>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<SubscriptionId>,
}

impl SessionStore {
    pub fn new(provider: Rc<dyn IdentityProvider>, cache: Rc<dyn SessionCache>) -> Self {
        Self {
            provider,
            cache,
            phase: RefCell::new(SessionPhase::Unknown),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// 当前会话阶段的快照
    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    /// 注册阶段变化监听器，返回用于注销的句柄
    pub fn subscribe(&self, callback: impl Fn(&SessionPhase) + 'static) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    /// 注销监听器
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// 状态转换：仅在阶段真正变化时通知订阅者
    fn transition(&self, next: SessionPhase) {
        {
            let mut current = self.phase.borrow_mut();
            if *current == next {
                return;
            }
            *current = next.clone();
        }
        // 先快照再调用，允许回调中再次访问存储
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in snapshot {
            callback(&next);
        }
    }

    /// 启动时恢复持久化的会话
    ///
    /// 恢复的令牌会先经身份服务校验：凭据类失败（过期/撤销）丢弃缓存，
    /// 网络类失败信任本地缓存（避免离线抖动把用户登出）。
    /// 无论结果如何，阶段恰好解析一次。
    pub async fn initialize(&self) {
        match self.cache.load() {
            None => self.transition(SessionPhase::Anonymous),
            Some(session) => match self.provider.validate(&session.access_token).await {
                Ok(()) => self.transition(SessionPhase::Authenticated(session)),
                Err(err) if err.is_credential() => {
                    self.cache.clear();
                    self.transition(SessionPhase::Anonymous);
                }
                Err(_) => self.transition(SessionPhase::Authenticated(session)),
            },
        }
    }

    /// 登录
    ///
    /// 成功时写入持久化缓存并通知订阅者；
    /// 失败时返回分类后的错误，阶段保持不变。
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<()> {
        let session = self.provider.sign_in(email, password).await?;
        self.cache.store(&session);
        self.transition(SessionPhase::Authenticated(session));
        Ok(())
    }

    /// 注册
    ///
    /// 服务端要求单独的邮件确认步骤，因此注册成功不创建会话。
    pub async fn sign_up(&self, email: &str, password: &str) -> ApiResult<()> {
        self.provider.sign_up(email, password).await
    }

    /// 注销
    ///
    /// 远端撤销是尽力而为：即使网络调用失败，本地状态也必须清除，
    /// 否则用户会被困在一个伪认证的界面里。
    pub async fn sign_out(&self) {
        let token = self.phase().session().map(|s| s.access_token.clone());
        if let Some(token) = token {
            let _ = self.provider.sign_out(&token).await;
        }
        self.cache.clear();
        self.transition(SessionPhase::Anonymous);
    }
}

// =========================================================
// Leptos 上下文集成
// =========================================================

/// 会话上下文
///
/// 将存储的阶段镜像到 Leptos 信号，视图和路由服务通过信号
/// 响应变化，而存储仍是唯一写入者。句柄实现 `Copy`，
/// 便于在组件间传递。
#[derive(Clone, Copy)]
pub struct SessionContext {
    phase: ReadSignal<SessionPhase>,
    store: StoredValue<Rc<SessionStore>, LocalStorage>,
}

impl SessionContext {
    /// 创建上下文并桥接存储与信号
    pub fn new(store: Rc<SessionStore>) -> Self {
        let (phase, set_phase) = signal(store.phase());
        store.subscribe(move |p| set_phase.set(p.clone()));
        Self {
            phase,
            store: StoredValue::new_local(store),
        }
    }

    /// 会话阶段信号（只读）
    pub fn phase(&self) -> ReadSignal<SessionPhase> {
        self.phase
    }

    /// 阶段信号（用于路由服务注入）
    pub fn phase_signal(&self) -> Signal<SessionPhase> {
        self.phase.into()
    }

    /// 底层存储句柄（用于发起登录/注销等操作）
    pub fn store(&self) -> Rc<SessionStore> {
        self.store.get_value()
    }

    /// 携带当前会话令牌的数据访问客户端
    ///
    /// 仅在已认证时存在。在响应式上下文中调用会随阶段变化重新求值。
    pub fn api(&self) -> Option<BackendApi> {
        self.phase
            .get()
            .session()
            .map(|s| BackendApi::from_env().with_token(&s.access_token))
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

#[cfg(test)]
mod tests;
