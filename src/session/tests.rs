use super::*;
use crate::error::ApiError;
use futures::executor::block_on;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestContext {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    /// Registered accounts: email -> password
    accounts: RefCell<HashMap<String, String>>,
    /// Tokens the provider considers valid
    valid_tokens: RefCell<Vec<String>>,
    /// Simulate a network outage on every provider call
    network_down: RefCell<bool>,
    /// Simulate sign_out failing remotely
    fail_sign_out: RefCell<bool>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            accounts: RefCell::new(HashMap::new()),
            valid_tokens: RefCell::new(Vec::new()),
            network_down: RefCell::new(false),
            fail_sign_out: RefCell::new(false),
        })
    }

    fn push_log(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    fn register(&self, email: &str, password: &str) {
        self.accounts
            .borrow_mut()
            .insert(email.to_string(), password.to_string());
    }
}

struct TestProvider {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl IdentityProvider for TestProvider {
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.ctx.push_log(format!("provider:sign_in:{}", email));
        if *self.ctx.network_down.borrow() {
            return Err(ApiError::remote("connection refused"));
        }
        match self.ctx.accounts.borrow().get(email) {
            Some(stored) if stored == password => {
                let token = format!("token-{}", email);
                self.ctx.valid_tokens.borrow_mut().push(token.clone());
                Ok(Session {
                    access_token: token,
                    user_id: format!("uid-{}", email),
                    email: email.to_string(),
                })
            }
            _ => Err(ApiError::classify_identity("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, email: &str, _password: &str) -> ApiResult<()> {
        self.ctx.push_log(format!("provider:sign_up:{}", email));
        if self.ctx.accounts.borrow().contains_key(email) {
            return Err(ApiError::classify_identity("User already registered"));
        }
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        self.ctx.push_log(format!("provider:sign_out:{}", access_token));
        if *self.ctx.fail_sign_out.borrow() {
            return Err(ApiError::remote("revoke timed out"));
        }
        Ok(())
    }

    async fn validate(&self, access_token: &str) -> ApiResult<()> {
        self.ctx.push_log(format!("provider:validate:{}", access_token));
        if *self.ctx.network_down.borrow() {
            return Err(ApiError::remote("connection refused"));
        }
        if self.ctx.valid_tokens.borrow().iter().any(|t| t == access_token) {
            Ok(())
        } else {
            Err(ApiError::credential("invalid token"))
        }
    }
}

struct TestCache {
    ctx: Rc<TestContext>,
    stored: RefCell<Option<Session>>,
}

impl SessionCache for TestCache {
    fn load(&self) -> Option<Session> {
        self.ctx.push_log("cache:load".to_string());
        self.stored.borrow().clone()
    }

    fn store(&self, session: &Session) {
        self.ctx.push_log(format!("cache:store:{}", session.email));
        *self.stored.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.ctx.push_log("cache:clear".to_string());
        *self.stored.borrow_mut() = None;
    }
}

fn build_store(ctx: &Rc<TestContext>, cached: Option<Session>) -> SessionStore {
    SessionStore::new(
        Rc::new(TestProvider { ctx: ctx.clone() }),
        Rc::new(TestCache {
            ctx: ctx.clone(),
            stored: RefCell::new(cached),
        }),
    )
}

fn cached_session(email: &str) -> Session {
    Session {
        access_token: format!("token-{}", email),
        user_id: format!("uid-{}", email),
        email: email.to_string(),
    }
}

/// 记录观察到的阶段序列
fn record_phases(store: &SessionStore) -> Rc<RefCell<Vec<SessionPhase>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    store.subscribe(move |phase| seen_cb.borrow_mut().push(phase.clone()));
    seen
}

// =========================================================
// initialize
// =========================================================

#[test]
fn initialize_without_cached_session_resolves_anonymous() {
    let ctx = TestContext::new();
    let store = build_store(&ctx, None);
    let seen = record_phases(&store);

    assert!(store.phase().is_unknown());
    block_on(store.initialize());

    assert_eq!(store.phase(), SessionPhase::Anonymous);
    assert_eq!(seen.borrow().as_slice(), &[SessionPhase::Anonymous]);
}

#[test]
fn initialize_with_valid_cached_session_resolves_authenticated() {
    let ctx = TestContext::new();
    ctx.valid_tokens
        .borrow_mut()
        .push("token-user@x.com".to_string());
    let store = build_store(&ctx, Some(cached_session("user@x.com")));

    block_on(store.initialize());

    assert!(store.phase().is_authenticated());
    assert_eq!(
        ctx.log.borrow().as_slice(),
        &[
            "cache:load".to_string(),
            "provider:validate:token-user@x.com".to_string(),
        ]
    );
}

#[test]
fn initialize_with_rejected_token_clears_cache_and_resolves_anonymous() {
    let ctx = TestContext::new();
    // 缓存的令牌未在 valid_tokens 中注册 => 校验返回凭据错误
    let store = build_store(&ctx, Some(cached_session("user@x.com")));

    block_on(store.initialize());

    assert_eq!(store.phase(), SessionPhase::Anonymous);
    assert!(ctx.log.borrow().contains(&"cache:clear".to_string()));
}

#[test]
fn initialize_trusts_cache_when_validation_hits_network_failure() {
    let ctx = TestContext::new();
    *ctx.network_down.borrow_mut() = true;
    let store = build_store(&ctx, Some(cached_session("user@x.com")));

    block_on(store.initialize());

    assert!(store.phase().is_authenticated());
    assert!(!ctx.log.borrow().contains(&"cache:clear".to_string()));
}

// =========================================================
// sign_in / sign_up
// =========================================================

#[test]
fn sign_in_success_stores_session_and_notifies_once() {
    let ctx = TestContext::new();
    ctx.register("user@x.com", "secret");
    let store = build_store(&ctx, None);
    block_on(store.initialize());
    let seen = record_phases(&store);

    block_on(store.sign_in("user@x.com", "secret")).expect("sign in should succeed");

    assert!(store.phase().is_authenticated());
    assert_eq!(seen.borrow().len(), 1);
    assert!(ctx
        .log
        .borrow()
        .contains(&"cache:store:user@x.com".to_string()));
}

#[test]
fn sign_in_with_wrong_password_leaves_phase_untouched() {
    let ctx = TestContext::new();
    ctx.register("user@x.com", "secret");
    let store = build_store(&ctx, None);
    block_on(store.initialize());
    let seen = record_phases(&store);

    let err = block_on(store.sign_in("user@x.com", "wrong")).unwrap_err();

    assert!(err.is_credential());
    assert_eq!(err.user_message(), "Email ou senha incorretos");
    assert_eq!(store.phase(), SessionPhase::Anonymous);
    assert!(seen.borrow().is_empty());
}

#[test]
fn sign_up_duplicate_email_reports_error_without_session() {
    let ctx = TestContext::new();
    ctx.register("user@x.com", "secret");
    let store = build_store(&ctx, None);
    block_on(store.initialize());

    let err = block_on(store.sign_up("user@x.com", "secret")).unwrap_err();

    assert_eq!(err.user_message(), "Este email já está registrado");
    assert_eq!(store.phase(), SessionPhase::Anonymous);
}

#[test]
fn sign_up_success_does_not_create_session() {
    let ctx = TestContext::new();
    let store = build_store(&ctx, None);
    block_on(store.initialize());

    block_on(store.sign_up("new@x.com", "secret")).expect("sign up should succeed");

    // 需要邮件确认，阶段保持匿名
    assert_eq!(store.phase(), SessionPhase::Anonymous);
}

// =========================================================
// sign_out
// =========================================================

#[test]
fn sign_out_clears_local_state_even_when_revoke_fails() {
    let ctx = TestContext::new();
    ctx.register("user@x.com", "secret");
    *ctx.fail_sign_out.borrow_mut() = true;
    let store = build_store(&ctx, None);
    block_on(store.initialize());
    block_on(store.sign_in("user@x.com", "secret")).unwrap();

    block_on(store.sign_out());

    assert_eq!(store.phase(), SessionPhase::Anonymous);
    assert!(ctx.log.borrow().contains(&"cache:clear".to_string()));
    // 远端撤销确实被尝试过
    assert!(ctx
        .log
        .borrow()
        .iter()
        .any(|l| l.starts_with("provider:sign_out:")));
}

#[test]
fn sign_out_while_anonymous_skips_remote_revoke() {
    let ctx = TestContext::new();
    let store = build_store(&ctx, None);
    block_on(store.initialize());

    block_on(store.sign_out());

    assert!(!ctx
        .log
        .borrow()
        .iter()
        .any(|l| l.starts_with("provider:sign_out:")));
}

// =========================================================
// subscription semantics
// =========================================================

#[test]
fn subscribers_are_notified_exactly_once_per_transition() {
    let ctx = TestContext::new();
    ctx.register("user@x.com", "secret");
    let store = build_store(&ctx, None);
    let seen = record_phases(&store);

    block_on(store.initialize()); // Unknown -> Anonymous
    block_on(store.sign_in("user@x.com", "secret")).unwrap(); // -> Authenticated
    block_on(store.sign_out()); // -> Anonymous
    block_on(store.sign_out()); // 无变化,不得重复通知

    let phases = seen.borrow();
    assert_eq!(phases.len(), 3);
    assert_eq!(phases[0], SessionPhase::Anonymous);
    assert!(phases[1].is_authenticated());
    assert_eq!(phases[2], SessionPhase::Anonymous);
}

#[test]
fn unsubscribed_listener_receives_no_further_notifications() {
    let ctx = TestContext::new();
    let store = build_store(&ctx, None);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    let id = store.subscribe(move |phase: &SessionPhase| seen_cb.borrow_mut().push(phase.clone()));
    store.unsubscribe(id);

    block_on(store.initialize());

    assert!(seen.borrow().is_empty());
}

#[test]
fn multiple_subscribers_each_see_every_transition() {
    let ctx = TestContext::new();
    let store = build_store(&ctx, None);
    let first = record_phases(&store);
    let second = record_phases(&store);

    block_on(store.initialize());

    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}
