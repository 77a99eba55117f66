//! 数据访问模块
//!
//! 托管后端的瘦客户端：身份服务（`/auth/v1`）+ 通用表存储
//! （`/rest/v1`，PostgREST 约定）。不做批处理、不做重试、不做缓存，
//! 失败原样上抛给调用视图。

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config;
use crate::error::{ApiError, ApiResult};
use crate::session::{IdentityProvider, Session};

// =========================================================
// 表查询构建器
// =========================================================

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ordering {
    Asc,
    Desc,
}

/// 表查询参数
///
/// 累积 select / 过滤 / 排序，生成 PostgREST 风格的查询串。
/// 纯数据结构，不触碰网络。
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Ordering)>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self {
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// 指定返回列（含关联展开，如 `*,customer:customers(name,phone)`）
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    /// 等值过滤
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// 按列升序
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some((column.into(), Ordering::Asc));
        self
    }

    /// 按列降序
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some((column.into(), Ordering::Desc));
        self
    }

    /// 生成查询串
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", self.select)];
        for (column, value) in &self.filters {
            parts.push(format!("{}=eq.{}", column, value));
        }
        if let Some((column, direction)) = &self.order {
            let dir = match direction {
                Ordering::Asc => "asc",
                Ordering::Desc => "desc",
            };
            parts.push(format!("order={}.{}", column, dir));
        }
        parts.join("&")
    }
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// 后端客户端
// =========================================================

/// 托管后端客户端
///
/// 每个请求携带匿名公钥；存在会话时额外携带 Bearer 令牌。
#[derive(Clone, Debug, PartialEq)]
pub struct BackendApi {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl BackendApi {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// 从编译期配置构建客户端
    pub fn from_env() -> Self {
        Self::new(config::backend_url(), config::anon_key())
    }

    /// 附加会话令牌
    pub fn with_token(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    fn rest_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{}?{}", self.base_url, table, query)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn bearer(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(&self.anon_key)
        )
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer())
    }

    // =========================================================
    // 表操作
    // =========================================================

    /// 查询记录
    pub async fn query<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> ApiResult<Vec<T>> {
        let url = self.rest_url(table, &query.to_query_string());
        let res = self
            .with_headers(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(rest_error(res).await);
        }

        res.json::<Vec<T>>()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))
    }

    /// 插入记录，返回服务端生成的完整记录
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        record: &B,
    ) -> ApiResult<T> {
        let url = self.rest_url(table, "select=*");
        let res = self
            .with_headers(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(record)
            .map_err(|e| ApiError::remote(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(rest_error(res).await);
        }

        first_row(res).await
    }

    /// 按主键更新记录，返回更新后的记录
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        key: &str,
        patch: &B,
    ) -> ApiResult<T> {
        let url = self.rest_url(table, &format!("id=eq.{}&select=*", key));
        let res = self
            .with_headers(Request::patch(&url))
            .header("Prefer", "return=representation")
            .json(patch)
            .map_err(|e| ApiError::remote(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(rest_error(res).await);
        }

        first_row(res).await
    }

    /// 按主键删除记录
    pub async fn remove(&self, table: &str, key: &str) -> ApiResult<()> {
        let url = self.rest_url(table, &format!("id=eq.{}", key));
        let res = self
            .with_headers(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(rest_error(res).await);
        }

        Ok(())
    }
}

/// 从 `return=representation` 响应中取出第一行
async fn first_row<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    let rows = res
        .json::<Vec<T>>()
        .await
        .map_err(|e| ApiError::remote(e.to_string()))?;
    rows.into_iter()
        .next()
        .ok_or_else(|| ApiError::remote("resposta vazia do servidor"))
}

/// 表操作的错误映射
///
/// 4xx 的约束冲突归为校验错误，其余一律按远程故障处理。
async fn rest_error(res: Response) -> ApiError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json_wasm::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.text())
        .unwrap_or(body);

    match status {
        400 | 409 | 422 => ApiError::validation(message),
        _ => ApiError::remote(format!("HTTP {}: {}", status, message)),
    }
}

// =========================================================
// 身份服务
// =========================================================

/// 身份服务返回的错误体（字段名因端点而异，全部可选）
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn text(self) -> Option<String> {
        self.msg.or(self.error_description).or(self.message)
    }
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// 身份端点的错误解析：读取错误体并按消息文本分类
async fn identity_error(res: Response) -> ApiError {
    let body = res.text().await.unwrap_or_default();
    let message = serde_json_wasm::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.text())
        .unwrap_or(body);
    ApiError::classify_identity(message)
}

#[async_trait(?Send)]
impl IdentityProvider for BackendApi {
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let url = self.auth_url("/token?grant_type=password");
        let res = Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&CredentialsBody { email, password })
            .map_err(|e| ApiError::remote(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(identity_error(res).await);
        }

        let token = res
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        Ok(Session {
            access_token: token.access_token,
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> ApiResult<()> {
        let url = self.auth_url("/signup");
        let res = Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&CredentialsBody { email, password })
            .map_err(|e| ApiError::remote(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(identity_error(res).await);
        }

        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        let url = self.auth_url("/logout");
        let res = Request::post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        if !res.ok() {
            return Err(ApiError::remote(format!(
                "falha ao revogar sessão: HTTP {}",
                res.status()
            )));
        }

        Ok(())
    }

    async fn validate(&self, access_token: &str) -> ApiResult<()> {
        let url = self.auth_url("/user");
        let res = Request::get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| ApiError::remote(e.to_string()))?;

        match res.status() {
            _ if res.ok() => Ok(()),
            401 | 403 => Err(ApiError::credential("token expirado ou revogado")),
            status => Err(ApiError::remote(format!("HTTP {}", status))),
        }
    }
}

#[cfg(test)]
mod tests;
