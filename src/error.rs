//! 错误类型模块
//!
//! 前端的错误策略：任何远程调用失败都降级为视图内的行内提示，
//! 永远不会使应用崩溃。错误分为五类语义，身份服务的错误通过
//! 检查服务端消息文本进行本地分类，并映射为本地化（pt-BR）的
//! 用户可见文案。

use std::fmt;

// =========================================================
// 错误类别枚举
// =========================================================

/// 错误类别
/// 决定用户看到的提示文案以及调用方的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 邮箱或密码错误（用户可自行纠正）
    Credential,
    /// 账户数据校验失败（如密码过短、服务端约束冲突）
    Validation,
    /// 邮箱已被注册
    DuplicateAccount,
    /// 网络或服务器故障（用户无法纠正）
    Remote,
    /// 兜底类别
    Unknown,
}

// =========================================================
// 核心错误类型
// =========================================================

/// 应用错误
///
/// - `kind`: 错误类别（语义）
/// - `message`: 原始错误消息（供诊断，不直接展示给用户）
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn credential(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Credential, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn duplicate_account(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::DuplicateAccount, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Remote, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message)
    }

    /// 是否为凭据类错误（会话恢复时据此决定是否丢弃缓存）
    pub fn is_credential(&self) -> bool {
        self.kind == ApiErrorKind::Credential
    }

    /// 根据身份服务返回的消息文本进行本地分类
    ///
    /// 托管身份服务只返回英文消息字符串，没有机器可读的错误码，
    /// 因此按子串匹配分类（与原始消息一并保留供诊断）。
    pub fn classify_identity(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();

        if lowered.contains("invalid login credentials") {
            Self::credential(message)
        } else if lowered.contains("already registered") {
            Self::duplicate_account(message)
        } else if lowered.contains("password") {
            Self::validation(message)
        } else {
            Self::unknown(message)
        }
    }

    /// 用户可见的本地化文案（pt-BR）
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Credential => "Email ou senha incorretos",
            ApiErrorKind::DuplicateAccount => "Este email já está registrado",
            ApiErrorKind::Validation => "A senha deve ter pelo menos 6 caracteres",
            ApiErrorKind::Remote => "Erro de conexão com o servidor",
            ApiErrorKind::Unknown => "Ocorreu um erro inesperado",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests;
