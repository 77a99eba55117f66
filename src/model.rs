//! 领域模型模块
//!
//! 远程表存储的记录结构。核心层只负责透传这些记录，
//! 唯一的领域建模是设备状态词汇表（静态枚举，无状态机）。

use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const TABLE_CUSTOMERS: &str = "customers";
pub const TABLE_DEVICES: &str = "devices";

/// 设备类型选项（表单下拉框）
pub const DEVICE_TYPES: [&str; 7] = [
    "Notebook",
    "Desktop",
    "Smartphone",
    "Tablet",
    "Impressora",
    "Monitor",
    "Outros",
];

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 客户记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    /// 搜索过滤：匹配姓名/邮箱/电话（不区分大小写）
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&term))
            || self
                .phone
                .as_deref()
                .is_some_and(|p| p.contains(&term))
    }
}

/// 客户写入载荷（创建/更新时提交，id 与 created_at 由服务端生成）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// 设备状态
///
/// 静态词汇表，不含状态转换逻辑，服务端不做流转校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    #[default]
    PendingAnalysis,
    InRepair,
    WaitingParts,
    Ready,
    Delivered,
}

impl DeviceStatus {
    /// 全部状态（表单下拉框按此顺序展示）
    pub const ALL: [DeviceStatus; 5] = [
        DeviceStatus::PendingAnalysis,
        DeviceStatus::InRepair,
        DeviceStatus::WaitingParts,
        DeviceStatus::Ready,
        DeviceStatus::Delivered,
    ];

    /// 线上存储值
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::PendingAnalysis => "pending_analysis",
            DeviceStatus::InRepair => "in_repair",
            DeviceStatus::WaitingParts => "waiting_parts",
            DeviceStatus::Ready => "ready",
            DeviceStatus::Delivered => "delivered",
        }
    }

    /// 从存储值解析（未识别的值回退到默认状态）
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .unwrap_or_default()
    }

    /// 用户可见标签（pt-BR）
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::PendingAnalysis => "Aguardando Análise",
            DeviceStatus::InRepair => "Em Reparo",
            DeviceStatus::WaitingParts => "Aguardando Peças",
            DeviceStatus::Ready => "Pronto",
            DeviceStatus::Delivered => "Entregue",
        }
    }

    /// 状态徽章的样式类
    pub fn badge_class(&self) -> &'static str {
        match self {
            DeviceStatus::PendingAnalysis => "badge badge-warning",
            DeviceStatus::InRepair => "badge badge-info",
            DeviceStatus::WaitingParts => "badge badge-secondary",
            DeviceStatus::Ready => "badge badge-success",
            DeviceStatus::Delivered => "badge badge-ghost",
        }
    }
}

/// 容错反序列化：未识别的存储值回退到默认状态，
/// 单条脏记录不能让整表加载失败。
impl<'de> Deserialize<'de> for DeviceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(DeviceStatus::parse(&value))
    }
}

/// 内嵌在设备记录中的客户摘要（由查询的关联展开填充）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// 设备记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    pub status: DeviceStatus,
    #[serde(default)]
    pub reported_issues: Option<String>,
    #[serde(default)]
    pub technical_notes: Option<String>,
    /// 关联展开的客户摘要，仅在查询时存在
    #[serde(default)]
    pub customer: Option<CustomerRef>,
}

impl Device {
    /// 搜索过滤：匹配品牌/型号/序列号/客户名（不区分大小写）
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.brand.to_lowercase().contains(&term)
            || self.model.to_lowercase().contains(&term)
            || self
                .serial_number
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
            || self
                .customer
                .as_ref()
                .is_some_and(|c| c.name.to_lowercase().contains(&term))
    }
}

/// 设备写入载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevicePayload {
    pub customer_id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub status: DeviceStatus,
    pub reported_issues: Option<String>,
    pub technical_notes: Option<String>,
}

#[cfg(test)]
mod tests;
