//! 翻译任务数据模型
//!
//! 定义任务、任务状态与各接口的响应载荷，字段名与服务端 JSON 保持一致

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 任务状态
///
/// `completed` 和 `failed` 为终态，进入终态后不再发生任何转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// 等待解析
    Pending,
    /// 解析/翻译中
    Processing,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
}

impl TaskStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// 状态的中文标签（用于展示）
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "待解析",
            TaskStatus::Processing => "解析中",
            TaskStatus::Completed => "解析完成",
            TaskStatus::Failed => "解析失败",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// 翻译任务
///
/// `task_id` 由服务端在上传时分配，在注册表内唯一；`filename` 创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationTask {
    pub task_id: String,
    pub filename: String,
    pub status: TaskStatus,
    /// 进度百分比（0-100）
    pub progress: u8,
    /// 本地创建时间，用于展示排序
    pub create_time: String,
    /// 补充说明，失败时为失败原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TranslationTask {
    /// 根据上传响应创建本地任务记录
    pub fn from_upload(handle: &TaskHandle, filename: impl Into<String>) -> Self {
        Self {
            task_id: handle.task_id.clone(),
            filename: filename.into(),
            status: handle.status,
            progress: 0,
            create_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            message: None,
        }
    }
}

/// 任务的部分更新，缺失字段保持原值
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub progress: Option<u8>,
    pub message: Option<String>,
}

impl From<ProgressSnapshot> for TaskUpdate {
    fn from(snapshot: ProgressSnapshot) -> Self {
        Self {
            status: Some(snapshot.status),
            progress: Some(snapshot.progress),
            message: snapshot.message,
        }
    }
}

/// 上传接口的响应：服务端分配的任务 ID 与初始状态
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHandle {
    pub task_id: String,
    pub status: TaskStatus,
}

/// 单次进度快照
///
/// 每次查询返回的都是幂等快照而非增量，丢失或重复读取不会破坏状态
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressSnapshot {
    pub status: TaskStatus,
    pub progress: u8,
    #[serde(default)]
    pub message: Option<String>,
}

/// 支持的语言
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// 语言列表接口的响应
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageList {
    pub languages: Vec<Language>,
}

/// 解析结果中的一个分段
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSegment {
    pub index: usize,
    pub markdown_content: String,
}

/// 任务的结构化解析结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResult {
    pub segments: Vec<ResultSegment>,
}
