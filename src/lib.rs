//! # PDF Translator Client
//!
//! PDF 翻译服务的 Rust 客户端：上传文档、跟踪服务端异步解析/翻译任务、
//! 下载译文，并维护本地用户配置。
//!
//! ## 架构设计
//!
//! 本系统按职责分为四层：
//!
//! ### ① 状态层（Store）
//! - `store/` - 任务与配置的唯一持有方
//! - `TaskRegistry` - 有序任务集合，变更通知钩子供展示层订阅
//! - `ConfigStore` - 用户配置，每次更新同步持久化
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 与翻译服务的类型化请求/响应边界
//! - `TranslateClient` - 上传、查询进度、提交翻译、下载产物、配置镜像
//! - `ProgressSource` - 轮询器依赖的进度查询抽象
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - 任务生命周期的驱动
//! - `Poller` - 每个活动任务一个轮询周期，终态或移除即停止
//!
//! ### ④ 应用层（App）
//! - `app` - 装配各组件，实现"上传 -> 轮询 -> 下载"主流程
//!
//! ## 状态机
//!
//! ```text
//! pending -> processing -> { completed | failed }
//! ```
//!
//! `completed` / `failed` 为终态。单次进度查询失败不改变任务状态，
//! 只有服务端明确报告 `failed` 才把任务置为失败。

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod store;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{ProgressSource, TranslateClient};
pub use config::Settings;
pub use error::{AppError, AppResult};
pub use models::{ProgressSnapshot, TaskHandle, TaskStatus, TaskUpdate, TranslationTask};
pub use orchestrator::Poller;
pub use store::{ConfigStore, TaskRegistry, TranslationConfig, TranslationConfigUpdate};
pub use utils::logging as logger;
