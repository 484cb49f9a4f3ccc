//! 本地状态层
//!
//! `config_store` 管理用户配置及其持久化，`task_registry` 管理任务列表；
//! 两者都是普通数据结构加显式的变更通知/落盘副作用，不依赖任何响应式框架

pub mod config_store;
pub mod task_registry;

pub use config_store::{ConfigStore, TranslationConfig, TranslationConfigUpdate};
pub use task_registry::TaskRegistry;
