//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 驱动任务从创建到终态的观测流程。所有注册表变更都发生在这一条
//! 编排流里，每个活动任务对应一个独立的轮询周期，周期之间只触碰
//! 各自任务的注册表条目，互不干扰。
//!
//! ## 层次关系
//!
//! ```text
//! app (上传 -> 登记 -> 轮询 -> 下载)
//!     ↓
//! orchestrator::Poller (单个任务的轮询周期)
//!     ↓
//! clients::TranslateClient (类型化远程调用)
//!     ↓
//! store::TaskRegistry (任务状态唯一持有方)
//! ```

pub mod poller;

pub use poller::Poller;
