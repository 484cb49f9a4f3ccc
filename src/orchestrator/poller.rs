/// 进度轮询器
///
/// 为每个活动任务驱动一个独立的轮询周期，按固定间隔查询进度并把快照
/// 原样写回注册表，直到任务进入终态或被移除
use crate::clients::ProgressSource;
use crate::models::TaskUpdate;
use crate::store::TaskRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// 轮询器
pub struct Poller<S> {
    source: Arc<S>,
    registry: Arc<Mutex<TaskRegistry>>,
    interval: Duration,
}

impl<S: ProgressSource + 'static> Poller<S> {
    pub fn new(source: Arc<S>, registry: Arc<Mutex<TaskRegistry>>, interval: Duration) -> Self {
        Self {
            source,
            registry,
            interval,
        }
    }

    /// 启动一个任务的轮询周期
    ///
    /// 周期结束条件：任务进入终态、任务已从注册表移除、服务端明确拒绝查询。
    /// 单次查询的传输失败只算观测空窗，下个周期重试，不改变任务状态
    pub fn spawn_cycle(&self, task_id: impl Into<String>) -> JoinHandle<()> {
        let task_id = task_id.into();
        let source = Arc::clone(&self.source);
        let registry = Arc::clone(&self.registry);
        let interval = self.interval;

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // 查询前先确认任务仍在注册表中且未进入终态
                {
                    let registry = registry.lock().await;
                    match registry.get(&task_id) {
                        None => {
                            debug!("任务 {} 已被移除，停止轮询", task_id);
                            return;
                        }
                        Some(task) if task.status.is_terminal() => return,
                        Some(_) => {}
                    }
                }

                match source.get_progress(&task_id).await {
                    Ok(snapshot) => {
                        let status = snapshot.status;
                        let progress = snapshot.progress;
                        // 任务可能在请求在途时被移除，update 对不存在的 id 不做任何事
                        registry.lock().await.update(&task_id, TaskUpdate::from(snapshot));
                        if status.is_terminal() {
                            info!("任务 {} 进入终态: {}", task_id, status.label());
                            return;
                        }
                        debug!("任务 {} 进度: {}% ({})", task_id, progress, status);
                    }
                    Err(e) if e.is_transient() => {
                        warn!("任务 {} 进度查询失败，下个周期重试: {}", task_id, e);
                    }
                    Err(e) => {
                        error!("任务 {} 进度查询被服务端拒绝，停止轮询: {}", task_id, e);
                        return;
                    }
                }
            }
        })
    }
}
