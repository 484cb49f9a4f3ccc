/// 翻译任务注册表
///
/// 按创建顺序倒序（最新在队首）保存所有翻译任务，
/// 任务状态的唯一持有方，远程客户端不保存任何任务状态
use crate::models::{TaskUpdate, TranslationTask};
use tracing::debug;

type ChangeHook = Box<dyn Fn(&[TranslationTask]) + Send + Sync>;

/// 任务注册表
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<TranslationTask>,
    on_change: Option<ChangeHook>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册变更通知回调（供展示层订阅）
    pub fn set_on_change(&mut self, hook: impl Fn(&[TranslationTask]) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// 新任务插入队首
    ///
    /// 同 id 的旧记录会被替换，保证 taskId 在注册表内唯一
    pub fn add(&mut self, task: TranslationTask) {
        self.tasks.retain(|t| t.task_id != task.task_id);
        self.tasks.insert(0, task);
        self.notify();
    }

    /// 按 id 部分更新，只覆盖提供的字段
    ///
    /// id 不存在时静默忽略：迟到的轮询结果落在已删除的任务上属于正常竞态
    pub fn update(&mut self, task_id: &str, update: TaskUpdate) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.task_id == task_id) else {
            debug!("忽略对不存在任务的更新: {}", task_id);
            return;
        };
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(progress) = update.progress {
            task.progress = progress;
        }
        if let Some(message) = update.message {
            task.message = Some(message);
        }
        self.notify();
    }

    /// 按 id 删除，id 不存在时静默忽略
    pub fn remove(&mut self, task_id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.task_id != task_id);
        if self.tasks.len() == before {
            debug!("忽略对不存在任务的删除: {}", task_id);
            return;
        }
        self.notify();
    }

    /// 按 id 查找
    pub fn get(&self, task_id: &str) -> Option<&TranslationTask> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// 全量列表（展示用，队首为最新任务）
    pub fn list(&self) -> &[TranslationTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn notify(&self) {
        if let Some(hook) = &self.on_change {
            hook(&self.tasks);
        }
    }
}
