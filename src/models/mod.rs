//! 数据模型模块

pub mod task;

pub use task::{
    Language, LanguageList, ParsedResult, ProgressSnapshot, ResultSegment, TaskHandle, TaskStatus,
    TaskUpdate, TranslationTask,
};
