//! 通用工具模块

pub mod format;
pub mod logging;
