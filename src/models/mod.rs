//! 核心数据模型模块
//!
//! 定义调用事件、调用响应以及持久化的测量记录。

pub mod invocation;
pub mod measurement;

pub use invocation::*;
pub use measurement::*;
