//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod bmi_handler;

pub use bmi_handler::*;
