//! BMI Function - 体重指数计算函数
//!
//! 接收身高（厘米）与体重（千克），计算 BMI，将测量记录写入键值表，
//! 并以函数调用响应的形式返回结果。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
