//! 存储层模块
//!
//! 提供测量记录的持久化，支持 SurrealDB 与进程内存储。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub mod factory;
pub mod repository;
