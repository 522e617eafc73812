//! 调用事件与调用响应
//!
//! 与函数托管环境的代理事件格式保持一致：查询参数位于
//! `queryStringParameters`，计算用的 `weight`/`height` 位于事件顶层。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 调用事件
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvocationEvent {
    /// 查询字符串参数
    #[serde(
        rename = "queryStringParameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// 顶层体重字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,

    /// 顶层身高字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,

    /// 其余字段原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationEvent {
    /// 读取查询参数
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// 读取顶层字段
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "weight" => self.weight.as_ref(),
            "height" => self.height.as_ref(),
            other => self.extra.get(other),
        }
    }
}

/// 调用响应
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    /// 以 JSON 编码的值作为响应体
    pub fn ok_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(value)?,
        })
    }
}
