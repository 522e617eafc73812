use serde::{Deserialize, Serialize};

use crate::services::numeric::{compute_bmi, format_fixed};

/// 测量记录
///
/// 持久化到键值表中的三元组。`bmi` 只能由身高和体重推导得到，
/// 不提供单独设置的途径。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementRecord {
    /// 身高（厘米）
    #[serde(rename = "ht")]
    height: f64,

    /// 体重（千克）
    #[serde(rename = "wt")]
    weight: f64,

    /// 保留两位小数的 BMI 字符串
    bmi: String,
}

impl MeasurementRecord {
    /// 根据体重和身高创建记录，同时计算 BMI
    pub fn new(weight: f64, height: f64) -> Self {
        let bmi = format_fixed(compute_bmi(weight, height), 2);
        Self {
            height,
            weight,
            bmi,
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> &str {
        &self.bmi
    }
}
