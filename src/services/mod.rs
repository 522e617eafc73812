//! 服务模块

pub mod bmi;
pub mod numeric;
pub mod validation;

pub use bmi::{BmiService, BmiServiceImpl, create_bmi_service};
