//! BMI Routes

use crate::api::handlers::bmi_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建 BMI 路由器
pub fn create_bmi_router() -> Router<AppState> {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/bmi", get(proxy).post(proxy))
}
