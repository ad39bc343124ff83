//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok", "board": "stored" | "default" }`
//!
//! `board`는 디스크에 읽을 수 있는 보드 문서가 있으면 `stored`,
//! 없거나 손상되어 기본 문서가 나가는 상태면 `default`입니다.

use super::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 보드 파일 상태를 확인합니다. 실패하지 않습니다.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let board = if state.store.read().await.is_some() {
        "stored"
    } else {
        "default"
    };

    Json(json!({
        "status": "ok",
        "board": board
    }))
}
