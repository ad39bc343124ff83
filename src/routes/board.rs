//! # 보드(Board) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET  /api/board` → 저장된 문서, 없으면 기본 문서
//! - `POST /api/board` → `{ content?, moodImages? }`로 문서를 교체하고 `{ "ok": true }`
//!
//! POST는 필드 단위 교체입니다. `content`에 일부 키만 보내면 나머지 키는 사라집니다.
//! 본문에 없거나 타입이 맞지 않는 필드는 현재 문서의 값을 유지합니다.

use super::AppState;
use crate::{
    error::AppError,                       // 400 응답으로 변환되는 에러 타입
    models::{string_list, BoardDocument}, // 보드 문서 모델, moodImages 정리 함수
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Map, Value};

/// `GET /board` — 현재 보드 문서를 반환합니다. 실패하지 않습니다.
pub async fn get_board(State(state): State<AppState>) -> Json<BoardDocument> {
    Json(state.store.load_or_default().await)
}

/// `POST /board` — 들어온 필드로 문서를 교체하여 저장합니다.
///
/// # 에러
/// - 본문이 JSON이 아니거나 JSON 객체가 아니면 `400 Bad Request` (저장된 문서는 그대로)
pub async fn save_board(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Value::Object(mut body) = body else {
        return Err(AppError::BadRequest(
            "Board body must be a JSON object".to_string(),
        ));
    };

    let content = take_content(&mut body);
    let mood_images = take_mood_images(&mut body);

    let saved = state.store.replace(content, mood_images).await?;
    tracing::debug!(
        "Board saved: {} content keys, {} mood images",
        saved.content.len(),
        saved.mood_images.len()
    );

    Ok(Json(json!({ "ok": true })))
}

/// 객체일 때만 `content`를 꺼냅니다.
fn take_content(body: &mut Map<String, Value>) -> Option<Map<String, Value>> {
    match body.remove("content") {
        Some(Value::Object(content)) => Some(content),
        _ => None,
    }
}

/// 배열일 때만 `moodImages`를 꺼냅니다. 문자열이 아닌 항목은 버립니다.
fn take_mood_images(body: &mut Map<String, Value>) -> Option<Vec<String>> {
    body.remove("moodImages").and_then(string_list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn content_must_be_an_object() {
        assert!(take_content(&mut body(json!({"content": "text"}))).is_none());
        assert!(take_content(&mut body(json!({"content": [1]}))).is_none());
        assert!(take_content(&mut body(json!({}))).is_none());
        assert_eq!(
            take_content(&mut body(json!({"content": {"a": 1}}))),
            Some(body(json!({"a": 1})))
        );
    }

    #[test]
    fn mood_images_keep_only_strings_in_order() {
        let images = take_mood_images(&mut body(json!({
            "moodImages": ["b.png", 3, null, "a.png", {"x": 1}]
        })));
        assert_eq!(images, Some(vec!["b.png".to_string(), "a.png".to_string()]));

        assert!(take_mood_images(&mut body(json!({"moodImages": "a.png"}))).is_none());
        assert_eq!(
            take_mood_images(&mut body(json!({"moodImages": []}))),
            Some(vec![])
        );
    }
}
