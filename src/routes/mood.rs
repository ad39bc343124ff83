//! # 무드 이미지 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/upload-mood` → multipart `images[]` 필드의 파일들을 저장
//!   응답: `{ "ok": true, "files": [{ "filename": ..., "url": ... }] }`
//! - `POST /api/delete-mood` → `{ "filename": ... }` 파일 삭제 + 문서 참조 제거
//!   응답: `{ "ok": true }` (이미 없어도 성공)
//!
//! 업로드는 보드 문서를 수정하지 않습니다.
//! 클라이언트가 받은 파일 이름을 `POST /api/board`의 `moodImages`에 넣어 다시 저장합니다.

use super::AppState; // 저장소, 업로드 디렉토리, 업로드 제한값
use crate::{
    error::AppError,
    models::UploadedImage,                // 응답의 files 항목
    services::uploads::is_plain_filename, // 삭제 대상 이름 검증
};
use axum::{
    // Multipart: multipart/form-data 본문을 필드 단위로 읽는 추출기
    // *Rejection: 추출 실패를 직접 받아 AppError::BadRequest로 바꾸기 위해 사용
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};

/// 업로드 파일을 담는 multipart 필드 이름
pub const UPLOAD_FIELD: &str = "images[]";

/// `POST /upload-mood` — 이미지 파일들을 업로드 디렉토리에 저장합니다.
///
/// 파일이 하나도 없어도 빈 목록으로 성공합니다.
/// `images[]` 이름이라도 filename이 없는 텍스트 파트는 건너뜁니다.
/// 한 파일이라도 실패하면(개수/크기 초과, 전송 오류) 이 요청에서 저장한 파일을 모두 지우고
/// 에러를 반환합니다.
pub async fn upload_mood(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut saved = Vec::new();
    if let Err(e) = receive_images(&state, &mut multipart, &mut saved).await {
        state.uploads.discard(&saved).await;
        return Err(e);
    }

    Ok(Json(json!({ "ok": true, "files": saved })))
}

async fn receive_images(
    state: &AppState,
    multipart: &mut Multipart,
    saved: &mut Vec<UploadedImage>,
) -> Result<(), AppError> {
    let limits = state.limits;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // filename이 없는 파트는 파일이 아니라 일반 폼 필드입니다.
        if field.file_name().is_none() {
            continue;
        }
        if saved.len() >= limits.max_files {
            return Err(AppError::TooManyFiles(limits.max_files));
        }

        let image = state
            .uploads
            .save_field(&mut field, limits.max_file_size)
            .await?;
        saved.push(image);
    }

    Ok(())
}

/// `POST /delete-mood` — 업로드 파일을 지우고 보드 문서에서 참조를 제거합니다.
///
/// # 에러
/// - `filename`이 없거나 문자열이 아니면 `400 Bad Request`
/// - 디렉토리 구분자가 들어간 이름도 `400 Bad Request`
pub async fn delete_mood(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let filename = match body.get("filename") {
        Some(Value::String(name)) => name.as_str(),
        _ => {
            return Err(AppError::BadRequest(
                "filename must be a string".to_string(),
            ))
        }
    };
    if !is_plain_filename(filename) {
        return Err(AppError::BadRequest(format!(
            "Invalid filename: {filename:?}"
        )));
    }

    state.uploads.remove(filename).await?;
    if state.store.forget_image(filename).await? {
        tracing::info!("Removed {} from the board", filename);
    }

    Ok(Json(json!({ "ok": true })))
}
