//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "ok": false, "error": ..., "code": ... }` 응답으로 변환
//!
//! 보드 문서 읽기 실패는 여기까지 오지 않습니다.
//! 저장소(`store::board`)가 "없는 문서"로 취급해 기본 문서로 대체하기 때문입니다.

use axum::{
    extract::multipart::MultipartError, // multipart 파싱/본문 제한 에러 (자체 상태 코드 보유)
    http::StatusCode,                   // HTTP 상태 코드 (400, 413, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로
use thiserror::Error; // #[derive(Error)]로 Display, std::error::Error 구현

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 한 요청에 허용 개수보다 많은 파일 (HTTP 400)
    #[error("Too many files: at most {0} files per upload")]
    TooManyFiles(usize),

    /// 파일 하나가 허용 크기를 넘음 (HTTP 413)
    #[error("File too large: each file must be at most {0} bytes")]
    FileTooLarge(u64),

    /// multipart 본문 파싱 실패 (상태 코드는 multipart 계층이 결정)
    /// 본문 크기 제한 초과도 여기로 들어옵니다 (HTTP 413).
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 보드 문서 직렬화 오류 (HTTP 500)
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 응답 본문의 `code` 필드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::TooManyFiles(_) => "too_many_files",
            AppError::FileTooLarge(_) => "file_too_large",
            AppError::Multipart(_) => "multipart_error",
            AppError::Io(_) => "io_error",
            AppError::Json(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    /// 내부 에러(Io, Json)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match self {
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TooManyFiles(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::FileTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            AppError::Multipart(ref e) => {
                tracing::warn!("Multipart error: {}", e);
                (e.status(), e.body_text())
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Json(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
