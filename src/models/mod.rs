//! # 데이터 모델 모듈
//!
//! - `board`: 보드 문서(BoardDocument)와 업로드 응답 항목(UploadedImage)
//!
//! `pub use board::*;`로 재공개하여 `crate::models::BoardDocument`처럼 짧게 접근합니다.

pub mod board;

pub use board::*;
