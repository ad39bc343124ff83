//! # 서비스 모듈
//!
//! 라우트 핸들러가 사용하는 파일 시스템 작업을 모아둔 모듈입니다.
//! - `uploads`: 무드 이미지 파일 이름 생성, 저장, 삭제

pub mod uploads;
