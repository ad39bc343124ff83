//! # 저장소 계층 (Storage Layer)
//!
//! 보드 문서 JSON 파일과 직접 상호작용하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 이 모듈의 `BoardStore`를 통해서만 문서를 읽고 씁니다.

pub mod board;

pub use board::*;
