//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(또는 `.env` 파일)에서 서버 설정값을 읽어옵니다.
//! 모든 항목에 기본값이 있으므로 환경변수가 하나도 없어도 서버가 동작합니다.
//!
//! 설정 항목:
//! - `HOST`: 서버 바인딩 주소 (기본값: "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값: 3000)
//! - `BOARD_PATH`: 보드 문서 JSON 파일 경로 (기본값: "data/board.json")
//! - `UPLOADS_PATH`: 무드 이미지 저장 디렉토리 (기본값: "data/uploads")
//! - `STATIC_PATH`: 프론트엔드 정적 파일 디렉토리 (기본값: "public")

use std::env;
use std::path::PathBuf;

/// 기본 포트 번호
pub const DEFAULT_PORT: u16 = 3000;

/// 한 번의 업로드 요청에 허용되는 최대 파일 수
pub const MAX_UPLOAD_FILES: usize = 30;

/// 업로드 파일 하나의 최대 크기 (12 MiB)
pub const MAX_UPLOAD_FILE_SIZE: u64 = 12 * 1024 * 1024;

/// 업로드 제한값
///
/// 라우터 상태(`AppState`)에 실려 핸들러까지 전달됩니다.
/// 테스트에서는 작은 값으로 바꿔 제한 동작을 확인합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_files: usize,
    pub max_file_size: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_files: MAX_UPLOAD_FILES,
            max_file_size: MAX_UPLOAD_FILE_SIZE,
        }
    }
}

impl UploadLimits {
    /// 업로드 라우트의 요청 본문 제한
    ///
    /// 파일 최대 개수 × 파일 최대 크기에 multipart 경계/헤더 여유분 1 MiB를 더합니다.
    pub fn body_limit(&self) -> usize {
        let files = (self.max_files as u64).saturating_mul(self.max_file_size);
        usize::try_from(files.saturating_add(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    pub port: u16,
    /// 보드 문서가 저장되는 JSON 파일 경로
    pub board_path: PathBuf,
    /// 업로드된 무드 이미지가 저장되는 디렉토리
    pub uploads_path: PathBuf,
    /// index.html, CSS, 클라이언트 스크립트가 있는 디렉토리
    pub static_path: PathBuf,
    pub upload_limits: UploadLimits,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 필수 항목이 없으므로 실패하지 않습니다.
    /// `PORT`가 숫자로 파싱되지 않으면 기본 포트를 사용합니다.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            board_path: env::var("BOARD_PATH")
                .unwrap_or_else(|_| "data/board.json".to_string())
                .into(),
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "data/uploads".to_string())
                .into(),
            static_path: env::var("STATIC_PATH")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            upload_limits: UploadLimits::default(),
        }
    }
}
