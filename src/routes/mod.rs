//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `board`: 보드 문서 조회/저장
//! - `mood`: 무드 이미지 업로드/삭제
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod board;
pub mod health;
pub mod mood;

pub use board::*;
pub use health::*;
pub use mood::*;

use crate::{config::UploadLimits, services::uploads::UploadDir, store::BoardStore};
use axum::{
    extract::DefaultBodyLimit, // 라우트별 요청 본문 크기 제한 (기본값 2 MB)
    routing::{get, post},      // HTTP 메서드별 라우팅 함수
    Router,
};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},           // CORS 설정
    services::{ServeDir, ServeFile},  // 정적 파일 서빙 서비스
    trace::TraceLayer,                // HTTP 요청/응답 로깅 미들웨어
};

/// 업로드 디렉토리가 노출되는 공개 경로
pub const UPLOADS_ROUTE: &str = "/uploads";

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 저장소와 업로드 디렉토리 핸들은 내부적으로 Arc/PathBuf라 clone 비용이 작습니다.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 보드 문서 저장소
    pub store: BoardStore,
    /// 무드 이미지 디렉토리
    pub uploads: UploadDir,
    pub limits: UploadLimits,
}

/// 전체 라우터를 구성합니다.
///
/// - `/api/*`: JSON / multipart API
/// - `/uploads/*`: 업로드 디렉토리 정적 서빙
/// - 그 외: `static_dir`이 있으면 프론트엔드 정적 파일 (없는 경로는 index.html)
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    // ── 1단계: 업로드 라우트 본문 제한, 업로드 디렉토리 서빙 ──
    // state가 with_state()로 이동하기 전에 필요한 값을 꺼내 둡니다.
    let upload_body_limit = DefaultBodyLimit::max(state.limits.body_limit());
    let uploads_dir = ServeDir::new(state.uploads.root());

    // ── 2단계: API 라우트 ──
    let api_routes = Router::new()
        .route("/board", get(get_board).post(save_board))
        .route("/upload-mood", post(upload_mood).layer(upload_body_limit))
        .route("/delete-mood", post(delete_mood))
        .route("/health", get(health_check))
        .with_state(state);

    // ── 3단계: /api, /uploads, 프론트엔드 정적 파일 합치기 ──
    let app = Router::new()
        .nest("/api", api_routes)
        .nest_service(UPLOADS_ROUTE, uploads_dir);

    let app = match static_dir {
        Some(dir) => {
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            app.fallback_service(serve_dir)
        }
        None => app,
    };

    // ── 4단계: 미들웨어 ──
    // 단일 사용자용 로컬 도구이므로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors).layer(TraceLayer::new_for_http())
}
