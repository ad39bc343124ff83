//! # visionboard 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. 보드 파일/업로드 디렉토리 준비
//! 5. API 라우터 + 정적 파일 서빙 설정
//! 6. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod config;`는 같은 디렉토리의 `config.rs`(또는 `config/mod.rs`)를 모듈로 가져옵니다.
mod config;
mod error;
mod models;
mod routes;
mod services;
mod store;

use anyhow::Result; // 시작 단계의 어떤 에러든 담는 범용 Result
use config::Config; // 환경변수 기반 설정
use routes::{AppState, UPLOADS_ROUTE}; // 핸들러 공유 상태, 업로드 공개 경로
use services::uploads::UploadDir; // 무드 이미지 디렉토리 핸들
use store::BoardStore; // 보드 문서 저장소
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 visionboard, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visionboard=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting visionboard server on {}:{}", config.host, config.port);

    // ── 4단계: 디렉토리 준비 ──
    // 업로드 디렉토리와 보드 파일의 부모 디렉토리가 없으면 만듭니다.
    // 보드 파일 자체는 첫 POST 때 생성됩니다.
    if !config.uploads_path.exists() {
        tokio::fs::create_dir_all(&config.uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path.display());
    }
    if let Some(parent) = config.board_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created data directory: {}", parent.display());
        }
    }

    // ── 5단계: 저장소와 애플리케이션 상태(State) 생성 ──
    let store = BoardStore::new(&config.board_path);
    if store.read().await.is_some() {
        tracing::info!("Loaded board document from {}", store.path().display());
    } else {
        tracing::info!(
            "No readable board at {}, serving the default board",
            store.path().display()
        );
    }

    let state = AppState {
        store,
        uploads: UploadDir::new(&config.uploads_path, UPLOADS_ROUTE),
        limits: config.upload_limits,
    };

    // ── 6단계: 라우터 설정 ──
    // 프론트엔드 정적 파일이 있으면 같은 서버에서 서빙합니다.
    let static_dir = if config.static_path.exists() {
        tracing::info!("Serving static files from {}", config.static_path.display());
        Some(config.static_path.as_path())
    } else {
        tracing::warn!(
            "Static directory {} not found, serving API only",
            config.static_path.display()
        );
        None
    };

    let app = routes::router(state, static_dir);

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
