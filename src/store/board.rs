//! # 보드 문서 저장소
//!
//! 고정된 경로의 JSON 파일 하나에 보드 문서를 저장합니다.
//!
//! - `read()`: 파일이 없거나, 비어 있거나, JSON 객체로 파싱할 수 없으면 `None`
//!   (손상된 데이터 = 데이터 없음). 객체이기만 하면 필드 타입이 어긋나도 살려서 읽습니다.
//! - `write()`: 임시 파일에 쓴 뒤 rename으로 교체 (중간에 죽어도 기존 파일이 잘리지 않음)
//! - `replace()` / `forget_image()`: 읽기-수정-쓰기를 하나의 뮤텍스 아래에서 수행
//!
//! GET 요청의 읽기는 뮤텍스를 잡지 않습니다. rename은 원자적이므로
//! 읽는 쪽은 항상 이전 문서 또는 새 문서 중 하나를 온전히 봅니다.

use crate::{error::AppError, models::BoardDocument};
// Map: content 객체 타입, Value: 파싱 단계의 타입 없는 JSON
use serde_json::{Map, Value};
// Path : PathBuf = &str : String
use std::path::{Path, PathBuf};
// Arc: 여러 핸들(clone)이 같은 경로와 뮤텍스를 공유
use std::sync::Arc;
// tokio::fs: 비동기 파일 I/O, tokio::sync::Mutex: .await를 넘어 잡고 있을 수 있는 뮤텍스
use tokio::{fs, sync::Mutex};
// 임시 파일 이름의 고유 부분 (UUIDv7)
use uuid::Uuid;

/// 보드 문서 저장소
///
/// `Clone`은 같은 파일과 같은 뮤텍스를 공유하는 핸들을 복제합니다.
#[derive(Debug, Clone)]
pub struct BoardStore {
    path: Arc<PathBuf>,
    writer: Arc<Mutex<()>>,
}

impl BoardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// 문서 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 저장된 문서를 읽습니다.
    ///
    /// 읽기 실패는 어떤 종류든 호출자에게 전달하지 않고 `None`으로 바꿉니다.
    pub async fn read(&self) -> Option<BoardDocument> {
        let raw = match fs::read_to_string(self.path.as_path()).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Cannot read board file {}: {}", self.path.display(), e);
                }
                return None;
            }
        };
        parse_document(&raw, &self.path)
    }

    /// 저장된 문서, 없으면 기본 문서
    pub async fn load_or_default(&self) -> BoardDocument {
        self.read().await.unwrap_or_else(BoardDocument::starter)
    }

    /// 문서를 들여쓰기된 JSON으로 직렬화하여 파일 전체를 교체합니다.
    pub async fn write(&self, doc: &BoardDocument) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(doc)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // ── 임시 파일에 쓰고 rename으로 교체 ──
        // 쓰기나 rename이 실패하면 임시 파일을 지우고 에러를 전파합니다.
        let tmp_path = self.temp_path();
        let result = match fs::write(&tmp_path, json).await {
            Ok(()) => fs::rename(&tmp_path, self.path.as_path()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// 들어온 `content` / `moodImages`로 문서를 통째로 교체합니다.
    ///
    /// `None`인 필드는 현재 문서(없으면 기본 문서)의 값을 그대로 씁니다.
    /// 필드 단위 교체이며, `content` 안의 키를 병합하지 않습니다.
    pub async fn replace(
        &self,
        content: Option<Map<String, Value>>,
        mood_images: Option<Vec<String>>,
    ) -> Result<BoardDocument, AppError> {
        let _guard = self.writer.lock().await;

        let current = self.load_or_default().await;
        let next = BoardDocument::new(
            content.unwrap_or(current.content),
            mood_images.unwrap_or(current.mood_images),
        );

        self.write(&next).await?;
        Ok(next)
    }

    /// `moodImages`에서 `filename`과 같은 항목을 모두 제거합니다.
    ///
    /// 저장된 문서가 없거나 제거할 항목이 없으면 아무것도 쓰지 않고 `false`를 반환합니다.
    pub async fn forget_image(&self, filename: &str) -> Result<bool, AppError> {
        let _guard = self.writer.lock().await;

        let Some(mut doc) = self.read().await else {
            return Ok(false);
        };

        let before = doc.mood_images.len();
        doc.mood_images.retain(|name| name != filename);
        if doc.mood_images.len() == before {
            return Ok(false);
        }

        doc.touch();
        self.write(&doc).await?;
        Ok(true)
    }

    /// 같은 디렉토리의 임시 파일 경로: `<name>.<uuid>.tmp`
    /// (rename이 같은 파일시스템 안에서 일어나도록)
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("board.json");
        self.path
            .with_file_name(format!("{}.{}.tmp", name, Uuid::now_v7()))
    }
}

/// 파일 내용을 문서로 해석합니다.
///
/// 빈 내용, 잘못된 JSON, 객체가 아닌 JSON은 `None`입니다.
/// 객체라면 `BoardDocument::from_stored()`가 필드를 너그럽게 꺼냅니다.
fn parse_document(raw: &str, path: &Path) -> Option<BoardDocument> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(stored)) => Some(BoardDocument::from_stored(stored)),
        Ok(_) => {
            tracing::warn!("Discarding board file {}: not a JSON object", path.display());
            None
        }
        Err(e) => {
            tracing::warn!(
                "Discarding unreadable board file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}
