//! # 보드 문서(Board Document) 모델
//!
//! 디스크에 JSON으로 저장되는 단 하나의 보드 문서와,
//! 업로드 응답에 쓰이는 구조체를 정의합니다.
//!
//! 저장 형식 예:
//! ```json
//! {
//!   "version": 1,
//!   "updatedAt": "2026-01-01T09:30:00.000Z",
//!   "content": { "title": "...", "goals": ["...", "..."] },
//!   "moodImages": ["mood_20260101093000_4821.png"]
//! }
//! ```

use chrono::{SecondsFormat, Utc}; // updatedAt 타임스탬프 (UTC, 밀리초)
use serde::{Deserialize, Serialize}; // JSON 직렬화/역직렬화 derive 매크로
use serde_json::{json, Map, Value}; // content는 타입이 정해지지 않은 JSON 객체

/// 현재 스키마 버전. 마이그레이션 로직은 없고, 쓰기 때마다 이 값으로 기록됩니다.
pub const BOARD_SCHEMA_VERSION: u32 = 1;

/// 보드 문서
///
/// `content`는 서버가 해석하지 않는 열린 매핑입니다 (제목, 목록 항목, 힌트 문구 등).
/// 키 순서는 클라이언트가 보낸 순서를 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    #[serde(default = "schema_version")]
    pub version: u32,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    /// 업로드 디렉토리 안의 파일 이름 목록 (소유권 없는 약한 참조)
    #[serde(default)]
    pub mood_images: Vec<String>,
}

fn schema_version() -> u32 {
    BOARD_SCHEMA_VERSION
}

impl BoardDocument {
    /// 현재 시각으로 새 문서를 만듭니다.
    pub fn new(content: Map<String, Value>, mood_images: Vec<String>) -> Self {
        Self {
            version: BOARD_SCHEMA_VERSION,
            updated_at: now_timestamp(),
            content,
            mood_images,
        }
    }

    /// 기본 문서: 저장된 문서가 없거나 읽을 수 없을 때 대신 반환됩니다.
    pub fn starter() -> Self {
        Self::new(starter_content(), Vec::new())
    }

    /// 디스크에서 읽은 JSON 객체를 문서로 바꿉니다.
    ///
    /// 객체이기만 하면 실패하지 않습니다. 필드 타입이 어긋나면 고치거나 버립니다.
    /// - `version`: 항상 현재 스키마 버전
    /// - `updatedAt`: 문자열이 아니면 빈 문자열
    /// - `content`: 객체가 아니면 빈 객체
    /// - `moodImages`: 배열이 아니면 빈 목록, 문자열이 아닌 항목은 제거
    pub fn from_stored(mut stored: Map<String, Value>) -> Self {
        let updated_at = match stored.remove("updatedAt") {
            Some(Value::String(ts)) => ts,
            _ => String::new(),
        };
        let content = match stored.remove("content") {
            Some(Value::Object(content)) => content,
            _ => Map::new(),
        };
        let mood_images = stored
            .remove("moodImages")
            .and_then(string_list)
            .unwrap_or_default();

        Self {
            version: BOARD_SCHEMA_VERSION,
            updated_at,
            content,
            mood_images,
        }
    }

    /// `updatedAt`을 현재 시각으로 갱신합니다.
    pub fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }
}

/// 기본 문서의 고정 문구
pub fn starter_content() -> Map<String, Value> {
    let content = json!({
        "title": "My Vision Board",
        "subtitle": "A place for the life I am building, one picture at a time.",
        "visionTitle": "This year I want to...",
        "visionItems": [
            "Feel strong and rested",
            "Make things I am proud of",
            "Spend more time with the people I love"
        ],
        "valuesTitle": "What matters",
        "valuesItems": ["Curiosity", "Kindness", "Courage"],
        "moodTitle": "Mood board",
        "moodHint": "Drop images here or click to upload. They are saved with the board.",
        "affirmation": "Small steps, every day."
    });

    match content {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// 배열이면 문자열 항목만 순서대로 남깁니다. 배열이 아니면 `None`입니다.
pub fn string_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// `updatedAt` 형식: RFC 3339 UTC, 밀리초, `Z` 접미사
/// 예: "2026-01-01T09:30:00.000Z"
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 업로드 응답의 파일 항목: `{ "filename": ..., "url": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
    pub url: String,
}
