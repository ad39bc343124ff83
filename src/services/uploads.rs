//! # 무드 이미지 파일 서비스
//!
//! 업로드 디렉토리에 이미지를 저장하고 삭제하는 함수들을 제공합니다.
//!
//! - `safe_extension()`: 원본 파일 이름에서 허용된 확장자만 골라냄 (그 외는 `jpg`)
//! - `generate_filename()`: `mood_<YYYYMMDDHHMMSS>_<1000~9999><.ext>` 형식의 이름 생성
//! - `UploadDir::save_field()`: multipart 필드를 조각(chunk) 단위로 디스크에 기록
//! - `UploadDir::remove()`: 파일 삭제 (이미 없으면 성공으로 취급)
//!
//! 이미지는 업로드된 바이트 그대로 저장합니다. 크기 조절이나 변환은 하지 않습니다.

use crate::{error::AppError, models::UploadedImage};
// Field: multipart 본문의 파트 하나. chunk() 단위로 스트리밍해서 읽습니다.
use axum::extract::multipart::Field;
// Local: 파일 이름의 시각 부분은 서버 로컬 시각
use chrono::Local;
// OsRng: 운영체제 난수원, RngCore: next_u32() 제공 트레이트
use rand_core::{OsRng, RngCore};
// ErrorKind: NotFound / AlreadyExists 구분
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
// AsyncWriteExt: tokio File의 write_all() / flush()
use tokio::{fs, io::AsyncWriteExt};

/// 그대로 유지되는 확장자 목록 (소문자)
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// 허용 목록에 없는 확장자는 이 값으로 바뀝니다.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// 업로드 파일 이름 접두사
pub const FILENAME_PREFIX: &str = "mood_";

/// 이름 충돌 시 새 이름으로 다시 시도하는 횟수
const CREATE_ATTEMPTS: usize = 5;

/// 원본 파일 이름의 확장자를 소문자로 바꿔 허용 목록과 비교합니다.
///
/// # 예시
/// - `Some("photo.PNG")` → `"png"`
/// - `Some("scan.bmp")` → `"jpg"`
/// - `None` → `"jpg"`
pub fn safe_extension(original: Option<&str>) -> &'static str {
    let ext = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    ext.and_then(|ext| ALLOWED_EXTENSIONS.iter().copied().find(|allowed| *allowed == ext))
        .unwrap_or(FALLBACK_EXTENSION)
}

/// 서버 로컬 시각(초 단위)과 4자리 난수로 업로드 파일 이름을 만듭니다.
///
/// 같은 초에 같은 난수가 나오면 이름이 겹칠 수 있습니다.
/// 저장 시 `create_new`로 열기 때문에 겹치면 덮어쓰지 않고 다시 시도합니다.
pub fn generate_filename(ext: &str) -> String {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let suffix = 1000 + OsRng.next_u32() % 9000;
    format!("{FILENAME_PREFIX}{stamp}_{suffix}.{ext}")
}

/// 디렉토리 구성 요소가 없는 순수 파일 이름인지 확인합니다.
///
/// 삭제 요청이 업로드 디렉토리 밖의 파일을 가리키지 못하게 합니다.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

/// 업로드 디렉토리와 그 공개 URL 경로
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
    public_prefix: String,
}

impl UploadDir {
    /// # 매개변수
    /// - `root`: 파일이 저장되는 디렉토리 (예: "data/uploads")
    /// - `public_prefix`: 정적 서버가 이 디렉토리를 노출하는 경로 (예: "/uploads")
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 공개 URL: 접두사 + "/" + 파일 이름
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename)
    }

    /// multipart 필드 하나를 새 파일로 저장합니다.
    ///
    /// 기록한 바이트가 `max_size`를 넘으면 쓰던 파일을 지우고 `FileTooLarge`를 반환합니다.
    /// 전송 도중 에러가 나도 쓰던 파일은 지워집니다.
    pub async fn save_field(
        &self,
        field: &mut Field<'_>,
        max_size: u64,
    ) -> Result<UploadedImage, AppError> {
        let original = field.file_name().map(str::to_owned);
        let ext = safe_extension(original.as_deref());

        // ── 1단계: 겹치지 않는 이름으로 새 파일 열기 ──
        fs::create_dir_all(&self.root).await?;
        let (filename, path, mut file) = self.create_unique(ext).await?;

        // ── 2단계: 조각 단위로 기록하며 크기 제한 확인 ──
        let written = async {
            let mut size: u64 = 0;
            while let Some(chunk) = field.chunk().await? {
                size += chunk.len() as u64;
                if size > max_size {
                    return Err(AppError::FileTooLarge(max_size));
                }
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<u64, AppError>(size)
        }
        .await;

        // ── 3단계: 성공이면 공개 URL 반환, 실패면 쓰던 파일 삭제 ──
        match written {
            Ok(size) => {
                tracing::info!(
                    "Saved mood image {} ({} bytes, original {:?})",
                    filename,
                    size,
                    original
                );
                let url = self.public_url(&filename);
                Ok(UploadedImage { filename, url })
            }
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&path).await;
                Err(e)
            }
        }
    }

    /// 이미 저장한 파일들을 지웁니다. 한 요청 안에서 뒤쪽 파일이 실패했을 때 사용합니다.
    pub async fn discard(&self, saved: &[UploadedImage]) {
        for image in saved {
            if let Err(e) = fs::remove_file(self.root.join(&image.filename)).await {
                tracing::warn!("Could not discard {}: {}", image.filename, e);
            }
        }
    }

    /// 파일을 삭제합니다.
    ///
    /// # 반환값
    /// - `Ok(true)`: 파일을 지움
    /// - `Ok(false)`: 파일이 원래 없었음
    pub async fn remove(&self, filename: &str) -> Result<bool, AppError> {
        match fs::remove_file(self.root.join(filename)).await {
            Ok(()) => {
                tracing::info!("Deleted mood image {}", filename);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Mood image {} already gone", filename);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_unique(&self, ext: &str) -> Result<(String, PathBuf, fs::File), AppError> {
        let mut last_err = None;
        for _ in 0..CREATE_ATTEMPTS {
            let filename = generate_filename(ext);
            let path = self.root.join(&filename);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((filename, path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => last_err = Some(e),
                Err(e) => return Err(e.into()),
            }
        }
        Err(last_err
            .unwrap_or_else(|| ErrorKind::AlreadyExists.into())
            .into())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// `mood_` + 14자리 숫자 + `_` + 4자리 숫자 + `.` + ext
    pub(crate) fn matches_mood_pattern(name: &str, ext: &str) -> bool {
        let Some(rest) = name.strip_prefix(FILENAME_PREFIX) else {
            return false;
        };
        let Some(rest) = rest.strip_suffix(&format!(".{ext}")) else {
            return false;
        };
        let Some((stamp, suffix)) = rest.split_once('_') else {
            return false;
        };
        stamp.len() == 14
            && stamp.bytes().all(|b| b.is_ascii_digit())
            && suffix.len() == 4
            && suffix.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn allowed_extensions_are_kept_lowercased() {
        assert_eq!(safe_extension(Some("photo.png")), "png");
        assert_eq!(safe_extension(Some("PHOTO.JPEG")), "jpeg");
        assert_eq!(safe_extension(Some("a.b.WebP")), "webp");
        assert_eq!(safe_extension(Some("loop.gif")), "gif");
        assert_eq!(safe_extension(Some("x.Jpg")), "jpg");
    }

    #[test]
    fn unknown_or_missing_extensions_become_jpg() {
        assert_eq!(safe_extension(Some("scan.bmp")), "jpg");
        assert_eq!(safe_extension(Some("noext")), "jpg");
        assert_eq!(safe_extension(Some(".png")), "jpg");
        assert_eq!(safe_extension(Some("")), "jpg");
        assert_eq!(safe_extension(None), "jpg");
    }

    #[test]
    fn generated_names_follow_the_mood_pattern() {
        for _ in 0..200 {
            let name = generate_filename("png");
            assert!(matches_mood_pattern(&name, "png"), "bad name: {name}");
            let suffix: u32 = name[20..24].parse().unwrap();
            assert!((1000..=9999).contains(&suffix));
        }
    }

    #[test]
    fn plain_filename_check_rejects_paths() {
        assert!(is_plain_filename("mood_20260101000000_1234.png"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename("../board.json"));
        assert!(!is_plain_filename("sub/dir.png"));
        assert!(!is_plain_filename("..\\board.json"));
    }

    #[test]
    fn public_url_joins_prefix_and_name() {
        let dir = UploadDir::new("data/uploads", "/uploads");
        assert_eq!(dir.public_url("a.png"), "/uploads/a.png");
        let dir = UploadDir::new("data/uploads", "/uploads/");
        assert_eq!(dir.public_url("a.png"), "/uploads/a.png");
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let root = crate::store::board::tests::scratch_dir();
        let dir = UploadDir::new(root.path(), "/uploads");
        std::fs::write(root.join("a.png"), b"img").unwrap();

        assert!(dir.remove("a.png").await.unwrap());
        assert!(!root.join("a.png").exists());
        assert!(!dir.remove("a.png").await.unwrap());
    }
}
