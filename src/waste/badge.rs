//! 인증 배지 이미지 로딩. 배지가 없어도 분석과 보고서는 그대로 진행된다.

use std::fs;
use std::path::{Path, PathBuf};

use image::GenericImageView;

/// 디코딩된 RGBA 배지 이미지.
#[derive(Debug, Clone)]
pub struct BadgeImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// RGBA8, 행 우선
    pub rgba: Vec<u8>,
}

/// 배지 로딩 오류.
#[derive(Debug)]
pub enum BadgeError {
    /// 파일이 없거나 이미지로 읽을 수 없음
    MissingAsset { path: PathBuf, reason: String },
}

impl std::fmt::Display for BadgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeError::MissingAsset { path, reason } => {
                write!(f, "배지 이미지를 불러올 수 없습니다 ({}): {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for BadgeError {}

/// PNG 등 이미지 파일을 RGBA로 읽는다.
pub fn load_badge(path: &Path) -> Result<BadgeImage, BadgeError> {
    let missing = |reason: String| BadgeError::MissingAsset {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = fs::read(path).map_err(|e| missing(e.to_string()))?;
    let img = image::load_from_memory(&bytes).map_err(|e| missing(e.to_string()))?;
    let (width, height) = img.dimensions();
    Ok(BadgeImage {
        path: path.to_path_buf(),
        width,
        height,
        rgba: img.to_rgba8().into_raw(),
    })
}

/// 배지를 읽되 실패하면 경고만 남기고 `None`을 돌려준다.
pub fn load_badge_or_warn(path: &Path) -> Option<BadgeImage> {
    match load_badge(path) {
        Ok(badge) => Some(badge),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}
