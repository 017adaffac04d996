//! 화면 영역 캡처.
//!
//! xcap 기반 멀티모니터 캡처. 영역 원점을 포함하는 모니터에서
//! 전체 프레임을 그랩한 뒤 영역을 잘라내고 그레이스케일로 변환한다.
//! 블로킹 캡처 호출은 `spawn_blocking`으로 격리한다.

use async_trait::async_trait;
use chrono::Utc;
use image::{imageops, DynamicImage};
use nungil_core::error::CoreError;
use nungil_core::models::frame::{CaptureRegion, Frame};
use nungil_core::ports::sampler::ScreenSampler;
use tracing::debug;
use xcap::Monitor;

/// 영역 샘플러 — xcap 기반
pub struct RegionSampler;

impl RegionSampler {
    /// 새 샘플러 생성
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenSampler for RegionSampler {
    async fn capture(&self, region: CaptureRegion) -> Result<Frame, CoreError> {
        region.validate()?;

        tokio::task::spawn_blocking(move || capture_region(region))
            .await
            .map_err(|e| CoreError::Internal(format!("캡처 작업 조인 실패: {e}")))?
    }
}

/// 영역을 포함하는 모니터에서 그레이스케일 프레임 캡처 (블로킹)
fn capture_region(region: CaptureRegion) -> Result<Frame, CoreError> {
    let monitors = Monitor::all()
        .map_err(|e| CoreError::CaptureUnavailable(format!("모니터 목록 조회 실패: {e}")))?;

    let monitor = monitors
        .into_iter()
        .find(|m| contains_origin(m, region))
        .or_else(|| {
            Monitor::all()
                .ok()?
                .into_iter()
                .find(|m| m.is_primary().unwrap_or(false))
        })
        .ok_or_else(|| CoreError::CaptureUnavailable("모니터를 찾을 수 없음".to_string()))?;

    let mx = monitor
        .x()
        .map_err(|e| CoreError::CaptureUnavailable(format!("모니터 정보 조회 실패: {e}")))?;
    let my = monitor
        .y()
        .map_err(|e| CoreError::CaptureUnavailable(format!("모니터 정보 조회 실패: {e}")))?;

    let image = monitor
        .capture_image()
        .map_err(|e| CoreError::CaptureUnavailable(format!("스크린 캡처 실패: {e}")))?;

    // 모니터 기준 상대 좌표로 변환 후 경계 확인
    let rel_x = region.x - mx;
    let rel_y = region.y - my;
    if rel_x < 0
        || rel_y < 0
        || rel_x as u32 + region.width > image.width()
        || rel_y as u32 + region.height > image.height()
    {
        return Err(CoreError::CaptureUnavailable(format!(
            "영역이 모니터 경계를 벗어남: 영역 ({}, {}) {}x{}, 모니터 {}x{}",
            region.x,
            region.y,
            region.width,
            region.height,
            image.width(),
            image.height()
        )));
    }

    let cropped = imageops::crop_imm(&image, rel_x as u32, rel_y as u32, region.width, region.height)
        .to_image();
    let gray = DynamicImage::ImageRgba8(cropped).into_luma8();

    debug!(
        "영역 캡처 완료: ({}, {}) {}x{}",
        region.x, region.y, region.width, region.height
    );

    Frame::from_luma(region.width, region.height, gray.into_raw(), Utc::now())
}

/// 영역 좌상단이 모니터 논리 영역 안에 있는지 확인
fn contains_origin(monitor: &Monitor, region: CaptureRegion) -> bool {
    let (Ok(x), Ok(y), Ok(w), Ok(h)) = (monitor.x(), monitor.y(), monitor.width(), monitor.height())
    else {
        return false;
    };
    region.x >= x && region.y >= y && region.x < x + w as i32 && region.y < y + h as i32
}
