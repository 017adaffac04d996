//! 화면 샘플러 포트.
//!
//! 지정 영역의 픽셀 단위 정확한 그랩을 그레이스케일 프레임으로 반환한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::{CaptureRegion, Frame};

/// 화면 샘플러 — 틱마다 한 프레임 생산
///
/// 구현체: `nungil-vision::RegionSampler` (xcap 기반)
#[async_trait]
pub trait ScreenSampler: Send + Sync {
    /// 호출 시점의 화면 영역을 캡처
    ///
    /// 영역이 화면 밖이거나 캡처 권한이 거부되면
    /// `CoreError::CaptureUnavailable`.
    async fn capture(&self, region: CaptureRegion) -> Result<Frame, CoreError>;
}
