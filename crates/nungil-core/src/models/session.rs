//! 캡처 세션 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::frame::CaptureRegion;

/// 실행 중인 캡처 세션의 외부 공개 정보
///
/// 기준 프레임 등 가변 런타임 상태는 스케줄러가 단독 소유하며
/// 이 구조체에는 노출되지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// 세션 식별자 (UUID v4)
    pub session_id: String,
    /// 캡처 대상 영역
    pub region: CaptureRegion,
    /// 캡처 주기 (밀리초)
    pub interval_ms: u64,
    /// 세션 시작 시각
    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    /// 새 세션 정보 생성 (UUID 발급)
    pub fn new(region: CaptureRegion, interval_ms: u64) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            region,
            interval_ms,
            started_at: Utc::now(),
        }
    }
}
