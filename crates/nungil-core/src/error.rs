//! NUNGIL 핵심 에러 타입.
//!
//! 틱 단위 에러(캡처/원격 호출)는 스케줄러가 해당 틱 안에서만 소비하고,
//! 상태 전이 에러(AlreadyRunning/NotRunning)만 호출자에게 동기적으로 전달된다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 캡처, 원격 서비스, 상태 전이, 설정 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 화면 캡처 불가 (영역이 화면 밖이거나 캡처 권한 거부)
    #[error("캡처 불가: {0}")]
    CaptureUnavailable(String),

    /// 원격 서비스 에러 (OCR/번역 전송 또는 할당량 실패)
    #[error("원격 서비스 에러 — {service}: {message}")]
    RemoteService {
        /// 서비스 이름 (예: "google-vision", "google-translate")
        service: String,
        /// 실패 사유
        message: String,
    },

    /// 이미 실행 중인 캡처 세션 존재
    #[error("캡처 세션이 이미 실행 중")]
    AlreadyRunning,

    /// 실행 중인 캡처 세션 없음
    #[error("실행 중인 캡처 세션 없음")]
    NotRunning,

    /// 이미지 인코딩 실패
    #[error("이미지 인코딩 에러: {0}")]
    ImageEncode(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 원격 서비스 에러 생성 헬퍼
    pub fn remote(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteService {
            service: service.into(),
            message: message.into(),
        }
    }
}
