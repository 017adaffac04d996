//! # nungil-core
//!
//! NUNGIL 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 캡처 → 변경 감지 → OCR → 번역 파이프라인의 모든 크레이트가
//! 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)
//! - [`reflow`] — 번역 결과 줄바꿈 포매터

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod reflow;

#[cfg(test)]
mod tests {
    use crate::models::frame::{CaptureRegion, RecognitionResult};

    #[test]
    fn recognition_result_serde_roundtrip() {
        let result = RecognitionResult {
            text: "HELLO WORLD".to_string(),
            found: true,
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: RecognitionResult = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.text, "HELLO WORLD");
        assert!(deserialized.found);
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.capture.frequency.interval_ms(), 2_000);
        assert!((config.capture.similarity_threshold - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.translation.target_locale, "zh-TW");
        assert_eq!(config.display.break_marks, vec!['。', '？', '！']);
    }

    #[test]
    fn region_validation() {
        let region = CaptureRegion {
            x: 10,
            y: 20,
            width: 0,
            height: 100,
        };
        assert!(region.validate().is_err());
    }
}
