//! 프레임(스크린샷) 및 파이프라인 결과 모델.
//!
//! 캡처 영역, 그레이스케일 프레임, OCR/번역 결과 구조체를 정의.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 캡처 대상 화면 영역 (논리 좌표)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    /// 좌상단 X 좌표
    pub x: i32,
    /// 좌상단 Y 좌표
    pub y: i32,
    /// 영역 너비 (픽셀)
    pub width: u32,
    /// 영역 높이 (픽셀)
    pub height: u32,
}

impl CaptureRegion {
    /// 새 캡처 영역 생성
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 영역 크기 검증 — 폭/높이 0은 캡처 불가능
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::Validation {
                field: "region".to_string(),
                message: format!("영역 크기가 0: {}x{}", self.width, self.height),
            });
        }
        Ok(())
    }
}

/// 그레이스케일 프레임 — 한 틱에 캡처된 단일 채널 래스터
///
/// `pixels`는 row-major 순서의 휘도값(`width * height` 바이트).
/// 변경 감지기가 한 번의 평가 동안 소유하며, 기준 프레임으로
/// 보관되거나 폐기된다.
#[derive(Debug, Clone)]
pub struct Frame {
    /// 프레임 너비 (픽셀)
    pub width: u32,
    /// 프레임 높이 (픽셀)
    pub height: u32,
    /// 휘도 버퍼 (row-major, width * height 바이트)
    pub pixels: Vec<u8>,
    /// 캡처 시각
    pub timestamp: DateTime<Utc>,
}

impl Frame {
    /// 버퍼에서 프레임 생성. 버퍼 길이가 `width * height`와 다르면 에러.
    pub fn from_luma(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(CoreError::Validation {
                field: "pixels".to_string(),
                message: format!(
                    "버퍼 길이 불일치: {}x{} 기대 {}바이트, 실제 {}바이트",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            timestamp,
        })
    }

    /// 프레임 픽셀 수
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

/// OCR 인식 결과 — 처리된 프레임마다 생성, 번역 단계가 즉시 소비
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// 인식된 텍스트 (없으면 빈 문자열)
    pub text: String,
    /// 텍스트 발견 여부
    pub found: bool,
}

impl RecognitionResult {
    /// 텍스트 없음 결과
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            found: false,
        }
    }
}

/// 번역 결과 — RecognitionResult와 1:1 대응, HTML 엔티티 언이스케이프 완료 상태
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    /// 번역된 텍스트
    pub text: String,
    /// 대상 로케일 (예: "zh-TW")
    pub target_locale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_buffer_length_checked() {
        let ts = Utc::now();
        assert!(Frame::from_luma(4, 4, vec![0u8; 16], ts).is_ok());
        assert!(Frame::from_luma(4, 4, vec![0u8; 15], ts).is_err());
    }

    #[test]
    fn region_zero_size_invalid() {
        assert!(CaptureRegion::new(0, 0, 100, 0).validate().is_err());
        assert!(CaptureRegion::new(0, 0, 0, 100).validate().is_err());
        assert!(CaptureRegion::new(-10, -10, 100, 100).validate().is_ok());
    }

    #[test]
    fn empty_recognition_result() {
        let r = RecognitionResult::empty();
        assert!(!r.found);
        assert!(r.text.is_empty());
    }
}
