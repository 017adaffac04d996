//! 애플리케이션 설정 구조체.
//!
//! 캡처 주기/영역/유사도 임계값, OCR/번역 엔드포인트,
//! 표시 설정 등 런타임 설정을 정의한다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::frame::CaptureRegion;
use crate::reflow::DEFAULT_BREAK_MARKS;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 캡처 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// OCR 서비스 설정
    #[serde(default)]
    pub ocr: OcrConfig,
    /// 번역 서비스 설정
    #[serde(default)]
    pub translation: TranslationConfig,
    /// 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처 주기 프리셋
///
/// 세션 중에는 읽기 전용. 허용값 외 주기는 존재하지 않는다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureFrequency {
    /// 높음 (1초)
    High,
    /// 표준 (2초)
    #[default]
    Normal,
    /// 느림 (3초)
    Slow,
    /// 매우 느림 (5초)
    VerySlow,
}

impl CaptureFrequency {
    /// 캡처 주기 (밀리초)
    pub fn interval_ms(&self) -> u64 {
        match self {
            Self::High => 1_000,
            Self::Normal => 2_000,
            Self::Slow => 3_000,
            Self::VerySlow => 5_000,
        }
    }
}

/// 캡처 설정 — 주기, 영역, 유사도 임계값
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 캡처 주기 프리셋
    #[serde(default)]
    pub frequency: CaptureFrequency,
    /// 캡처 대상 영역
    #[serde(default = "default_region")]
    pub region: CaptureRegion,
    /// 프레임 유사도 임계값 — 이 값 이상이면 동일 내용으로 판단
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frequency: CaptureFrequency::default(),
            region: default_region(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

fn default_region() -> CaptureRegion {
    CaptureRegion::new(0, 0, 640, 360)
}

fn default_similarity_threshold() -> f64 {
    0.95
}

// ============================================================
// OCR / 번역 서비스 설정
// ============================================================

/// OCR 서비스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Vision API 엔드포인트
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,
    /// API 키 (메모리에만 유지, 로그 금지)
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ocr_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_ocr_endpoint() -> String {
    "https://vision.googleapis.com/v1/images:annotate".to_string()
}

/// 번역 서비스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translate API 엔드포인트
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,
    /// API 키 (메모리에만 유지, 로그 금지)
    #[serde(default)]
    pub api_key: String,
    /// 번역 대상 로케일 (예: "zh-TW", "en")
    #[serde(default = "default_target_locale")]
    pub target_locale: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translate_endpoint(),
            api_key: String::new(),
            target_locale: default_target_locale(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_translate_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_target_locale() -> String {
    "zh-TW".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// ============================================================
// 표시 설정
// ============================================================

/// 표시 설정 — 줄바꿈 부호, 터미널 출력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 번역 텍스트 줄바꿈 기준 종결 부호
    #[serde(default = "default_break_marks")]
    pub break_marks: Vec<char>,
    /// 터미널 싱크 출력 여부 (끄면 마지막 결과만 보관)
    #[serde(default = "default_console_output")]
    pub console_output: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            break_marks: default_break_marks(),
            console_output: default_console_output(),
        }
    }
}

fn default_break_marks() -> Vec<char> {
    DEFAULT_BREAK_MARKS.to_vec()
}

fn default_console_output() -> bool {
    true
}

// ============================================================
// 최상위 구현
// ============================================================

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            capture: CaptureConfig::default(),
            ocr: OcrConfig::default(),
            translation: TranslationConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    /// 설정값 검증
    ///
    /// 세션 시작 전에 호출된다. 임계값 범위와 영역 크기를 확인한다.
    pub fn validate(&self) -> Result<(), CoreError> {
        let t = self.capture.similarity_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(CoreError::Validation {
                field: "capture.similarity_threshold".to_string(),
                message: format!("0과 1 사이여야 함 (현재 {t})"),
            });
        }

        self.capture.region.validate()?;

        if self.translation.target_locale.is_empty() {
            return Err(CoreError::Validation {
                field: "translation.target_locale".to_string(),
                message: "빈 로케일".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
