//! OCR 제공자 포트.
//!
//! 외부 텍스트 인식 서비스를 추상화하는 인터페이스를 정의한다.
//! 이미지 바이트 입력, 인식 텍스트 출력.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::RecognitionResult;

/// OCR 제공자 — 외부 텍스트 인식 서비스
///
/// 구현체: `nungil-network::GoogleVisionOcr`
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// PNG 이미지에서 텍스트 추출
    ///
    /// 전송/인증 실패는 `CoreError::RemoteService`.
    /// 서비스가 정상 수행했으나 텍스트가 없으면 에러가 아니라
    /// `RecognitionResult { found: false, .. }`를 반환한다.
    async fn recognize(&self, image_png: &[u8]) -> Result<RecognitionResult, CoreError>;

    /// 제공자 이름 (예: "google-vision")
    fn provider_name(&self) -> &str;
}
