//! 번역 제공자 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::frame::TranslationResult;

/// 번역 제공자 — 외부 번역 서비스
///
/// 반환 텍스트는 어댑터 경계를 나가기 전에 HTML 엔티티가
/// 언이스케이프되어 있어야 한다 (서비스는 이스케이프된 텍스트를 반환).
///
/// 구현체: `nungil-network::GoogleTranslateClient`
#[async_trait]
pub trait Translator: Send + Sync {
    /// 텍스트를 대상 로케일로 번역
    ///
    /// 전송/인증/할당량 실패는 `CoreError::RemoteService`.
    async fn translate(
        &self,
        text: &str,
        target_locale: &str,
    ) -> Result<TranslationResult, CoreError>;

    /// 제공자 이름 (예: "google-translate")
    fn provider_name(&self) -> &str;
}
