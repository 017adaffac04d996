//! 결과 표시 싱크 포트.

use async_trait::async_trait;

/// 결과 싱크 — 처리된 틱마다 최대 1회, 항상 완전한 쌍으로 호출
///
/// 구현체: `nungil-app::ConsoleSink`, 테스트용 메모리 싱크 등
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// 인식 텍스트와 줄바꿈 처리된 번역 텍스트 게시
    ///
    /// 부분 데이터로는 절대 호출되지 않는다. 틱 간 쓰기는
    /// 프로그램 순서를 따른다.
    async fn publish(&self, recognized: &str, translated: &str);
}
