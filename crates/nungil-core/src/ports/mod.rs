//! Hexagonal Architecture 포트 인터페이스.
//!
//! 스케줄러는 전역 상태가 아니라 생성 시점에 주입받은 포트 구현체만 사용한다.

pub mod ocr_provider;
pub mod sampler;
pub mod sink;
pub mod translator;
