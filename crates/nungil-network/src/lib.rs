//! # nungil-network
//!
//! 외부 서비스 클라이언트 크레이트.
//! `nungil-core`의 `OcrProvider` / `Translator` 포트를
//! Google Cloud Vision / Google Translate v2 API로 구현한다.
//!
//! API 키는 메모리에만 유지하며 로그에 남기지 않는다.

pub mod translate_client;
pub mod vision_ocr_client;

pub use translate_client::GoogleTranslateClient;
pub use vision_ocr_client::GoogleVisionOcr;
