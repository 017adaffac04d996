//! # nungil-vision
//!
//! 캡처 파이프라인의 이미지 처리 크레이트.
//! 화면 영역 캡처, 정규화 상호상관 기반 프레임 유사도 비교,
//! 변경 감지, OCR 전송용 PNG 인코딩을 담당한다.

pub mod capture;
pub mod detector;
pub mod encoder;
pub mod similarity;

pub use capture::RegionSampler;
pub use detector::{ChangeDetector, ChangeVerdict};
