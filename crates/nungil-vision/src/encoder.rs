//! OCR 전송용 PNG 인코딩.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder};
use nungil_core::error::CoreError;
use nungil_core::models::frame::Frame;

/// 그레이스케일 프레임을 PNG 바이트로 인코딩
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, CoreError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::ImageEncode("빈 프레임".to_string()));
    }

    let img = GrayImage::from_raw(frame.width, frame.height, frame.pixels.clone())
        .ok_or_else(|| CoreError::ImageEncode("휘도 버퍼 크기 불일치".to_string()))?;

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), frame.width, frame.height, ExtendedColorType::L8)
        .map_err(|e| CoreError::ImageEncode(format!("PNG 인코딩 실패: {e}")))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn encodes_valid_png() {
        let frame = Frame::from_luma(4, 4, (0u8..16).collect(), Utc::now()).unwrap();
        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn empty_frame_is_encode_error() {
        let frame = Frame::from_luma(0, 0, vec![], Utc::now()).unwrap();
        assert!(matches!(
            encode_png(&frame),
            Err(CoreError::ImageEncode(_))
        ));
    }
}
