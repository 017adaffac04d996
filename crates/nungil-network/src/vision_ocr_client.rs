//! Google Cloud Vision OCR 클라이언트.
//!
//! `POST /v1/images:annotate` + TEXT_DETECTION으로 이미지에서
//! 텍스트를 추출한다. 텍스트 없음은 정상 결과이며 전송/인증 실패만
//! 에러로 구분한다.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use nungil_core::config::OcrConfig;
use nungil_core::error::CoreError;
use nungil_core::models::frame::RecognitionResult;
use nungil_core::ports::ocr_provider::OcrProvider;

/// Google Vision OCR 클라이언트
///
/// **보안**: API 키는 config.json에서 로드, 메모리에만 유지
#[derive(Debug)]
pub struct GoogleVisionOcr {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 엔드포인트 URL
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
}

/// `images:annotate` 응답 (필요한 필드만)
#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResult {
    #[serde(rename = "textAnnotations", default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<AnnotateError>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct AnnotateError {
    #[serde(default)]
    message: String,
}

impl GoogleVisionOcr {
    /// 새 OCR 클라이언트 생성
    pub fn new(config: &OcrConfig) -> Result<Self, CoreError> {
        if config.api_key.is_empty() {
            return Err(CoreError::Config("Vision API 키 미설정".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::remote("google-vision", format!("HTTP 클라이언트 생성 실패: {e}")))?;

        debug!(
            endpoint = %config.endpoint,
            timeout = config.timeout_secs,
            "GoogleVisionOcr 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// 응답 본문에서 인식 결과 추출
    ///
    /// 첫 번째 textAnnotation의 description이 전체 텍스트다.
    /// annotation이 비어 있으면 텍스트 없음.
    fn parse_response(body: &str) -> Result<RecognitionResult, CoreError> {
        let response: AnnotateResponse = serde_json::from_str(body)
            .map_err(|e| CoreError::remote("google-vision", format!("응답 JSON 파싱 실패: {e}")))?;

        let Some(result) = response.responses.into_iter().next() else {
            return Ok(RecognitionResult::empty());
        };

        if let Some(error) = result.error {
            return Err(CoreError::remote(
                "google-vision",
                format!("어노테이션 실패: {}", error.message),
            ));
        }

        match result.text_annotations.into_iter().next() {
            Some(annotation) if !annotation.description.is_empty() => Ok(RecognitionResult {
                text: annotation.description,
                found: true,
            }),
            _ => Ok(RecognitionResult::empty()),
        }
    }
}

#[async_trait]
impl OcrProvider for GoogleVisionOcr {
    async fn recognize(&self, image_png: &[u8]) -> Result<RecognitionResult, CoreError> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(image_png);
        let request_body = serde_json::json!({
            "requests": [{
                "image": { "content": encoded },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        });

        debug!(image_size = image_png.len(), "Vision OCR 호출");

        let response = self
            .http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CoreError::remote("google-vision", format!("API 호출 실패: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::remote("google-vision", format!("응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "Vision API 오류 응답");
            return Err(CoreError::remote(
                "google-vision",
                format!("오류 응답 ({}): {}", status, body.chars().take(200).collect::<String>()),
            ));
        }

        let result = Self::parse_response(&body)?;
        debug!(found = result.found, text_len = result.text.len(), "OCR 결과 수신");
        Ok(result)
    }

    fn provider_name(&self) -> &str {
        "google-vision"
    }
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(endpoint: String) -> OcrConfig {
        OcrConfig {
            endpoint,
            api_key: "test-api-key-placeholder".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn empty_key_is_config_error() {
        let mut config = test_config("https://vision.example.com".to_string());
        config.api_key = String::new();
        assert!(matches!(
            GoogleVisionOcr::new(&config),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn parse_response_with_text() {
        let body = r#"{
            "responses": [{
                "textAnnotations": [
                    {"description": "こんにちは\n世界"},
                    {"description": "こんにちは"},
                    {"description": "世界"}
                ]
            }]
        }"#;
        let result = GoogleVisionOcr::parse_response(body).unwrap();
        assert!(result.found);
        assert_eq!(result.text, "こんにちは\n世界");
    }

    #[test]
    fn parse_response_no_text() {
        let result = GoogleVisionOcr::parse_response(r#"{"responses": [{}]}"#).unwrap();
        assert!(!result.found);
        assert!(result.text.is_empty());
    }

    #[test]
    fn parse_response_annotation_error() {
        let body = r#"{"responses": [{"error": {"code": 7, "message": "권한 없음"}}]}"#;
        assert!(matches!(
            GoogleVisionOcr::parse_response(body),
            Err(CoreError::RemoteService { .. })
        ));
    }

    #[tokio::test]
    async fn recognize_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".into(),
                "test-api-key-placeholder".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"responses": [{"textAnnotations": [{"description": "画面の文字"}]}]}"#)
            .create_async()
            .await;

        let config = test_config(format!("{}/v1/images:annotate", server.url()));
        let client = GoogleVisionOcr::new(&config).unwrap();
        let result = client.recognize(b"fake-png-bytes").await.unwrap();

        assert!(result.found);
        assert_eq!(result.text, "画面の文字");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recognize_http_error_is_remote_service() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .create_async()
            .await;

        let config = test_config(format!("{}/v1/images:annotate", server.url()));
        let client = GoogleVisionOcr::new(&config).unwrap();
        let result = client.recognize(b"fake-png-bytes").await;

        assert!(matches!(result, Err(CoreError::RemoteService { .. })));
    }

    #[tokio::test]
    async fn recognize_empty_annotations_is_not_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"responses": [{}]}"#)
            .create_async()
            .await;

        let config = test_config(format!("{}/v1/images:annotate", server.url()));
        let client = GoogleVisionOcr::new(&config).unwrap();
        let result = client.recognize(b"fake-png-bytes").await.unwrap();

        assert!(!result.found);
    }
}
