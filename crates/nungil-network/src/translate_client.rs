//! Google Translate v2 클라이언트.
//!
//! `POST /language/translate/v2`로 텍스트를 대상 로케일로 번역한다.
//! 서비스는 HTML 엔티티가 이스케이프된 텍스트를 반환하므로
//! 어댑터 경계를 나가기 전에 언이스케이프한다.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use nungil_core::config::TranslationConfig;
use nungil_core::error::CoreError;
use nungil_core::models::frame::TranslationResult;
use nungil_core::ports::translator::Translator;

/// 자격 증명 확인용 프로브 문장
const PROBE_TEXT: &str = "Hello";
const PROBE_LOCALE: &str = "es";

/// Google Translate 클라이언트
///
/// **보안**: API 키는 config.json에서 로드, 메모리에만 유지
#[derive(Debug)]
pub struct GoogleTranslateClient {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 엔드포인트 URL
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
}

/// Translate v2 응답 (필요한 필드만)
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

impl GoogleTranslateClient {
    /// 새 번역 클라이언트 생성
    pub fn new(config: &TranslationConfig) -> Result<Self, CoreError> {
        if config.api_key.is_empty() {
            return Err(CoreError::Config("Translate API 키 미설정".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CoreError::remote("google-translate", format!("HTTP 클라이언트 생성 실패: {e}"))
            })?;

        debug!(
            endpoint = %config.endpoint,
            timeout = config.timeout_secs,
            "GoogleTranslateClient 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// 자격 증명 확인
    ///
    /// 세션 시작 전에 고정 문장을 한 번 번역해 본다. 키가 틀리거나
    /// 할당량이 막혀 있으면 여기서 실패한다.
    pub async fn verify_credentials(&self) -> Result<(), CoreError> {
        self.request(PROBE_TEXT, PROBE_LOCALE).await?;
        info!("번역 자격 증명 확인 완료");
        Ok(())
    }

    async fn request(&self, text: &str, target_locale: &str) -> Result<String, CoreError> {
        let request_body = serde_json::json!({
            "q": text,
            "target": target_locale
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CoreError::remote("google-translate", format!("API 호출 실패: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::remote("google-translate", format!("응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "Translate API 오류 응답");
            return Err(CoreError::remote(
                "google-translate",
                format!("오류 응답 ({}): {}", status, body.chars().take(200).collect::<String>()),
            ));
        }

        let response: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| CoreError::remote("google-translate", format!("응답 JSON 파싱 실패: {e}")))?;

        let translation = response.data.translations.into_iter().next().ok_or_else(|| {
            CoreError::remote("google-translate", "응답에 번역 결과 없음".to_string())
        })?;

        Ok(unescape_html(&translation.translated_text))
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_locale: &str,
    ) -> Result<TranslationResult, CoreError> {
        debug!(text_len = text.len(), target = target_locale, "번역 호출");
        let translated = self.request(text, target_locale).await?;
        Ok(TranslationResult {
            text: translated,
            target_locale: target_locale.to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "google-translate"
    }
}

// ============================================================
// HTML 엔티티 언이스케이프
// ============================================================

/// 번역 응답의 HTML 엔티티를 원래 문자로 복원
///
/// 서비스가 내는 명명 엔티티(amp/lt/gt/quot/apos)와
/// 숫자 참조(`&#NN;`, `&#xHH;`)를 처리한다. 해석 불가능한
/// 엔티티는 원문 그대로 둔다.
pub fn unescape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(end) = rest.find(';') {
            if let Some(ch) = decode_entity(&rest[1..end]) {
                out.push(ch);
                rest = &rest[end + 1..];
                continue;
            }
        }

        out.push('&');
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                num.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

// ============================================================
// 테스트
// ============================================================
