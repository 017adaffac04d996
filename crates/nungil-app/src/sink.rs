//! 콘솔 결과 싱크.
//!
//! 인식/번역 쌍을 터미널에 출력하고 마지막 결과를 보관한다.

use async_trait::async_trait;
use nungil_core::ports::sink::ResultSink;
use parking_lot::Mutex;

/// 콘솔 싱크
pub struct ConsoleSink {
    /// 마지막으로 게시된 (인식, 번역) 쌍
    last: Mutex<Option<(String, String)>>,
    /// 터미널 출력 여부 — 끄면 마지막 결과만 보관
    print: bool,
}

impl ConsoleSink {
    /// 새 콘솔 싱크 생성
    pub fn new(print: bool) -> Self {
        Self {
            last: Mutex::new(None),
            print,
        }
    }

    /// 마지막 게시 결과
    pub fn last_result(&self) -> Option<(String, String)> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl ResultSink for ConsoleSink {
    async fn publish(&self, recognized: &str, translated: &str) {
        {
            let mut last = self.last.lock();
            *last = Some((recognized.to_string(), translated.to_string()));
        }

        if self.print {
            println!("──────── 인식 ────────");
            println!("{recognized}");
            println!("──────── 번역 ────────");
            println!("{translated}");
        }
    }
}
