//! 캡처 스케줄러.
//!
//! 고정 주기 틱마다 캡처 → 변경 감지 → OCR → 번역 → 게시 파이프라인을
//! 최대 한 번 실행한다. 틱 처리가 주기를 넘기면 밀린 틱은 건너뛰어
//! 파이프라인이 겹치지 않는다. 원격 호출 실패는 해당 틱만 버리고
//! 세션은 계속된다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nungil_core::config::AppConfig;
use nungil_core::error::CoreError;
use nungil_core::models::frame::CaptureRegion;
use nungil_core::models::session::SessionInfo;
use nungil_core::ports::ocr_provider::OcrProvider;
use nungil_core::ports::sampler::ScreenSampler;
use nungil_core::ports::sink::ResultSink;
use nungil_core::ports::translator::Translator;
use nungil_core::reflow::reflow;
use nungil_vision::detector::{ChangeDetector, ChangeVerdict};
use nungil_vision::encoder;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 세션 루프가 읽는 고정 컨텍스트
struct SessionContext {
    sampler: Arc<dyn ScreenSampler>,
    ocr: Arc<dyn OcrProvider>,
    translator: Arc<dyn Translator>,
    sink: Arc<dyn ResultSink>,
    region: CaptureRegion,
    target_locale: String,
    break_marks: Vec<char>,
    /// 스케줄러 전역 세대 카운터
    generation: Arc<AtomicU64>,
    /// 이 세션이 시작될 때의 세대 — 불일치하면 게시하지 않는다
    session_generation: u64,
}

/// 실행 중인 세션 핸들
struct RunningSession {
    info: SessionInfo,
    shutdown_tx: watch::Sender<bool>,
}

/// 캡처 스케줄러
///
/// `start`/`stop`으로 세션을 관리한다. 동시에 한 세션만 실행되며,
/// `stop`은 진행 중인 틱을 원격 호출 중이라도 즉시 취소한다.
pub struct CaptureScheduler {
    sampler: Arc<dyn ScreenSampler>,
    ocr: Arc<dyn OcrProvider>,
    translator: Arc<dyn Translator>,
    sink: Arc<dyn ResultSink>,
    state: Mutex<Option<RunningSession>>,
    generation: Arc<AtomicU64>,
}

impl CaptureScheduler {
    /// 새 스케줄러 생성
    pub fn new(
        sampler: Arc<dyn ScreenSampler>,
        ocr: Arc<dyn OcrProvider>,
        translator: Arc<dyn Translator>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            sampler,
            ocr,
            translator,
            sink,
            state: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 세션 시작
    ///
    /// 이미 실행 중이면 `CoreError::AlreadyRunning`. 기준 프레임 없이
    /// 시작하므로 첫 틱은 항상 파이프라인 후단까지 간다.
    pub fn start(&self, config: &AppConfig) -> Result<SessionInfo, CoreError> {
        config.validate()?;

        let mut state = self.state.lock();
        if state.is_some() {
            return Err(CoreError::AlreadyRunning);
        }

        let interval_ms = config.capture.frequency.interval_ms();
        let info = SessionInfo::new(config.capture.region, interval_ms);
        let session_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let ctx = SessionContext {
            sampler: self.sampler.clone(),
            ocr: self.ocr.clone(),
            translator: self.translator.clone(),
            sink: self.sink.clone(),
            region: config.capture.region,
            target_locale: config.translation.target_locale.clone(),
            break_marks: config.display.break_marks.clone(),
            generation: self.generation.clone(),
            session_generation,
        };
        let threshold = config.capture.similarity_threshold;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            session_id = %info.session_id,
            interval_ms,
            threshold,
            "캡처 세션 시작"
        );

        tokio::spawn(run_session(
            ctx,
            threshold,
            Duration::from_millis(interval_ms),
            shutdown_rx,
        ));

        *state = Some(RunningSession {
            info: info.clone(),
            shutdown_tx,
        });
        Ok(info)
    }

    /// 세션 정지
    ///
    /// 실행 중인 세션이 없으면 아무것도 하지 않는다(멱등).
    /// 세대 카운터를 먼저 올려 진행 중이던 틱의 게시를 무효화한 뒤
    /// 루프에 종료 신호를 보낸다.
    pub fn stop(&self) -> Result<(), CoreError> {
        let mut state = self.state.lock();
        let Some(session) = state.take() else {
            debug!("정지 요청: 실행 중인 세션 없음");
            return Ok(());
        };

        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = session.shutdown_tx.send(true);
        info!(session_id = %session.info.session_id, "캡처 세션 정지");
        Ok(())
    }

    /// 현재 세션 정보
    ///
    /// 실행 중이 아니면 `CoreError::NotRunning`.
    pub fn active_session(&self) -> Result<SessionInfo, CoreError> {
        self.state
            .lock()
            .as_ref()
            .map(|s| s.info.clone())
            .ok_or(CoreError::NotRunning)
    }

    /// 실행 여부
    pub fn is_running(&self) -> bool {
        self.state.lock().is_some()
    }
}

/// 세션 루프
///
/// 첫 틱은 시작 후 한 주기 뒤에 온다. 틱 처리 중에도 종료 신호에
/// 즉시 반응한다.
async fn run_session(
    ctx: SessionContext,
    threshold: f64,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut detector = ChangeDetector::new(threshold);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tokio::select! {
                    _ = process_tick(&ctx, &mut detector) => {}
                    _ = shutdown_rx.changed() => {
                        info!("세션 루프 종료 (틱 처리 중단)");
                        return;
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                info!("세션 루프 종료");
                return;
            }
        }
    }
}

/// 한 틱 처리
async fn process_tick(ctx: &SessionContext, detector: &mut ChangeDetector) {
    let frame = match ctx.sampler.capture(ctx.region).await {
        Ok(frame) => frame,
        Err(e) => {
            warn!("캡처 실패, 이번 틱 건너뜀: {e}");
            return;
        }
    };

    let frame = match detector.evaluate(frame) {
        ChangeVerdict::Unchanged => {
            debug!("화면 변경 없음");
            return;
        }
        ChangeVerdict::Changed(frame) => frame,
    };

    // OCR 시도를 결정한 시점에 기준 프레임을 기록한다.
    // 이후 OCR이 실패해도 같은 화면으로 재시도하지 않는다.
    detector.record_baseline(&frame);

    let png = match encoder::encode_png(&frame) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("PNG 인코딩 실패: {e}");
            return;
        }
    };

    let recognition = match ctx.ocr.recognize(&png).await {
        Ok(result) => result,
        Err(e) => {
            warn!("OCR 실패, 이번 틱 건너뜀: {e}");
            return;
        }
    };
    if !recognition.found {
        debug!("인식된 텍스트 없음");
        return;
    }

    // 인식 결과의 개행은 화면 레이아웃의 흔적 — 번역 전에 제거
    let flattened = recognition.text.replace('\n', "");
    let translation = match ctx.translator.translate(&flattened, &ctx.target_locale).await {
        Ok(result) => result,
        Err(e) => {
            // 마지막 게시 결과는 그대로 남는다
            warn!("번역 실패, 이번 틱 건너뜀: {e}");
            return;
        }
    };

    let display = reflow(&translation.text, &ctx.break_marks);

    // 정지 후 도착한 결과는 게시하지 않는다
    if ctx.generation.load(Ordering::SeqCst) != ctx.session_generation {
        debug!("세션 세대 불일치 — 게시 생략");
        return;
    }
    ctx.sink.publish(&recognition.text, &display).await;
}

// ============================================================
// 테스트
// ============================================================
