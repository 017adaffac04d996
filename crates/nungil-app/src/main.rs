//! # nungil-app
//!
//! NUNGIL 바이너리 진입점.
//! DI 컨테이너 역할, 자격 증명 확인, 캡처 세션 라이프사이클 관리.

mod lifecycle;
mod scheduler;
mod sink;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use nungil_core::config::{AppConfig, CaptureFrequency};
use nungil_core::config_manager::ConfigManager;
use nungil_core::models::frame::CaptureRegion;
use nungil_network::{GoogleTranslateClient, GoogleVisionOcr};
use nungil_vision::RegionSampler;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scheduler::CaptureScheduler;
use crate::sink::ConsoleSink;

/// NUNGIL — 화면 영역 실시간 번역기
///
/// 지정한 화면 영역을 주기적으로 캡처해 텍스트를 인식하고
/// 대상 언어로 번역해 보여준다.
#[derive(Parser, Debug)]
#[command(name = "nungil")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 캡처 영역 "x,y,너비x높이" (예: "100,200,640x360")
    #[arg(long, short = 'r')]
    region: Option<String>,

    /// 캡처 주기 프리셋 (high, normal, slow, very-slow)
    #[arg(long, short = 'f')]
    frequency: Option<String>,

    /// 번역 대상 로케일 (예: "zh-TW", "en")
    #[arg(long, short = 't')]
    target: Option<String>,
}

/// "x,y,너비x높이" 형식 파싱
fn parse_region(input: &str) -> Result<CaptureRegion> {
    let parts: Vec<&str> = input.split(',').collect();
    let [x, y, size] = parts.as_slice() else {
        return Err(anyhow!("영역 형식은 \"x,y,너비x높이\" (입력: {input})"));
    };
    let (width, height) = size
        .split_once('x')
        .ok_or_else(|| anyhow!("크기 형식은 \"너비x높이\" (입력: {size})"))?;

    Ok(CaptureRegion::new(
        x.trim().parse().context("x 좌표 파싱 실패")?,
        y.trim().parse().context("y 좌표 파싱 실패")?,
        width.trim().parse().context("너비 파싱 실패")?,
        height.trim().parse().context("높이 파싱 실패")?,
    ))
}

/// 주기 프리셋 이름 파싱
fn parse_frequency(input: &str) -> Result<CaptureFrequency> {
    match input {
        "high" => Ok(CaptureFrequency::High),
        "normal" => Ok(CaptureFrequency::Normal),
        "slow" => Ok(CaptureFrequency::Slow),
        "very-slow" => Ok(CaptureFrequency::VerySlow),
        other => Err(anyhow!(
            "알 수 없는 주기 프리셋: {other} (high/normal/slow/very-slow)"
        )),
    }
}

/// CLI 인자를 설정 복사본에 반영 (파일에는 저장하지 않음)
fn apply_overrides(config: &mut AppConfig, args: &Args) -> Result<()> {
    if let Some(ref region) = args.region {
        config.capture.region = parse_region(region)?;
    }
    if let Some(ref frequency) = args.frequency {
        config.capture.frequency = parse_frequency(frequency)?;
    }
    if let Some(ref target) = args.target {
        config.translation.target_locale = target.clone();
    }
    Ok(())
}

fn print_banner(config: &AppConfig) {
    println!();
    println!("┌──────────────────────────────────────────────┐");
    println!("│  NUNGIL — 화면 영역 실시간 번역기            │");
    println!("├──────────────────────────────────────────────┤");
    println!(
        "│  영역: ({}, {}) {}x{}",
        config.capture.region.x,
        config.capture.region.y,
        config.capture.region.width,
        config.capture.region.height
    );
    println!(
        "│  주기: {}ms / 대상: {}",
        config.capture.frequency.interval_ms(),
        config.translation.target_locale
    );
    println!("└──────────────────────────────────────────────┘");
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "nungil={level},nungil_app={level},nungil_core={level},nungil_vision={level},nungil_network={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("NUNGIL 시작");

    // 설정 로드
    let manager = match args.config {
        Some(ref path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    info!("설정 파일: {}", manager.config_path().display());

    let mut config = manager.get();
    apply_overrides(&mut config, &args)?;
    config.validate().context("설정 검증 실패")?;

    // ── 어댑터 생성 (DI 와이어링) ──

    let ocr = Arc::new(GoogleVisionOcr::new(&config.ocr)?);
    let translator = Arc::new(GoogleTranslateClient::new(&config.translation)?);

    // 세션 시작 전에 자격 증명을 한 번 확인한다
    translator
        .verify_credentials()
        .await
        .context("번역 자격 증명 확인 실패 — API 키를 확인하세요")?;

    let sampler = Arc::new(RegionSampler::new());
    let sink = Arc::new(ConsoleSink::new(config.display.console_output));
    let scheduler = CaptureScheduler::new(sampler, ocr, translator, sink);

    print_banner(&config);

    let session = scheduler.start(&config)?;
    info!(
        session_id = %session.session_id,
        "캡처 세션 실행 중 (Ctrl+C로 종료)"
    );

    lifecycle::wait_for_signal().await;

    scheduler.stop()?;
    info!("NUNGIL 종료");
    Ok(())
}
