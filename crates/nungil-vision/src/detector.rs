//! 변경 감지기.
//!
//! 현재 프레임을 기준 프레임과 비교해 파이프라인 후단(OCR/번역)을
//! 실행할지 판단한다. 기준 프레임 갱신은 호출자(스케줄러)가
//! `record_baseline`으로 명시적으로 수행한다 — 평가 자체는 기준을
//! 바꾸지 않는다.

use nungil_core::models::frame::Frame;
use tracing::debug;

use crate::similarity;

/// 평가 결과
#[derive(Debug)]
pub enum ChangeVerdict {
    /// 기준 프레임과 동일 내용 — 후단 생략
    Unchanged,
    /// 변경 감지 — 후단 실행 대상 프레임 반환
    Changed(Frame),
}

/// 프레임 변경 감지기
///
/// 기준 프레임이 없는 상태(시작 직후, reset 직후)의 첫 평가는
/// 항상 `Changed`다.
#[derive(Debug)]
pub struct ChangeDetector {
    /// 마지막으로 후단에 넘긴 프레임
    previous: Option<Frame>,
    /// 동일 판정 임계값
    threshold: f64,
}

impl ChangeDetector {
    /// 새 감지기 생성
    pub fn new(threshold: f64) -> Self {
        Self {
            previous: None,
            threshold,
        }
    }

    /// 현재 프레임이 기준 대비 변경되었는지 평가
    ///
    /// 정방향 점수가 완전 일치(1.0)면 역방향으로 한 번 더 비교한다.
    /// 역방향이 정확히 0.0이면 정방향 일치를 허위 양성으로 보고
    /// `Changed`로 판정한다. 민무늬 프레임 쌍이나 크기가 다른 프레임
    /// 쌍에서 나오는 조합이다.
    pub fn evaluate(&self, current: Frame) -> ChangeVerdict {
        let Some(previous) = &self.previous else {
            debug!("기준 프레임 없음 — 변경으로 판정");
            return ChangeVerdict::Changed(current);
        };

        let forward = similarity::compare(&current, previous);
        if similarity::is_perfect(forward) {
            let reverse = similarity::compare(previous, &current);
            if reverse == 0.0 {
                debug!("정방향 완전 일치, 역방향 0.0 — 변경으로 판정");
                return ChangeVerdict::Changed(current);
            }
            return ChangeVerdict::Unchanged;
        }

        if forward >= self.threshold {
            debug!(score = forward, "유사도 임계값 이상 — 동일 판정");
            ChangeVerdict::Unchanged
        } else {
            debug!(score = forward, "유사도 임계값 미만 — 변경 판정");
            ChangeVerdict::Changed(current)
        }
    }

    /// 기준 프레임 기록
    ///
    /// 후단 실행 여부와 무관하게, 후단을 시도하기로 결정한 시점에
    /// 호출된다. OCR이 실패해도 같은 화면으로 재시도하지 않게 된다.
    pub fn record_baseline(&mut self, frame: &Frame) {
        self.previous = Some(frame.clone());
    }

    /// 기준 프레임 폐기 — 세션 재시작 시 호출
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// 기준 프레임 보유 여부
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn frame(width: u32, height: u32, pixels: Vec<u8>) -> Frame {
        Frame::from_luma(width, height, pixels, Utc::now()).unwrap()
    }

    fn patterned(width: u32, height: u32, seed: u32) -> Frame {
        let pixels = (0..width * height)
            .map(|i| ((i * 37 + seed) % 251) as u8)
            .collect();
        frame(width, height, pixels)
    }

    #[test]
    fn first_evaluation_is_always_changed() {
        let detector = ChangeDetector::new(0.95);
        assert_matches!(
            detector.evaluate(patterned(8, 8, 1)),
            ChangeVerdict::Changed(_)
        );
    }

    #[test]
    fn identical_frame_is_unchanged() {
        let baseline = patterned(16, 16, 3);
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&baseline);
        assert_matches!(detector.evaluate(baseline.clone()), ChangeVerdict::Unchanged);
    }

    #[test]
    fn different_frame_is_changed() {
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&patterned(16, 16, 3));
        let noise: Vec<u8> = (0..256).map(|i| if i % 2 == 0 { 255 } else { 0 }).collect();
        assert_matches!(
            detector.evaluate(frame(16, 16, noise)),
            ChangeVerdict::Changed(_)
        );
    }

    #[test]
    fn evaluation_does_not_update_baseline() {
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&patterned(8, 8, 1));
        let other = patterned(8, 8, 100);
        // 명시적 기록 없이는 같은 프레임이 계속 변경으로 판정된다
        assert_matches!(detector.evaluate(other.clone()), ChangeVerdict::Changed(_));
        assert_matches!(detector.evaluate(other), ChangeVerdict::Changed(_));
    }

    #[test]
    fn reset_discards_baseline() {
        let baseline = patterned(8, 8, 1);
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&baseline);
        assert!(detector.has_baseline());

        detector.reset();
        assert!(!detector.has_baseline());
        assert_matches!(detector.evaluate(baseline), ChangeVerdict::Changed(_));
    }

    #[test]
    fn spurious_perfect_forward_with_zero_reverse_is_changed() {
        // 민무늬 기준(8x8)에 더 큰 민무늬 프레임(16x16)이 들어오면
        // 정방향은 1.0이지만 역방향은 템플릿이 더 커서 0.0이다
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&frame(8, 8, vec![42u8; 64]));
        assert_matches!(
            detector.evaluate(frame(16, 16, vec![42u8; 256])),
            ChangeVerdict::Changed(_)
        );
    }

    #[test]
    fn genuine_perfect_match_not_misflagged() {
        // 같은 크기 민무늬 쌍은 정방향/역방향 모두 1.0 — 동일 판정 유지
        let mut detector = ChangeDetector::new(0.95);
        detector.record_baseline(&frame(8, 8, vec![42u8; 64]));
        assert_matches!(
            detector.evaluate(frame(8, 8, vec![42u8; 64])),
            ChangeVerdict::Unchanged
        );
    }
}
