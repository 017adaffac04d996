//! 프레임 유사도 비교.
//!
//! 정규화 상호상관(NCC) 방식으로 두 그레이스케일 프레임의 유사도를
//! 계산한다. 템플릿을 탐색 프레임의 모든 정렬 위치에 대고 상관 계수를
//! 구한 뒤 최댓값을 점수로 삼는다. 점수는 [-1.0, 1.0] 범위이며
//! 전역 밝기 차이에는 영향받지 않는다.

use nungil_core::models::frame::Frame;
use tracing::trace;

/// 완전 일치 판정 허용 오차
const PERFECT_EPSILON: f64 = 1e-9;

/// 점수가 완전 일치(1.0)로 간주되는지 여부
pub fn is_perfect(score: f64) -> bool {
    score >= 1.0 - PERFECT_EPSILON
}

/// 두 프레임의 NCC 유사도 점수
///
/// `template`을 `search` 내 모든 정렬 위치에 대고 상관 계수를 구한
/// 최댓값을 반환한다. 같은 크기 프레임이면 정렬 위치는 하나다.
///
/// 경계 동작:
/// - 템플릿이 탐색 프레임보다 어느 축이든 크면 놓을 자리가 없으므로 0.0
/// - 어떤 정렬 위치에서 양쪽 모두 분산이 0(민무늬)이면 그 위치는 1.0,
///   한쪽만 분산이 0이면 상관이 정의되지 않으므로 0.0
pub fn compare(search: &Frame, template: &Frame) -> f64 {
    if template.width > search.width || template.height > search.height {
        trace!(
            "템플릿({}x{})이 탐색 프레임({}x{})보다 큼 — 점수 0.0",
            template.width,
            template.height,
            search.width,
            search.height
        );
        return 0.0;
    }
    if template.width == 0 || template.height == 0 {
        return 0.0;
    }

    let tw = template.width as usize;
    let th = template.height as usize;
    let sw = search.width as usize;

    // 템플릿 통계는 정렬 위치와 무관하므로 한 번만 계산
    let t_mean = mean(&template.pixels);
    let t_dev: Vec<f64> = template.pixels.iter().map(|&p| p as f64 - t_mean).collect();
    let t_norm_sq: f64 = t_dev.iter().map(|d| d * d).sum();

    let max_dx = sw - tw;
    let max_dy = (search.height as usize) - th;

    let mut best = f64::NEG_INFINITY;
    for dy in 0..=max_dy {
        for dx in 0..=max_dx {
            let score = correlate_at(search, dx, dy, tw, th, &t_dev, t_norm_sq);
            if score > best {
                best = score;
            }
        }
    }

    best.clamp(-1.0, 1.0)
}

/// 정렬 위치 (dx, dy)에서의 상관 계수
fn correlate_at(
    search: &Frame,
    dx: usize,
    dy: usize,
    tw: usize,
    th: usize,
    t_dev: &[f64],
    t_norm_sq: f64,
) -> f64 {
    let sw = search.width as usize;
    let n = (tw * th) as f64;

    let mut patch_sum = 0.0;
    for row in 0..th {
        let base = (dy + row) * sw + dx;
        for &p in &search.pixels[base..base + tw] {
            patch_sum += p as f64;
        }
    }
    let patch_mean = patch_sum / n;

    let mut numerator = 0.0;
    let mut patch_norm_sq = 0.0;
    for row in 0..th {
        let base = (dy + row) * sw + dx;
        for (col, &p) in search.pixels[base..base + tw].iter().enumerate() {
            let p_dev = p as f64 - patch_mean;
            numerator += t_dev[row * tw + col] * p_dev;
            patch_norm_sq += p_dev * p_dev;
        }
    }

    if t_norm_sq == 0.0 || patch_norm_sq == 0.0 {
        // 양쪽 모두 민무늬면 동일 내용으로, 한쪽만 민무늬면 불일치로 본다
        return if t_norm_sq == 0.0 && patch_norm_sq == 0.0 {
            1.0
        } else {
            0.0
        };
    }

    numerator / (t_norm_sq * patch_norm_sq).sqrt()
}

fn mean(pixels: &[u8]) -> f64 {
    let sum: f64 = pixels.iter().map(|&p| p as f64).sum();
    sum / pixels.len() as f64
}
