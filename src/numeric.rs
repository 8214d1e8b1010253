//! 입력값 정규화 유틸리티.
//!
//! 모든 계산기는 이 모듈의 함수만 사용해 숫자를 정리한다. 잘못된 값은 오류로
//! 보고하지 않고 0 또는 가장 가까운 경계값으로 조용히 보정한다.

/// NaN/무한대/음수를 0으로 바꾼다.
pub fn coerce_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 선택 입력값을 정리한다. `None`이면 `fallback`을 그대로 쓴다.
pub fn coerce_or(value: Option<f64>, fallback: f64) -> f64 {
    value.map(coerce_non_negative).unwrap_or(fallback)
}

/// 퍼센트 값을 [0, 100] 범위로 자른다. NaN은 0.
pub fn clamp_percent(value: f64) -> f64 {
    clamp_or_zero(value, 100.0)
}

/// 비율 값을 [0, 1] 범위로 자른다. NaN은 0.
pub fn clamp_unit(value: f64) -> f64 {
    clamp_or_zero(value, 1.0)
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// 0.5를 양의 방향으로 올리는 반올림. 음수 현금흐름도 같은 규칙을 따른다.
///
/// `f64::round`는 -2.5를 -3으로 보내지만 여기서는 -2가 된다.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
