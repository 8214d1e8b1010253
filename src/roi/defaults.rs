use serde::{Deserialize, Serialize};

/// 업종과 무관한 전역 기본값. config.toml의 `[defaults]`로 덮어쓸 수 있다.
///
/// 계산 함수는 이 값을 읽기만 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoiDefaults {
    /// 3년 시나리오의 연간 유지 배수
    pub retention_improvement: f64,
    /// 연간 약정 할인율(0~1)
    pub annual_discount: f64,
    /// 6개월 약정 할인율(0~1)
    pub six_month_discount: f64,
    /// SLA 가치 비교 기준이 되는 지원 응답 시간 [h]
    pub baseline_support_hours: f64,
}

impl Default for RoiDefaults {
    fn default() -> Self {
        Self {
            retention_improvement: 0.67,
            annual_discount: 0.15,
            six_month_discount: 0.10,
            baseline_support_hours: 48.0,
        }
    }
}
