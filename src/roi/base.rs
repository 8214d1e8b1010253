use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_percent, clamp_unit, coerce_non_negative};
use crate::tables::{industry_benchmark, vertical_recovery_adjustment};

use super::outcome::{
    BreakEven, BreakEvenBasis, CashFlow, CostOfWaiting, ProfitabilityState, RoiOutcome,
};

/// 약 5분을 시간 단위로 표현한 경계값.
pub const FIVE_MINUTES_IN_HOURS: f64 = 0.083;

/// 단일 지점 시나리오 입력.
///
/// 모든 필드는 생략 가능하며 생략 시 0(선택 필드는 `None`)으로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoiInput {
    /// 업종 키(dental, hvac, legal, plumbing, medspa, pest ...)
    pub industry_key: String,
    /// 지점당 월 리드 수
    pub leads_per_month: f64,
    /// 건당 거래 금액 [USD]
    pub deal_value: f64,
    /// 놓치는 리드 비율 [%]
    pub missed_rate_pct: f64,
    /// 성약률 [%]
    pub close_rate_pct: f64,
    /// 현재 평균 응답 시간 [h]
    pub response_time_hours: f64,
    /// 지점 1곳의 월 정가 [USD]
    pub monthly_investment: f64,
    /// 업종 보정 전 AI 회수율(0~1)
    pub ai_recovery_rate: f64,
    /// 직원 시급 [USD/h]
    pub employee_cost_per_hour: Option<f64>,
    /// 통화 1건 평균 시간 [min]
    pub call_duration_minutes: Option<f64>,
}

impl RoiInput {
    /// 업종 대표값(거래 금액, 성약률, 누락률, 응답 시간)으로 입력을 채운다.
    pub fn from_industry_preset(
        industry_key: &str,
        leads_per_month: f64,
        monthly_investment: f64,
        ai_recovery_rate: f64,
    ) -> Self {
        let preset = industry_benchmark(industry_key);
        Self {
            industry_key: industry_key.to_string(),
            leads_per_month,
            deal_value: preset.deal_value,
            missed_rate_pct: preset.missed_rate_pct,
            close_rate_pct: preset.close_rate_pct,
            response_time_hours: preset.response_time_hours,
            monthly_investment,
            ai_recovery_rate,
            employee_cost_per_hour: None,
            call_duration_minutes: None,
        }
    }
}

/// 지점 1곳 기준 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRoiResult {
    // 정리된 입력값
    pub industry_key: String,
    pub leads_per_month: f64,
    pub deal_value: f64,
    pub missed_rate_pct: f64,
    pub close_rate_pct: f64,
    pub response_time_hours: f64,
    /// 업종 보정 후 회수율
    pub ai_recovery_rate: f64,

    pub monthly_missed_leads: f64,
    pub monthly_missed_revenue: f64,
    pub revenue_at_risk_annual: f64,
    pub revenue_recovered_annual: f64,
    pub monthly_recovered: f64,
    pub annual_investment: f64,

    pub monthly_net_profit: f64,
    pub annual_net_profit: f64,
    pub roi_percent: f64,
    pub profitability_state: ProfitabilityState,

    #[serde(flatten)]
    pub break_even: BreakEven,

    pub recovered_calls_annual: f64,
    pub time_saved_hours_annual: f64,
    pub time_saved_value_annual: f64,

    /// 응답 속도 연구 통계(배수). 매출 계산에는 쓰지 않는다.
    pub conversion_lift_factor: f64,
    pub cost_of_waiting: CostOfWaiting,
    pub cash_flow: CashFlow,
    pub warnings: Vec<String>,
}

impl RoiOutcome for BaseRoiResult {
    fn profitability_state(&self) -> ProfitabilityState {
        self.profitability_state
    }

    fn break_even(&self) -> BreakEven {
        self.break_even
    }

    fn monthly_investment(&self) -> f64 {
        self.annual_investment / 12.0
    }

    fn effective_ai_rate(&self) -> f64 {
        self.ai_recovery_rate
    }
}

/// 응답 시간을 4단계 속도 구간으로 나눈다. 0=24시간 이상, 3=5분 미만.
pub fn speed_tier(response_time_hours: f64) -> u8 {
    let h = coerce_non_negative(response_time_hours);
    if h >= 24.0 {
        0
    } else if h >= 1.0 {
        1
    } else if h >= FIVE_MINUTES_IN_HOURS {
        2
    } else {
        3
    }
}

/// 응답 시간별 전환율 배수(연구 통계).
pub fn research_conversion_lift(response_time_hours: f64) -> f64 {
    match speed_tier(response_time_hours) {
        0 => 21.0,
        1 => 9.0,
        2 => 4.0,
        _ => 2.0,
    }
}

/// 업종 키를 정리한다. 비어 있으면 "unknown".
pub(crate) fn normalize_industry_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        "unknown".to_string()
    } else {
        key.to_ascii_lowercase()
    }
}

/// 단일 지점의 회수 매출과 손익분기를 계산한다.
pub fn calculate_base_roi(input: &RoiInput) -> BaseRoiResult {
    let mut warnings = Vec::new();

    let industry_key = normalize_industry_key(&input.industry_key);
    let leads_per_month = coerce_non_negative(input.leads_per_month);
    let deal_value = coerce_non_negative(input.deal_value);
    let missed_rate_pct = clamp_percent(input.missed_rate_pct);
    let close_rate_pct = clamp_percent(input.close_rate_pct);
    let response_time_hours = coerce_non_negative(input.response_time_hours);
    let monthly_investment = coerce_non_negative(input.monthly_investment);
    let employee_cost_per_hour = input.employee_cost_per_hour.map(coerce_non_negative);
    let call_duration_minutes = input.call_duration_minutes.map(coerce_non_negative);

    let adjustment = vertical_recovery_adjustment(&industry_key);
    let ai_recovery_rate = clamp_unit(clamp_unit(input.ai_recovery_rate) * adjustment);

    let missed_rate = missed_rate_pct / 100.0;
    let close_rate = close_rate_pct / 100.0;

    let monthly_missed_leads = leads_per_month * missed_rate;
    let monthly_missed_revenue = monthly_missed_leads * deal_value * close_rate;
    let revenue_at_risk_annual = monthly_missed_revenue * 12.0;

    let revenue_recovered_annual = revenue_at_risk_annual * ai_recovery_rate;
    let monthly_recovered = revenue_recovered_annual / 12.0;

    let annual_investment = monthly_investment * 12.0;
    let monthly_net_profit = monthly_recovered - monthly_investment;
    let annual_net_profit = revenue_recovered_annual - annual_investment;
    let roi_percent = if annual_investment > 0.0 {
        annual_net_profit / annual_investment * 100.0
    } else {
        0.0
    };
    let profitability_state = ProfitabilityState::classify(monthly_net_profit, monthly_investment);

    let break_even = BreakEven::solve(
        &BreakEvenBasis {
            monthly_investment,
            leads_per_month,
            deal_value,
            missed_rate,
            close_rate,
            ai_rate: ai_recovery_rate,
            locations: 1.0,
        },
        &mut warnings,
    );

    let (recovered_calls_annual, time_saved_hours_annual, time_saved_value_annual) =
        match (employee_cost_per_hour, call_duration_minutes) {
            (Some(cost), Some(minutes)) => {
                let calls = monthly_missed_leads * ai_recovery_rate * 12.0;
                let hours = calls * (minutes / 60.0);
                (calls, hours, hours * cost)
            }
            _ => (0.0, 0.0, 0.0),
        };

    log::debug!(
        "base roi: industry={industry_key} adj={adjustment} rate={ai_recovery_rate:.4} \
         at_risk={revenue_at_risk_annual:.2}"
    );

    BaseRoiResult {
        industry_key,
        leads_per_month,
        deal_value,
        missed_rate_pct,
        close_rate_pct,
        response_time_hours,
        ai_recovery_rate,
        monthly_missed_leads,
        monthly_missed_revenue,
        revenue_at_risk_annual,
        revenue_recovered_annual,
        monthly_recovered,
        annual_investment,
        monthly_net_profit,
        annual_net_profit,
        roi_percent,
        profitability_state,
        break_even,
        recovered_calls_annual,
        time_saved_hours_annual,
        time_saved_value_annual,
        conversion_lift_factor: research_conversion_lift(response_time_hours),
        cost_of_waiting: CostOfWaiting::from_monthly(monthly_recovered),
        cash_flow: CashFlow::new(monthly_net_profit, annual_net_profit),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dental() -> RoiInput {
        RoiInput {
            industry_key: "dental".into(),
            leads_per_month: 200.0,
            deal_value: 400.0,
            missed_rate_pct: 30.0,
            close_rate_pct: 50.0,
            response_time_hours: 2.0,
            monthly_investment: 2000.0,
            ai_recovery_rate: 0.5,
            ..RoiInput::default()
        }
    }

    #[test]
    fn core_revenue_math() {
        let r = calculate_base_roi(&dental());
        // 200*0.3 = 60건, 60*400*0.5 = 12,000/월
        assert_eq!(r.monthly_missed_leads, 60.0);
        assert_eq!(r.monthly_missed_revenue, 12_000.0);
        assert_eq!(r.revenue_at_risk_annual, 144_000.0);
        assert_eq!(r.revenue_recovered_annual, 72_000.0);
        assert_eq!(r.monthly_recovered, 6_000.0);
        assert_eq!(r.monthly_net_profit, 4_000.0);
        assert_eq!(r.roi_percent, 200.0);
        assert_eq!(r.profitability_state, ProfitabilityState::Profitable);
        // 리드당 가치 = 0.3*400*0.5*0.5 = 30 → 2000/30 = 66.7 → 67
        assert_eq!(r.break_even.leads_per_month, Some(67.0));
        assert_eq!(r.cost_of_waiting.twelve_months, 72_000.0);
        assert_eq!(r.conversion_lift_factor, 9.0);
    }

    #[test]
    fn zero_investment_gives_zero_roi() {
        let input = RoiInput {
            monthly_investment: 0.0,
            ..dental()
        };
        let r = calculate_base_roi(&input);
        assert_eq!(r.roi_percent, 0.0);
        assert!(r.roi_percent.is_finite());
    }

    #[test]
    fn garbage_inputs_degrade_silently() {
        let input = RoiInput {
            industry_key: String::new(),
            leads_per_month: f64::NAN,
            deal_value: -10.0,
            missed_rate_pct: 250.0,
            close_rate_pct: -4.0,
            ai_recovery_rate: 7.0,
            ..RoiInput::default()
        };
        let r = calculate_base_roi(&input);
        assert_eq!(r.industry_key, "unknown");
        assert_eq!(r.leads_per_month, 0.0);
        assert_eq!(r.missed_rate_pct, 100.0);
        assert_eq!(r.close_rate_pct, 0.0);
        assert_eq!(r.ai_recovery_rate, 1.0);
        assert!(r.warnings.is_empty());
        assert_eq!(r.break_even, BreakEven::default());
    }

    #[test]
    fn time_savings_need_both_inputs() {
        let without = calculate_base_roi(&dental());
        assert_eq!(without.time_saved_value_annual, 0.0);

        let input = RoiInput {
            employee_cost_per_hour: Some(30.0),
            call_duration_minutes: Some(6.0),
            ..dental()
        };
        let r = calculate_base_roi(&input);
        // 60건 * 0.5 * 12 = 360통, 360 * 0.1h = 36h, 36 * 30 = 1080
        assert_eq!(r.recovered_calls_annual, 360.0);
        assert!((r.time_saved_hours_annual - 36.0).abs() < 1e-9);
        assert!((r.time_saved_value_annual - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn research_lift_steps() {
        assert_eq!(research_conversion_lift(48.0), 21.0);
        assert_eq!(research_conversion_lift(24.0), 21.0);
        assert_eq!(research_conversion_lift(1.0), 9.0);
        assert_eq!(research_conversion_lift(0.5), 4.0);
        assert_eq!(research_conversion_lift(0.05), 2.0);
        assert_eq!(research_conversion_lift(f64::NAN), 2.0);
    }

    #[test]
    fn preset_fills_benchmark_values() {
        let input = RoiInput::from_industry_preset("legal", 40.0, 3000.0, 0.6);
        assert_eq!(input.deal_value, 12_000.0);
        assert_eq!(input.close_rate_pct, 12.0);
        assert_eq!(input.missed_rate_pct, 45.0);
    }
}
