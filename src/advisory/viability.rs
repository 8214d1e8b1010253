use serde::Serialize;

use crate::numeric::{clamp_percent, coerce_non_negative, round_half_up};
use crate::roi::{calculate_roi, ExtendedRoiInput, ExtendedRoiResult, RoiOutcome};
use crate::tables::{min_viable_leads, Tier};

/// 건강한 마진으로 보는 월 회수액 / 월 투자액 배수.
pub const OPTIMAL_RECOVERY_MULTIPLE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViabilitySeverity {
    /// 손익분기 미만, 음의 ROI 예상
    Critical,
    /// 수익은 나지만 최소 유효/최적 물량 미만
    Warning,
    Ok,
}

/// 리드 물량 적정성 평가.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViabilityReport {
    pub is_viable: bool,
    pub is_below_breakeven: bool,
    pub is_below_optimal: bool,

    pub current_leads: f64,
    pub min_viable_leads: f64,
    pub breakeven_leads: f64,
    pub optimal_leads: f64,

    /// 최소 유효 물량 대비 부족분 [%]
    pub volume_gap_percent: f64,
    pub severity: ViabilitySeverity,

    pub industry_key: String,
    pub tier_key: String,
    pub monthly_investment: f64,
}

/// 현재 리드 물량이 손익분기/최소 유효/최적 물량을 넘는지 평가한다.
///
/// `result`가 없으면 입력으로 네트워크 ROI를 새로 계산한다.
pub fn check_volume_viability(
    input: &ExtendedRoiInput,
    result: Option<&ExtendedRoiResult>,
) -> ViabilityReport {
    let computed;
    let result = match result {
        Some(r) => r,
        None => {
            computed = calculate_roi(input);
            &computed
        }
    };

    let industry_key = result.industry_key.clone();
    let tier_key = Tier::from_key(&input.tier_key)
        .unwrap_or(Tier::Core)
        .as_key()
        .to_string();
    let current_leads = coerce_non_negative(input.base.leads_per_month);
    let min_viable = min_viable_leads(&industry_key);
    let monthly_investment = result.monthly_investment();

    let missed_rate = clamp_percent(input.base.missed_rate_pct) / 100.0;
    let close_rate = clamp_percent(input.base.close_rate_pct) / 100.0;
    let deal_value = coerce_non_negative(input.base.deal_value);
    let value_per_lead = missed_rate * deal_value * close_rate * result.effective_ai_rate();
    // 리드 수는 지점당 값이므로 네트워크 비용은 지점 수로 나눠 본다.
    let locations = f64::from(result.extended.inputs.num_locations.max(1));
    let network_value_per_lead = value_per_lead * locations;

    let (optimal_leads, breakeven_leads) = if network_value_per_lead > 0.0 {
        (
            (monthly_investment * OPTIMAL_RECOVERY_MULTIPLE / network_value_per_lead).ceil(),
            (monthly_investment / network_value_per_lead).ceil(),
        )
    } else {
        (0.0, 0.0)
    };

    let is_viable = current_leads >= min_viable;
    let is_below_breakeven = current_leads < breakeven_leads;
    let is_below_optimal = current_leads < optimal_leads;
    let severity = if is_below_breakeven {
        ViabilitySeverity::Critical
    } else if !is_viable || is_below_optimal {
        ViabilitySeverity::Warning
    } else {
        ViabilitySeverity::Ok
    };

    let volume_gap_percent = if min_viable > 0.0 && current_leads < min_viable {
        round_half_up((min_viable - current_leads) / min_viable * 100.0)
    } else {
        0.0
    };

    if severity != ViabilitySeverity::Ok {
        log::debug!(
            "volume viability {severity:?}: leads={current_leads} \
             breakeven={breakeven_leads} optimal={optimal_leads}"
        );
    }

    ViabilityReport {
        is_viable,
        is_below_breakeven,
        is_below_optimal,
        current_leads,
        min_viable_leads: min_viable.ceil(),
        breakeven_leads,
        optimal_leads,
        volume_gap_percent,
        severity,
        industry_key,
        tier_key,
        monthly_investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::{ProfitabilityState, RoiInput};

    fn hvac(leads: f64) -> ExtendedRoiInput {
        ExtendedRoiInput {
            base: RoiInput {
                industry_key: "hvac".into(),
                leads_per_month: leads,
                deal_value: 1200.0,
                missed_rate_pct: 43.0,
                close_rate_pct: 28.0,
                response_time_hours: 8.2,
                monthly_investment: 1997.0,
                ai_recovery_rate: 0.6,
                ..RoiInput::default()
            },
            num_locations: 1,
            tier_key: "core".into(),
            ..ExtendedRoiInput::default()
        }
    }

    #[test]
    fn tiny_volume_is_critical() {
        let report = check_volume_viability(&hvac(5.0), None);
        assert_eq!(report.severity, ViabilitySeverity::Critical);
        assert!(report.is_below_breakeven);
        assert!(!report.is_viable);
        assert_eq!(report.min_viable_leads, 95.0);
        // (95-5)/95 = 94.7% → 95
        assert_eq!(report.volume_gap_percent, 95.0);
    }

    #[test]
    fn healthy_volume_is_ok() {
        let report = check_volume_viability(&hvac(400.0), None);
        assert_eq!(report.severity, ViabilitySeverity::Ok);
        assert_eq!(report.volume_gap_percent, 0.0);
        assert!(report.optimal_leads >= report.breakeven_leads);
    }

    #[test]
    fn reuses_supplied_result() {
        let input = hvac(60.0);
        let result = calculate_roi(&input);
        let a = check_volume_viability(&input, Some(&result));
        let b = check_volume_viability(&input, None);
        assert_eq!(a, b);
    }

    #[test]
    fn network_thresholds_are_per_location() {
        let input = ExtendedRoiInput {
            base: RoiInput {
                industry_key: "pest".into(),
                leads_per_month: 300.0,
                deal_value: 200.0,
                missed_rate_pct: 38.0,
                close_rate_pct: 35.0,
                response_time_hours: 5.0,
                monthly_investment: 1997.0,
                ai_recovery_rate: 0.6,
                ..RoiInput::default()
            },
            num_locations: 3,
            tier_key: "core".into(),
            ..ExtendedRoiInput::default()
        };
        let result = calculate_roi(&input);
        let report = check_volume_viability(&input, Some(&result));
        assert_eq!(result.normalized.profitability_state, ProfitabilityState::Profitable);
        assert_eq!(report.monthly_investment, 4997.0);
        assert_eq!(
            Some(report.breakeven_leads),
            result.normalized.break_even.leads_per_month
        );
        assert!(!report.is_below_breakeven);
        assert_ne!(report.severity, ViabilitySeverity::Critical);
        assert!(report.breakeven_leads < 120.0);
    }

    #[test]
    fn zero_value_per_lead_has_no_thresholds() {
        let mut input = hvac(50.0);
        input.base.deal_value = 0.0;
        let report = check_volume_viability(&input, None);
        assert_eq!(report.breakeven_leads, 0.0);
        assert_eq!(report.optimal_leads, 0.0);
        assert!(!report.is_below_breakeven);
        assert_eq!(report.severity, ViabilitySeverity::Warning);
    }
}
