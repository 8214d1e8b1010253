use serde::{Deserialize, Serialize};

use crate::numeric::round_half_up;

/// 손익분기 거래 금액이 이 값을 넘으면 비현실적인 입력으로 보고 버린다.
pub const BREAK_EVEN_DEAL_VALUE_CEILING: f64 = 1_000_000.0;

pub const WARN_DEAL_VALUE_UNREALISTIC: &str =
    "Break-even deal value is extremely high. Inputs may be unrealistic.";
pub const WARN_CLOSE_RATE_UNREACHABLE: &str =
    "Required close rate to break even exceeds 100%. Tier is not viable at current inputs.";

/// 월 순이익 기준 수익성 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitabilityState {
    Profitable,
    Unprofitable,
    Breakeven,
}

impl ProfitabilityState {
    /// `eps = max(50, 월 투자액의 2%)` 밴드로 판정한다. 경계값(±eps)은 breakeven.
    pub fn classify(monthly_net_profit: f64, monthly_investment: f64) -> Self {
        let eps = profitability_epsilon(monthly_investment);
        if monthly_net_profit > eps {
            ProfitabilityState::Profitable
        } else if monthly_net_profit < -eps {
            ProfitabilityState::Unprofitable
        } else {
            ProfitabilityState::Breakeven
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitabilityState::Profitable => "profitable",
            ProfitabilityState::Unprofitable => "unprofitable",
            ProfitabilityState::Breakeven => "breakeven",
        }
    }
}

impl std::fmt::Display for ProfitabilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn profitability_epsilon(monthly_investment: f64) -> f64 {
    (0.02 * monthly_investment).max(50.0)
}

/// 나머지 두 값을 고정했을 때 월 투자액을 맞추는 리드/거래금액/성약률.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BreakEven {
    #[serde(rename = "breakEvenLeadsPerMonth")]
    pub leads_per_month: Option<f64>,
    #[serde(rename = "breakEvenDealValue")]
    pub deal_value: Option<f64>,
    #[serde(rename = "breakEvenCloseRatePct")]
    pub close_rate_pct: Option<f64>,
}

/// 손익분기 계산용 지점당 경제 값. 비율은 모두 소수(0~1).
#[derive(Debug, Clone, Copy)]
pub struct BreakEvenBasis {
    pub monthly_investment: f64,
    pub leads_per_month: f64,
    pub deal_value: f64,
    pub missed_rate: f64,
    pub close_rate: f64,
    pub ai_rate: f64,
    /// 네트워크 비용을 지점 수로 나눠 보는 경우의 지점 수. 단일 지점은 1.
    pub locations: f64,
}

impl BreakEven {
    /// 분모가 양수일 때만 각 값을 구하고 범위를 벗어난 값은 경고와 함께 버린다.
    pub fn solve(basis: &BreakEvenBasis, warnings: &mut Vec<String>) -> Self {
        let b = basis;
        let value_per_lead = b.missed_rate * b.deal_value * b.close_rate * b.ai_rate;

        let leads_per_month = (value_per_lead > 0.0 && b.locations > 0.0)
            .then(|| (b.monthly_investment / (value_per_lead * b.locations)).ceil());

        let denom_deal = b.leads_per_month * b.missed_rate * b.close_rate * b.ai_rate * b.locations;
        let deal_value = if denom_deal > 0.0 {
            let needed = b.monthly_investment / denom_deal;
            if needed > BREAK_EVEN_DEAL_VALUE_CEILING {
                push_warning(warnings, WARN_DEAL_VALUE_UNREALISTIC);
                None
            } else {
                Some(needed)
            }
        } else {
            None
        };

        let denom_close =
            b.leads_per_month * b.missed_rate * b.deal_value * b.ai_rate * b.locations;
        let close_rate_pct = if denom_close > 0.0 {
            let pct = b.monthly_investment / denom_close * 100.0;
            if pct > 100.0 {
                push_warning(warnings, WARN_CLOSE_RATE_UNREACHABLE);
                None
            } else if pct < 0.0 {
                None
            } else {
                Some(pct)
            }
        } else {
            None
        };

        BreakEven {
            leads_per_month,
            deal_value,
            close_rate_pct,
        }
    }
}

/// 같은 문구는 한 번만 기록한다.
pub fn push_warning(warnings: &mut Vec<String>, message: &str) {
    if !warnings.iter().any(|w| w == message) {
        log::warn!("{message}");
        warnings.push(message.to_string());
    }
}

/// 도입을 미룰 때 놓치는 회수 매출(정수 반올림).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfWaiting {
    pub per_month: f64,
    pub three_months: f64,
    pub six_months: f64,
    pub twelve_months: f64,
}

impl CostOfWaiting {
    pub fn from_monthly(monthly_recovered: f64) -> Self {
        Self {
            per_month: round_half_up(monthly_recovered),
            three_months: round_half_up(monthly_recovered * 3.0),
            six_months: round_half_up(monthly_recovered * 6.0),
            twelve_months: round_half_up(monthly_recovered * 12.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub net_monthly: f64,
    pub year1_net: f64,
}

impl CashFlow {
    pub fn new(monthly_net_profit: f64, annual_net_profit: f64) -> Self {
        Self {
            net_monthly: round_half_up(monthly_net_profit),
            year1_net: round_half_up(annual_net_profit),
        }
    }
}

/// 기본/네트워크 결과를 공통으로 다루기 위한 직접 지표 뷰.
pub trait RoiOutcome {
    /// 네트워크 결과의 정규화 블록. 기본 결과에는 없다.
    fn normalized(&self) -> Option<&super::extended::NormalizedMetrics> {
        None
    }
    fn profitability_state(&self) -> ProfitabilityState;
    fn break_even(&self) -> BreakEven;
    fn monthly_investment(&self) -> f64;
    /// 업종 보정 후 실효 회수율(0~1)
    fn effective_ai_rate(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_band_boundaries() {
        // 월 투자 1000 → eps 50
        assert_eq!(ProfitabilityState::classify(51.0, 1000.0), ProfitabilityState::Profitable);
        assert_eq!(ProfitabilityState::classify(-51.0, 1000.0), ProfitabilityState::Unprofitable);
        assert_eq!(ProfitabilityState::classify(0.0, 1000.0), ProfitabilityState::Breakeven);
        assert_eq!(ProfitabilityState::classify(50.0, 1000.0), ProfitabilityState::Breakeven);
        assert_eq!(ProfitabilityState::classify(-50.0, 1000.0), ProfitabilityState::Breakeven);
    }

    #[test]
    fn epsilon_scales_with_investment() {
        assert_eq!(profitability_epsilon(0.0), 50.0);
        assert_eq!(profitability_epsilon(10_000.0), 200.0);
        assert_eq!(ProfitabilityState::classify(150.0, 10_000.0), ProfitabilityState::Breakeven);
    }

    fn basis(leads: f64, deal: f64) -> BreakEvenBasis {
        BreakEvenBasis {
            monthly_investment: 1000.0,
            leads_per_month: leads,
            deal_value: deal,
            missed_rate: 0.5,
            close_rate: 0.2,
            ai_rate: 0.5,
            locations: 1.0,
        }
    }

    #[test]
    fn break_even_zero_leads_nulls_volume_dependent_fields() {
        let mut warnings = Vec::new();
        let be = BreakEven::solve(&basis(0.0, 1000.0), &mut warnings);
        // 리드당 가치 = 0.5*1000*0.2*0.5 = 50 → 20건
        assert_eq!(be.leads_per_month, Some(20.0));
        assert_eq!(be.deal_value, None);
        assert_eq!(be.close_rate_pct, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unreachable_close_rate_warns_once() {
        let mut warnings = Vec::new();
        // 분모 = 10*0.5*100*0.5 = 250 → 필요 성약률 400%
        let be = BreakEven::solve(&basis(10.0, 100.0), &mut warnings);
        assert_eq!(be.close_rate_pct, None);
        BreakEven::solve(&basis(10.0, 100.0), &mut warnings);
        assert_eq!(warnings, vec![WARN_CLOSE_RATE_UNREACHABLE.to_string()]);
    }

    #[test]
    fn extreme_deal_value_is_discarded() {
        let mut warnings = Vec::new();
        let mut b = basis(1.0, 100.0);
        b.missed_rate = 0.0001;
        b.monthly_investment = 100_000.0;
        let be = BreakEven::solve(&b, &mut warnings);
        assert_eq!(be.deal_value, None);
        assert!(warnings.iter().any(|w| w == WARN_DEAL_VALUE_UNREALISTIC));
    }

    #[test]
    fn cost_of_waiting_rounds_each_horizon() {
        let c = CostOfWaiting::from_monthly(1000.4);
        assert_eq!(c.per_month, 1000.0);
        assert_eq!(c.three_months, 3001.0);
        assert_eq!(c.twelve_months, 12005.0);
        let cf = CashFlow::new(-10.5, -126.0);
        assert_eq!(cf.net_monthly, -10.0);
    }
}
