use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_percent, clamp_unit, coerce_non_negative, coerce_or};
use crate::tables::{peak_months, vertical_defaults, volume_brackets};

use super::base::{calculate_base_roi, speed_tier, RoiInput};
use super::defaults::RoiDefaults;
use super::outcome::{
    BreakEven, BreakEvenBasis, CashFlow, CostOfWaiting, ProfitabilityState, RoiOutcome,
};

/// 약정 형태. 알 수 없는 문자열은 monthly로 본다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum CommitmentType {
    #[default]
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "6month")]
    SixMonth,
    #[serde(rename = "annual")]
    Annual,
}

impl CommitmentType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "6month" => CommitmentType::SixMonth,
            "annual" => CommitmentType::Annual,
            _ => CommitmentType::Monthly,
        }
    }
}

impl From<String> for CommitmentType {
    fn from(value: String) -> Self {
        CommitmentType::parse(&value)
    }
}

/// 분석 기간. "3year" 외에는 모두 1년.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TimeHorizon {
    #[default]
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "3year")]
    ThreeYear,
}

impl From<String> for TimeHorizon {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("3year") {
            TimeHorizon::ThreeYear
        } else {
            TimeHorizon::OneYear
        }
    }
}

/// 부가 상품. `monthly_recovery`가 양수면 직접 회수 매출로, 아니면 `conversion_boost`를
/// 가치 스택에 더한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddOn {
    pub name: Option<String>,
    /// 연간 비용 [USD/년]
    pub annual_cost: f64,
    /// 직접 회수 매출 [USD/월]
    pub monthly_recovery: Option<f64>,
    /// 기본 회수 매출 대비 전환 증가 비율
    pub conversion_boost: Option<f64>,
}

/// 다지점/상업 조건을 포함한 네트워크 시나리오 입력.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtendedRoiInput {
    #[serde(flatten)]
    pub base: RoiInput,
    /// 지점 수. 0은 1로 본다.
    pub num_locations: u32,
    /// 구간 단가가 없는 티어의 추가 지점 월 요금
    pub per_location_fee: f64,
    pub tier_key: String,
    pub commitment_type: CommitmentType,
    pub setup_fee: f64,
    /// 월 통신 크레딧. 1년차 비용에서 차감한다.
    pub comm_allowance_monthly: f64,
    pub is_peak_season: bool,
    /// 성수기 유입 배수. 생략/0/NaN이면 1.
    pub peak_surge_multiplier: Option<f64>,
    pub workflow_count: u32,
    /// 워크플로당 월 절감액. 생략 시 업종 기본값.
    pub workflow_savings_per_month: Option<f64>,
    pub channel_count: u32,
    /// 추가 채널당 증가 비율. 생략 시 업종 기본값.
    pub channel_boost_per_channel: Option<f64>,
    /// 지원 응답 시간 [h]. 생략 시 기준값(48h).
    pub support_hours: Option<f64>,
    pub downtime_risk_per_hour: Option<f64>,
    pub annual_discount: Option<f64>,
    pub six_month_discount: Option<f64>,
    pub time_horizon: TimeHorizon,
    pub add_ons: Vec<AddOn>,
    pub retention_improvement: Option<f64>,
    /// 응답 속도 기반 전환 배수를 직접 지정한다(최소 1).
    pub conversion_lift_factor_override: Option<f64>,
}

/// 계산에 실제로 쓰인 조건값.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTerms {
    pub num_locations: u32,
    pub commitment_type: CommitmentType,
    pub is_peak_season: bool,
    pub peak_surge_multiplier: f64,
    pub peak_annual_factor: f64,
    pub conversion_lift_factor: f64,
    pub retention_improvement: f64,
    pub workflow_count: u32,
    pub workflow_savings_per_month: f64,
    pub channel_count: u32,
    pub channel_boost_per_channel: f64,
    pub support_hours: f64,
    pub downtime_risk_per_hour: f64,
    pub comm_allowance_monthly: f64,
    pub annual_discount: f64,
    pub six_month_discount: f64,
    pub time_horizon: TimeHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetentionLtv {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
    #[serde(rename = "total3Year")]
    pub total_3_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowValue {
    pub workflows: u32,
    pub annual_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelValue {
    pub channel_count: u32,
    pub additional_channels: u32,
    pub reachability_boost: f64,
    pub channel_boost_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaValue {
    pub support_hours: f64,
    pub baseline_hours: f64,
    pub risk_hours_reduced: f64,
    #[serde(rename = "annualSLAValue")]
    pub annual_sla_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnTotals {
    pub total_add_on_cost: f64,
    /// 가치 스택에 들어가는 전환 증가분
    pub total_add_on_value: f64,
    /// 직접 회수 매출에 들어가는 분
    pub direct_add_on_recovery: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentBreakdown {
    /// 첫 지점 월 정가
    pub monthly_base: f64,
    /// 2번째 이후 지점의 월 합계
    pub monthly_additional: f64,
    pub total_monthly: f64,
    /// 약정 할인 후 연간 반복 비용
    pub annual_recurring: f64,
    /// 연간 약정이면 0
    pub setup_fee: f64,
    pub annual_comm_allowance: f64,
    pub total_investment_year1: f64,
    pub effective_investment_year1: f64,
    #[serde(rename = "investment3Y")]
    pub investment_3y: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueTotals {
    #[serde(rename = "totalValue1Y")]
    pub total_value_1y: f64,
    #[serde(rename = "totalValue3Y")]
    pub total_value_3y: Option<f64>,
    #[serde(rename = "net1Y")]
    pub net_1y: f64,
    #[serde(rename = "net3Y")]
    pub net_3y: Option<f64>,
    #[serde(rename = "roi1Y")]
    pub roi_1y: f64,
    #[serde(rename = "roi3Y")]
    pub roi_3y: f64,
}

/// 직접 회수 매출 위에 얹는 확장 가치 스택.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValueStack {
    pub inputs: ResolvedTerms,
    pub at_risk_annual_adjusted: f64,
    pub base_recovered_annual_extended: f64,
    pub lifted_recovered_annual: f64,
    #[serde(rename = "retentionLTV")]
    pub retention_ltv: Option<RetentionLtv>,
    pub workflow: WorkflowValue,
    pub channel: ChannelValue,
    pub sla: SlaValue,
    pub add_ons: AddOnTotals,
    pub investment: InvestmentBreakdown,
    pub totals: ValueTotals,
}

/// UI가 사용하는 네트워크 직접 지표.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetrics {
    pub annual_investment: f64,
    pub monthly_investment: f64,
    pub annual_recovered: f64,
    pub monthly_recovered: f64,
    pub annual_net_profit: f64,
    pub monthly_net_profit: f64,
    pub roi_percent: f64,
    pub profitability_state: ProfitabilityState,
    #[serde(flatten)]
    pub break_even: BreakEven,
    pub cash_flow: CashFlow,
}

/// 네트워크 단위 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedRoiResult {
    pub industry_key: String,
    pub leads_per_month: f64,
    pub deal_value: f64,
    pub missed_rate_pct: f64,
    pub close_rate_pct: f64,
    pub response_time_hours: f64,
    /// 업종 보정 후 실효 회수율
    pub ai_recovery_rate: f64,

    pub revenue_at_risk_annual: f64,
    pub revenue_recovered_annual: f64,
    pub monthly_recovered: f64,

    pub annual_investment: f64,
    pub monthly_investment: f64,
    pub annual_net_profit: f64,
    pub monthly_net_profit: f64,
    pub roi_percent: f64,
    pub profitability_state: ProfitabilityState,

    #[serde(flatten)]
    pub break_even: BreakEven,

    pub recovered_calls_annual: f64,
    pub time_saved_hours_annual: f64,
    pub time_saved_value_annual: f64,

    pub conversion_lift_factor: f64,
    pub cost_of_waiting: CostOfWaiting,
    pub cash_flow: CashFlow,
    pub warnings: Vec<String>,

    pub extended: ExtendedValueStack,
    pub normalized: NormalizedMetrics,
}

impl RoiOutcome for ExtendedRoiResult {
    fn normalized(&self) -> Option<&NormalizedMetrics> {
        Some(&self.normalized)
    }

    fn profitability_state(&self) -> ProfitabilityState {
        self.profitability_state
    }

    fn break_even(&self) -> BreakEven {
        self.normalized.break_even
    }

    fn monthly_investment(&self) -> f64 {
        self.normalized.monthly_investment
    }

    fn effective_ai_rate(&self) -> f64 {
        self.ai_recovery_rate
    }
}

/// 현재 응답 속도와 최고 속도 구간의 차이로 경제적 전환 배수를 정한다.
///
/// 확장 가치 스택에만 쓰이며 직접 회수 매출에는 영향을 주지 않는다.
pub fn economic_conversion_lift(response_time_hours: f64) -> f64 {
    const FASTEST_TIER: u8 = 3;
    match FASTEST_TIER - speed_tier(response_time_hours) {
        0 => 1.00,
        1 => 1.10,
        2 => 1.25,
        _ => 1.40,
    }
}

/// 성수기 연환산 계수 `1 + (성수기 개월/12) × max(0, 배수−1)`.
pub fn peak_annual_factor(peak_months: u32, is_peak_season: bool, surge_multiplier: f64) -> f64 {
    if !is_peak_season || peak_months == 0 || surge_multiplier <= 0.0 {
        return 1.0;
    }
    1.0 + (f64::from(peak_months) / 12.0) * (surge_multiplier - 1.0).max(0.0)
}

/// 2번째 ~ N번째 지점의 월 요금 합계. 티어 구간이 없으면 `per_location_fee` 선형 과금.
pub fn volume_additional_monthly(tier_key: &str, num_locations: u32, per_location_fee: f64) -> f64 {
    let n = num_locations.max(1);
    if n <= 1 {
        return 0.0;
    }
    let brackets = volume_brackets(tier_key);
    if brackets.is_empty() {
        return f64::from(n - 1) * per_location_fee;
    }
    brackets
        .iter()
        .filter(|b| n >= b.from)
        .map(|b| f64::from(n.min(b.to) - b.from + 1) * b.rate)
        .sum()
}

fn surge_multiplier(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v.max(0.0),
        _ => 1.0,
    }
}

fn lift_override(value: Option<f64>) -> Option<f64> {
    value.map(|v| if v.is_finite() { v.max(1.0) } else { 1.0 })
}

/// 기본 전역값으로 네트워크 ROI를 계산한다.
pub fn calculate_roi(input: &ExtendedRoiInput) -> ExtendedRoiResult {
    calculate_roi_with(input, &RoiDefaults::default())
}

/// 호출자가 제공한 전역 기본값으로 네트워크 ROI를 계산한다.
pub fn calculate_roi_with(input: &ExtendedRoiInput, defaults: &RoiDefaults) -> ExtendedRoiResult {
    let base = calculate_base_roi(&input.base);
    let vertical = vertical_defaults(&base.industry_key);
    let tier_key = input.tier_key.trim().to_ascii_lowercase();

    // 조건값 정리
    let num_locations = input.num_locations.max(1);
    let locations = f64::from(num_locations);
    let per_location_fee = coerce_non_negative(input.per_location_fee);
    let commitment_type = input.commitment_type;
    let setup_fee = coerce_non_negative(input.setup_fee);
    let comm_allowance_monthly = coerce_non_negative(input.comm_allowance_monthly);
    let is_peak_season = input.is_peak_season;
    let peak_surge_multiplier = surge_multiplier(input.peak_surge_multiplier);
    let peak_factor = peak_annual_factor(
        peak_months(&base.industry_key),
        is_peak_season,
        peak_surge_multiplier,
    );
    let conversion_lift_factor = lift_override(input.conversion_lift_factor_override)
        .unwrap_or_else(|| economic_conversion_lift(base.response_time_hours));
    let retention_improvement =
        coerce_or(input.retention_improvement, defaults.retention_improvement);
    let workflow_count = input.workflow_count;
    let workflow_savings_per_month = coerce_or(
        input.workflow_savings_per_month,
        vertical.workflow_savings_per_workflow_monthly,
    );
    let channel_count = input.channel_count;
    let channel_boost_per_channel =
        coerce_or(input.channel_boost_per_channel, vertical.channel_boost_per_channel);
    let support_hours = coerce_or(input.support_hours, defaults.baseline_support_hours);
    let downtime_risk_per_hour =
        coerce_or(input.downtime_risk_per_hour, vertical.downtime_risk_per_hour);
    let annual_discount = input
        .annual_discount
        .map(clamp_unit)
        .unwrap_or(defaults.annual_discount);
    let six_month_discount = input
        .six_month_discount
        .map(clamp_unit)
        .unwrap_or(defaults.six_month_discount);
    let time_horizon = input.time_horizon;
    let three_year = time_horizon == TimeHorizon::ThreeYear;

    log::debug!(
        "network roi: locations={num_locations} tier={tier_key} peak_factor={peak_factor:.4} \
         lift={conversion_lift_factor}"
    );

    // 지점 수와 성수기를 반영한 위험/회수 매출
    let at_risk_annual_adjusted = base.revenue_at_risk_annual * locations * peak_factor;
    let effective_ai_rate = if base.revenue_at_risk_annual > 0.0 {
        base.revenue_recovered_annual / base.revenue_at_risk_annual
    } else {
        clamp_unit(input.base.ai_recovery_rate)
    };
    let base_recovered_annual_extended = at_risk_annual_adjusted * effective_ai_rate;
    let lifted_recovered_annual = base_recovered_annual_extended * conversion_lift_factor;

    let retention_ltv = (three_year && lifted_recovered_annual > 0.0 && retention_improvement > 0.0)
        .then(|| {
            let year1 = lifted_recovered_annual;
            let year2 = year1 * retention_improvement;
            let year3 = year2 * retention_improvement;
            RetentionLtv {
                year1,
                year2,
                year3,
                total_3_year: year1 + year2 + year3,
            }
        });

    let annual_workflow_savings = f64::from(workflow_count) * workflow_savings_per_month * 12.0;

    let additional_channels = channel_count.saturating_sub(2);
    let reachability_boost = f64::from(additional_channels) * channel_boost_per_channel;
    let channel_boost_value = base_recovered_annual_extended * reachability_boost;

    let baseline_hours = defaults.baseline_support_hours;
    let risk_hours_reduced = (baseline_hours - support_hours).max(0.0);
    let annual_sla_value = risk_hours_reduced * downtime_risk_per_hour;

    // 부가 상품: 직접 회수분과 가치 스택분을 분리
    let mut total_add_on_cost = 0.0;
    let mut total_add_on_value = 0.0;
    let mut direct_add_on_recovery = 0.0;
    for add_on in &input.add_ons {
        let monthly_recovery = add_on.monthly_recovery.filter(|v| v.is_finite()).unwrap_or(0.0);
        if monthly_recovery > 0.0 {
            direct_add_on_recovery += monthly_recovery * 12.0;
        } else {
            let boost = coerce_non_negative(add_on.conversion_boost.unwrap_or(0.0));
            total_add_on_value += base_recovered_annual_extended * boost;
        }
        total_add_on_cost += coerce_non_negative(add_on.annual_cost);
    }

    let direct_recovered_annual = base_recovered_annual_extended + direct_add_on_recovery;
    let direct_recovered_monthly = direct_recovered_annual / 12.0;

    // 투자비: 지점 구간 단가, 약정 할인, 셋업비, 통신 크레딧
    let monthly_base = base.annual_investment / 12.0;
    let monthly_additional = volume_additional_monthly(&tier_key, num_locations, per_location_fee);
    let total_monthly = monthly_base + monthly_additional;
    let discount = match commitment_type {
        CommitmentType::Annual => annual_discount,
        CommitmentType::SixMonth => six_month_discount,
        CommitmentType::Monthly => 0.0,
    };
    let annual_recurring = total_monthly * 12.0 * (1.0 - discount);
    let final_setup_fee = if commitment_type == CommitmentType::Annual {
        0.0
    } else {
        setup_fee
    };
    let annual_comm_allowance = comm_allowance_monthly * 12.0;
    let total_investment_year1 = annual_recurring + final_setup_fee + total_add_on_cost;
    let effective_investment_year1 = total_investment_year1 - annual_comm_allowance;
    let investment_3y = three_year.then(|| {
        annual_recurring * 3.0 + final_setup_fee + total_add_on_cost * 3.0
            - annual_comm_allowance * 3.0
    });

    log::debug!(
        "network investment: monthly_base={monthly_base:.2} additional={monthly_additional:.2} \
         year1={effective_investment_year1:.2}"
    );

    // 네트워크 직접 지표
    // 통신 크레딧이 비용보다 커도 투자액은 0 아래로 내려가지 않는다.
    let direct_annual_investment = effective_investment_year1.max(0.0);
    let direct_monthly_investment = direct_annual_investment / 12.0;
    let direct_annual_net = direct_recovered_annual - direct_annual_investment;
    let direct_monthly_net = direct_annual_net / 12.0;
    let direct_roi_percent = if direct_annual_investment > 0.0 {
        direct_annual_net / direct_annual_investment * 100.0
    } else {
        0.0
    };
    let profitability_state =
        ProfitabilityState::classify(direct_monthly_net, direct_monthly_investment);

    let mut warnings = base.warnings.clone();
    let break_even = BreakEven::solve(
        &BreakEvenBasis {
            monthly_investment: direct_monthly_investment,
            leads_per_month: base.leads_per_month,
            deal_value: base.deal_value,
            missed_rate: clamp_percent(base.missed_rate_pct) / 100.0,
            close_rate: clamp_percent(base.close_rate_pct) / 100.0,
            ai_rate: effective_ai_rate,
            locations,
        },
        &mut warnings,
    );

    let cost_of_waiting = CostOfWaiting::from_monthly(direct_recovered_monthly);
    let cash_flow = CashFlow::new(direct_monthly_net, direct_annual_net);

    // 가치 스택 합계. 직접 회수분(부가 상품 직접 회수 포함)은 다시 더하지 않는다.
    let total_value_1y = lifted_recovered_annual
        + annual_workflow_savings
        + channel_boost_value
        + annual_sla_value
        + total_add_on_value;
    let total_value_3y = three_year.then(|| {
        let recovered_3y = retention_ltv
            .map(|r| r.total_3_year)
            .unwrap_or(lifted_recovered_annual * 3.0);
        let recurring_value =
            annual_workflow_savings + channel_boost_value + annual_sla_value + total_add_on_value;
        recovered_3y + recurring_value * 3.0
    });
    let net_1y = total_value_1y - direct_annual_investment;
    let net_3y = total_value_3y.zip(investment_3y).map(|(value, cost)| value - cost);
    let roi_1y = if direct_annual_investment > 0.0 {
        net_1y / direct_annual_investment * 100.0
    } else {
        0.0
    };
    let roi_3y = match (net_3y, investment_3y) {
        (Some(net), Some(cost)) if cost > 0.0 => net / cost * 100.0,
        _ => 0.0,
    };

    let normalized = NormalizedMetrics {
        annual_investment: direct_annual_investment,
        monthly_investment: direct_monthly_investment,
        annual_recovered: direct_recovered_annual,
        monthly_recovered: direct_recovered_monthly,
        annual_net_profit: direct_annual_net,
        monthly_net_profit: direct_monthly_net,
        roi_percent: direct_roi_percent,
        profitability_state,
        break_even,
        cash_flow,
    };

    let extended = ExtendedValueStack {
        inputs: ResolvedTerms {
            num_locations,
            commitment_type,
            is_peak_season,
            peak_surge_multiplier,
            peak_annual_factor: peak_factor,
            conversion_lift_factor,
            retention_improvement,
            workflow_count,
            workflow_savings_per_month,
            channel_count,
            channel_boost_per_channel,
            support_hours,
            downtime_risk_per_hour,
            comm_allowance_monthly,
            annual_discount,
            six_month_discount,
            time_horizon,
        },
        at_risk_annual_adjusted,
        base_recovered_annual_extended,
        lifted_recovered_annual,
        retention_ltv,
        workflow: WorkflowValue {
            workflows: workflow_count,
            annual_savings: annual_workflow_savings,
        },
        channel: ChannelValue {
            channel_count,
            additional_channels,
            reachability_boost,
            channel_boost_value,
        },
        sla: SlaValue {
            support_hours,
            baseline_hours,
            risk_hours_reduced,
            annual_sla_value,
        },
        add_ons: AddOnTotals {
            total_add_on_cost,
            total_add_on_value,
            direct_add_on_recovery,
        },
        investment: InvestmentBreakdown {
            monthly_base,
            monthly_additional,
            total_monthly,
            annual_recurring,
            setup_fee: final_setup_fee,
            annual_comm_allowance,
            total_investment_year1,
            effective_investment_year1,
            investment_3y,
        },
        totals: ValueTotals {
            total_value_1y,
            total_value_3y,
            net_1y,
            net_3y,
            roi_1y,
            roi_3y,
        },
    };

    ExtendedRoiResult {
        industry_key: base.industry_key,
        leads_per_month: base.leads_per_month,
        deal_value: base.deal_value,
        missed_rate_pct: base.missed_rate_pct,
        close_rate_pct: base.close_rate_pct,
        response_time_hours: base.response_time_hours,
        ai_recovery_rate: effective_ai_rate,
        revenue_at_risk_annual: at_risk_annual_adjusted,
        revenue_recovered_annual: direct_recovered_annual,
        monthly_recovered: direct_recovered_monthly,
        annual_investment: direct_annual_investment,
        monthly_investment: direct_monthly_investment,
        annual_net_profit: direct_annual_net,
        monthly_net_profit: direct_monthly_net,
        roi_percent: direct_roi_percent,
        profitability_state,
        break_even,
        recovered_calls_annual: base.recovered_calls_annual * locations,
        time_saved_hours_annual: base.time_saved_hours_annual * locations,
        time_saved_value_annual: base.time_saved_value_annual * locations,
        conversion_lift_factor: base.conversion_lift_factor,
        cost_of_waiting,
        cash_flow,
        warnings,
        extended,
        normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dental_network() -> ExtendedRoiInput {
        ExtendedRoiInput {
            base: RoiInput {
                industry_key: "dental".into(),
                leads_per_month: 200.0,
                deal_value: 400.0,
                missed_rate_pct: 30.0,
                close_rate_pct: 50.0,
                response_time_hours: 2.0,
                monthly_investment: 2000.0,
                ai_recovery_rate: 0.5,
                ..RoiInput::default()
            },
            num_locations: 3,
            tier_key: "core".into(),
            ..ExtendedRoiInput::default()
        }
    }

    #[test]
    fn volume_brackets_sum_per_location_number() {
        assert_eq!(volume_additional_monthly("core", 1, 0.0), 0.0);
        assert_eq!(volume_additional_monthly("core", 0, 0.0), 0.0);
        // 2~4번 지점 1500
        assert_eq!(volume_additional_monthly("core", 4, 0.0), 4500.0);
        // 2~4: 3*1500, 5~6: 2*1200
        assert_eq!(volume_additional_monthly("CORE", 6, 0.0), 6900.0);
        // 2~4, 5~9, 10~24, 25~30
        let expected = 3.0 * 6000.0 + 5.0 * 5200.0 + 15.0 * 4500.0 + 6.0 * 3800.0;
        assert_eq!(volume_additional_monthly("enterprise", 30, 0.0), expected);
    }

    #[test]
    fn unknown_tier_uses_linear_fee() {
        assert_eq!(volume_additional_monthly("bespoke", 4, 700.0), 2100.0);
    }

    #[test]
    fn conversion_lift_by_speed_gap() {
        assert_eq!(economic_conversion_lift(30.0), 1.40);
        assert_eq!(economic_conversion_lift(3.0), 1.25);
        assert_eq!(economic_conversion_lift(0.5), 1.10);
        assert_eq!(economic_conversion_lift(0.01), 1.00);
    }

    #[test]
    fn peak_factor_needs_season_and_months() {
        assert_eq!(peak_annual_factor(8, true, 1.5), 1.0 + (8.0 / 12.0) * 0.5);
        assert_eq!(peak_annual_factor(8, false, 1.5), 1.0);
        assert_eq!(peak_annual_factor(0, true, 1.5), 1.0);
        assert_eq!(peak_annual_factor(8, true, 0.8), 1.0);
    }

    #[test]
    fn network_scaling_and_investment() {
        let r = calculate_roi(&dental_network());
        assert_eq!(r.extended.at_risk_annual_adjusted, 144_000.0 * 3.0);
        assert_eq!(r.extended.base_recovered_annual_extended, 216_000.0);
        // 2.0h → 속도 구간 1 → 2단계 차이
        assert_eq!(r.extended.lifted_recovered_annual, 216_000.0 * 1.25);
        assert_eq!(r.extended.investment.monthly_additional, 3000.0);
        assert_eq!(r.annual_investment, 5000.0 * 12.0);
        assert_eq!(r.revenue_recovered_annual, 216_000.0);
        assert_eq!(r.profitability_state, ProfitabilityState::Profitable);
        // 네트워크 손익분기: 5000 / (30*3) = 55.6 → 56
        assert_eq!(r.break_even.leads_per_month, Some(56.0));
    }

    #[test]
    fn annual_commitment_discounts_recurring_and_waives_setup() {
        let input = ExtendedRoiInput {
            commitment_type: CommitmentType::Annual,
            setup_fee: 2500.0,
            comm_allowance_monthly: 100.0,
            ..dental_network()
        };
        let r = calculate_roi(&input);
        let inv = r.extended.investment;
        assert_eq!(inv.setup_fee, 0.0);
        assert!((inv.annual_recurring - 60_000.0 * 0.85).abs() < 1e-6);
        assert!((inv.effective_investment_year1 - (60_000.0 * 0.85 - 1200.0)).abs() < 1e-6);

        let six = calculate_roi(&ExtendedRoiInput {
            commitment_type: CommitmentType::SixMonth,
            setup_fee: 2500.0,
            ..dental_network()
        });
        assert_eq!(six.extended.investment.setup_fee, 2500.0);
        assert!((six.extended.investment.annual_recurring - 54_000.0).abs() < 1e-6);
    }

    #[test]
    fn add_ons_split_between_direct_and_value_stack() {
        let input = ExtendedRoiInput {
            add_ons: vec![
                AddOn {
                    name: Some("reactivation".into()),
                    annual_cost: 1200.0,
                    monthly_recovery: Some(500.0),
                    conversion_boost: Some(0.5),
                },
                AddOn {
                    annual_cost: 600.0,
                    conversion_boost: Some(0.1),
                    ..AddOn::default()
                },
            ],
            ..dental_network()
        };
        let r = calculate_roi(&input);
        assert_eq!(r.extended.add_ons.direct_add_on_recovery, 6000.0);
        assert!((r.extended.add_ons.total_add_on_value - 21_600.0).abs() < 1e-6);
        assert_eq!(r.extended.add_ons.total_add_on_cost, 1800.0);
        assert_eq!(r.revenue_recovered_annual, 216_000.0 + 6000.0);
        assert_eq!(r.normalized.annual_recovered, r.revenue_recovered_annual);
    }

    #[test]
    fn three_year_horizon_builds_retention_and_totals() {
        let input = ExtendedRoiInput {
            time_horizon: TimeHorizon::ThreeYear,
            retention_improvement: Some(0.5),
            ..dental_network()
        };
        let r = calculate_roi(&input);
        let ltv = r.extended.retention_ltv.expect("retention");
        assert_eq!(ltv.year2, ltv.year1 * 0.5);
        assert_eq!(ltv.total_3_year, ltv.year1 + ltv.year2 + ltv.year3);
        let inv3 = r.extended.investment.investment_3y.expect("3y investment");
        assert_eq!(inv3, 180_000.0);
        assert!(r.extended.totals.net_3y.is_some());
        assert!(r.extended.totals.roi_3y != 0.0);
    }

    #[test]
    fn one_year_horizon_has_no_three_year_figures() {
        let r = calculate_roi(&dental_network());
        assert!(r.extended.retention_ltv.is_none());
        assert!(r.extended.totals.total_value_3y.is_none());
        assert_eq!(r.extended.totals.roi_3y, 0.0);
    }

    #[test]
    fn override_lift_is_floored_at_one() {
        let input = ExtendedRoiInput {
            conversion_lift_factor_override: Some(0.4),
            ..dental_network()
        };
        let r = calculate_roi(&input);
        assert_eq!(r.extended.inputs.conversion_lift_factor, 1.0);
    }

    #[test]
    fn peak_season_scales_network_at_risk() {
        let input = ExtendedRoiInput {
            base: RoiInput {
                industry_key: "hvac".into(),
                ..dental_network().base
            },
            num_locations: 2,
            is_peak_season: true,
            peak_surge_multiplier: Some(1.5),
            ..dental_network()
        };
        let r = calculate_roi(&input);
        let base = calculate_base_roi(&input.base);
        // hvac 성수기 7개월: 1 + 7/12 * 0.5
        let factor = 1.0 + (7.0 / 12.0) * 0.5;
        assert!((r.extended.inputs.peak_annual_factor - factor).abs() < 1e-12);
        let expected = base.revenue_at_risk_annual * 2.0 * factor;
        assert!((r.extended.at_risk_annual_adjusted - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_at_risk_falls_back_to_clamped_raw_rate() {
        let mut input = dental_network();
        input.base.leads_per_month = 0.0;
        input.base.ai_recovery_rate = 0.8;
        assert_eq!(calculate_roi(&input).ai_recovery_rate, 0.8);

        input.base.ai_recovery_rate = 1.7;
        assert_eq!(calculate_roi(&input).ai_recovery_rate, 1.0);
    }

    #[test]
    fn comm_allowance_above_cost_floors_investment() {
        let mut input = dental_network();
        input.base.leads_per_month = 0.0;
        input.comm_allowance_monthly = 10_000.0;
        let r = calculate_roi(&input);
        assert!(r.extended.investment.effective_investment_year1 < 0.0);
        assert_eq!(r.normalized.annual_investment, 0.0);
        assert_eq!(r.normalized.roi_percent, 0.0);
        assert_eq!(r.normalized.profitability_state, ProfitabilityState::Breakeven);
        assert_eq!(r.normalized.break_even.leads_per_month, Some(0.0));
    }

    #[test]
    fn injected_defaults_are_used() {
        let defaults = RoiDefaults {
            baseline_support_hours: 72.0,
            ..RoiDefaults::default()
        };
        let input = ExtendedRoiInput {
            support_hours: Some(24.0),
            ..dental_network()
        };
        let r = calculate_roi_with(&input, &defaults);
        assert_eq!(r.extended.sla.risk_hours_reduced, 48.0);
        assert_eq!(r.extended.sla.annual_sla_value, 48.0 * 350.0);
    }
}
