use serde::Serialize;

use crate::numeric::round_half_up;
use crate::roi::{ProfitabilityState, RoiOutcome};

/// 손익분기 달성을 위해 조정할 수 있는 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpgradeKind {
    #[serde(rename = "leads")]
    Leads,
    #[serde(rename = "dealValue")]
    DealValue,
    #[serde(rename = "closeRate")]
    CloseRate,
}

/// 개별적으로 실행 가능한 개선 목표 하나.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradePath {
    #[serde(rename = "type")]
    pub kind: UpgradeKind,
    pub target: f64,
    pub unit: &'static str,
}

/// 정규화 블록의 판정을 우선하고 없으면 기본 결과의 판정을 쓴다.
pub fn classify_scenario<R: RoiOutcome + ?Sized>(result: &R) -> ProfitabilityState {
    result
        .normalized()
        .map(|n| n.profitability_state)
        .unwrap_or_else(|| result.profitability_state())
}

/// 이미 수익 구간이면 빈 목록, 아니면 값이 있는 손익분기 항목마다 목표를 제시한다.
pub fn get_upgrade_paths<R: RoiOutcome + ?Sized>(result: &R) -> Vec<UpgradePath> {
    if classify_scenario(result) == ProfitabilityState::Profitable {
        return Vec::new();
    }
    let be = result.break_even();
    let mut paths = Vec::new();
    if let Some(leads) = be.leads_per_month {
        paths.push(UpgradePath {
            kind: UpgradeKind::Leads,
            target: leads,
            unit: "leads/month",
        });
    }
    if let Some(deal) = be.deal_value {
        paths.push(UpgradePath {
            kind: UpgradeKind::DealValue,
            target: round_half_up(deal),
            unit: "USD/lead",
        });
    }
    if let Some(close) = be.close_rate_pct {
        paths.push(UpgradePath {
            kind: UpgradeKind::CloseRate,
            target: round_half_up(close),
            unit: "%",
        });
    }
    paths
}
