use serde::{Deserialize, Serialize};

use crate::numeric::coerce_non_negative;
use crate::tables::{positioning_for, risk_bands, Tier};

/// 티어 추천에 쓰는 사업 프로필. ROI 계산과 무관한 신호만 담는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierProfile {
    pub num_locations: u32,
    #[serde(rename = "hasExistingCRM")]
    pub has_existing_crm: bool,
    pub is_competitive_market: bool,
    pub needs_custom_workflows: bool,
    /// 월 매출 [USD]
    pub monthly_revenue: f64,
    pub leads_per_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// 추천과 함께 제시하는 하위 대안 또는 상위 전환 조건. 둘 중 하나만 존재한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUp {
    Alternative { tier: Tier, reason: &'static str },
    Upgrade { tier: Tier, when: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRecommendation {
    pub tier: Tier,
    pub reason: &'static str,
    pub confidence: Confidence,
    pub message: String,
    #[serde(flatten)]
    pub follow_up: FollowUp,
}

/// 위험 금액 구간으로 고른 티어.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPick {
    pub id: Tier,
    pub key: Tier,
    pub name: &'static str,
    pub tagline: Option<&'static str>,
    pub description: &'static str,
    pub price_label: &'static str,
}

const HIGH_REVENUE_MONTHLY: f64 = 200_000.0;
const HIGH_LEAD_VOLUME: f64 = 200.0;

/// 사업 프로필만으로 티어를 추천한다.
pub fn recommend_tier(profile: &TierProfile) -> TierRecommendation {
    let num_locations = profile.num_locations.max(1);
    let monthly_revenue = coerce_non_negative(profile.monthly_revenue);
    let leads_per_month = coerce_non_negative(profile.leads_per_month);

    if num_locations >= 5 {
        return TierRecommendation {
            tier: Tier::Enterprise,
            reason: "Multi-location orchestration",
            confidence: Confidence::High,
            message: format!(
                "With {num_locations} locations, Network Intelligence provides centralized \
                 routing, load balancing, and cross-location analytics that standard tiers cannot."
            ),
            follow_up: FollowUp::Alternative {
                tier: Tier::Scale,
                reason: "Shockwave OS works if each location can operate more independently \
                         without network-wide coordination.",
            },
        };
    }

    let high_revenue = monthly_revenue >= HIGH_REVENUE_MONTHLY;
    if profile.needs_custom_workflows || profile.is_competitive_market || high_revenue {
        let mut reasons = Vec::new();
        if profile.is_competitive_market {
            reasons.push("a highly competitive market");
        }
        if profile.needs_custom_workflows {
            reasons.push("custom workflow requirements");
        }
        if high_revenue {
            reasons.push("high monthly revenue that justifies deeper automation");
        }
        return TierRecommendation {
            tier: Tier::Scale,
            reason: "Custom competitive advantage",
            confidence: if reasons.len() >= 2 {
                Confidence::High
            } else {
                Confidence::Medium
            },
            message: format!(
                "Your {} justify unlimited custom workflows that create a durable competitive \
                 moat beyond generic automation.",
                reasons.join(" and ")
            ),
            follow_up: FollowUp::Alternative {
                tier: Tier::Growth,
                reason: "Revenue AI is enough if standard workflows and CRM integration \
                         cover your needs.",
            },
        };
    }

    if profile.has_existing_crm || num_locations >= 3 || leads_per_month >= HIGH_LEAD_VOLUME {
        let mut reasons = Vec::new();
        if profile.has_existing_crm {
            reasons.push("an existing CRM".to_string());
        }
        if num_locations >= 3 {
            reasons.push(format!("{num_locations} locations"));
        }
        if leads_per_month >= HIGH_LEAD_VOLUME {
            reasons.push("higher lead volume".to_string());
        }
        return TierRecommendation {
            tier: Tier::Growth,
            reason: "System integration depth",
            confidence: if profile.has_existing_crm {
                Confidence::High
            } else {
                Confidence::Medium
            },
            message: format!(
                "Your {} justify advanced multi-channel automation with deep CRM integration.",
                reasons.join(" and ")
            ),
            follow_up: FollowUp::Alternative {
                tier: Tier::Core,
                reason: "Response AI is enough if you prefer a simple, standalone \
                         automation layer.",
            },
        };
    }

    TierRecommendation {
        tier: Tier::Core,
        reason: "Essential lead capture",
        confidence: Confidence::High,
        message: "Start on Response AI to reliably capture missed calls and prove AI ROI \
                  without added complexity. Upgrade once you add a CRM or need multi-channel \
                  coordination."
            .to_string(),
        follow_up: FollowUp::Upgrade {
            tier: Tier::Growth,
            when: "Upgrade to Revenue AI when you introduce a CRM or want SMS + email + voice \
                   orchestrated from one brain.",
        },
    }
}

/// 월 위험 매출 금액으로 티어와 가격 표기를 고른다. NaN/무한대는 0으로 본다.
pub fn pick_tier_for_risk(monthly_at_risk: f64) -> TierPick {
    let risk = if monthly_at_risk.is_finite() {
        monthly_at_risk
    } else {
        0.0
    };
    let bands = risk_bands();
    let band = bands
        .iter()
        .find(|b| b.contains(risk))
        .unwrap_or(&bands[0]);
    let positioning = positioning_for(band.tier);
    TierPick {
        id: band.tier,
        key: band.tier,
        name: positioning.name,
        tagline: Some(positioning.tagline).filter(|t| !t.is_empty()),
        description: positioning.description,
        price_label: band.price_label,
    }
}
