//! 요금제(티어) 메타데이터, 지점 수 구간 단가, 회수 벤치마크, 위험 금액 구간 테이블.

use serde::{Deserialize, Serialize};

/// 요금제 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Core,
    Growth,
    Scale,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Core, Tier::Growth, Tier::Scale, Tier::Enterprise];

    /// 대소문자를 무시하고 티어 키를 해석한다.
    pub fn from_key(key: &str) -> Option<Tier> {
        let key = key.trim();
        Tier::ALL.into_iter().find(|t| t.as_key().eq_ignore_ascii_case(key))
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Tier::Core => "core",
            Tier::Growth => "growth",
            Tier::Scale => "scale",
            Tier::Enterprise => "enterprise",
        }
    }

    fn index(&self) -> usize {
        match self {
            Tier::Core => 0,
            Tier::Growth => 1,
            Tier::Scale => 2,
            Tier::Enterprise => 3,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// 티어 포지셔닝(기능 모델) 정보.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPositioning {
    pub key: Tier,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
    pub best_for: &'static str,
    pub typical: &'static str,
    /// 해당 티어의 기준 회수율(0~1)
    pub recovery_rate: f64,
    pub upgrade_from: Option<Tier>,
    pub upgrade_triggers: &'static [&'static str],
    pub min_recommended_locations: Option<u32>,
}

/// 추가 지점 단가 구간. `from..=to`번째 지점이 `rate`를 낸다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeBracket {
    pub from: u32,
    /// 상한 없음은 `u32::MAX`
    pub to: u32,
    /// 지점당 월 단가 [USD]
    pub rate: f64,
}

/// 티어+업종별 월 회수액 분포 [USD/월].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryBenchmarks {
    /// 30번째 백분위
    pub underperforming: f64,
    /// 60번째 백분위
    pub typical: f64,
    /// 90번째 백분위
    pub top_performer: f64,
}

/// 월 위험 매출 구간 `[min_risk, max_risk)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskBand {
    pub tier: Tier,
    pub min_risk: f64,
    pub max_risk: f64,
    pub price_label: &'static str,
}

impl RiskBand {
    pub fn contains(&self, risk: f64) -> bool {
        risk >= self.min_risk && risk < self.max_risk
    }
}

/// 티어 키로 포지셔닝을 찾는다. 알 수 없는 키는 core.
pub fn tier_positioning(tier_key: &str) -> &'static TierPositioning {
    let tier = Tier::from_key(tier_key).unwrap_or(Tier::Core);
    positioning_for(tier)
}

pub fn positioning_for(tier: Tier) -> &'static TierPositioning {
    &TIER_POSITIONING[tier.index()]
}

/// 티어의 추가 지점 단가 구간. 알 수 없는 티어는 빈 슬라이스(선형 과금으로 대체).
pub fn volume_brackets(tier_key: &str) -> &'static [VolumeBracket] {
    match Tier::from_key(tier_key) {
        Some(tier) => VOLUME_BRACKETS[tier.index()],
        None => &[],
    }
}

/// 업종+티어 벤치마크. 둘 중 하나라도 모르는 키면 `None`.
pub fn tier_recovery_benchmarks(industry_key: &str, tier_key: &str) -> Option<RecoveryBenchmarks> {
    let tier = Tier::from_key(tier_key)?;
    let industry = industry_key.trim();
    TIER_RECOVERY_BENCHMARKS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(industry))
        .map(|(_, rows)| rows[tier.index()])
}

pub fn risk_bands() -> &'static [RiskBand] {
    RISK_BANDS
}

static TIER_POSITIONING: [TierPositioning; 4] = [
    TierPositioning {
        key: Tier::Core,
        name: "Response AI",
        tagline: "Essential Revenue Recovery",
        description: "AI-powered missed call recovery with SMS follow-up and basic \
                      appointment booking.",
        capabilities: &[
            "24/7 missed call → SMS recovery",
            "Basic appointment booking",
            "Standard follow-up sequences",
            "Call intelligence & transcription",
        ],
        best_for: "Businesses needing reliable lead capture without complexity.",
        typical: "Single-location practices, solo contractors, early-stage teams.",
        recovery_rate: 0.60,
        upgrade_from: None,
        upgrade_triggers: &[],
        min_recommended_locations: None,
    },
    TierPositioning {
        key: Tier::Growth,
        name: "Revenue AI",
        tagline: "Advanced Multi-Channel Automation",
        description: "Deep CRM integration with coordinated SMS, email, and voice campaigns.",
        capabilities: &[
            "Everything in Response AI",
            "CRM integration (ServiceTitan, Salesforce, HubSpot, etc.)",
            "Multi-channel coordination (SMS + email + voice)",
            "Smart routing & lead prioritization",
            "Advanced analytics & reporting",
        ],
        best_for: "Businesses with existing systems that need comprehensive automation.",
        typical: "Growing practices with CRM, established contractors, multi-location businesses.",
        recovery_rate: 0.73,
        upgrade_from: Some(Tier::Core),
        upgrade_triggers: &[
            "You have an existing CRM that should drive automation.",
            "You need SMS + email + voice coordinated, not just SMS.",
            "You require advanced lead routing and prioritization.",
        ],
        min_recommended_locations: None,
    },
    TierPositioning {
        key: Tier::Scale,
        name: "Shockwave OS",
        tagline: "Custom Competitive Moats",
        description: "Unlimited custom workflows tailored to your unique processes and \
                      competitive positioning.",
        capabilities: &[
            "Everything in Revenue AI",
            "Unlimited custom workflow design",
            "Competitive differentiation automation",
            "Tailored client journey mapping",
            "Advanced conditional logic & branching",
            "Custom integrations & APIs",
        ],
        best_for: "Businesses in competitive markets or with complex, unique operational needs.",
        typical: "High-value practices, crowded markets, teams with unique processes.",
        recovery_rate: 0.86,
        upgrade_from: Some(Tier::Growth),
        upgrade_triggers: &[
            "You operate in a highly competitive market (10+ direct competitors).",
            "You have unique processes that generic tools can’t model.",
            "You need white-glove experiences for high-value clients.",
        ],
        min_recommended_locations: None,
    },
    TierPositioning {
        key: Tier::Enterprise,
        name: "Network Intelligence",
        tagline: "Multi-Location Orchestration",
        description: "Centralized routing, load balancing, and cross-location analytics for \
                      unified operations.",
        capabilities: &[
            "Everything in Shockwave OS",
            "Centralized call routing across locations",
            "Intelligent load balancing",
            "Cross-location analytics & dashboards",
            "Enterprise governance & compliance controls",
            "Franchise-level reporting",
            "Multi-brand portfolio support",
        ],
        best_for: "Multi-location businesses requiring unified operations and central control.",
        typical: "Franchises, multi-brand portfolios, regional chains, corporate ops.",
        recovery_rate: 0.92,
        upgrade_from: Some(Tier::Scale),
        upgrade_triggers: &[
            "You have 5+ locations that would benefit from centralized coordination.",
            "You need cross-location routing and intelligent load balancing.",
            "You require enterprise governance, compliance, and unified analytics.",
        ],
        min_recommended_locations: Some(5),
    },
];

const VOLUME_BRACKETS: [&[VolumeBracket]; 4] = [
    &[
        vb(2, 4, 1500.0),
        vb(5, 9, 1200.0),
        vb(10, 24, 1000.0),
        vb(25, u32::MAX, 850.0),
    ],
    &[
        vb(2, 4, 3000.0),
        vb(5, 9, 2500.0),
        vb(10, 24, 2100.0),
        vb(25, u32::MAX, 1800.0),
    ],
    &[
        vb(2, 4, 4500.0),
        vb(5, 9, 3800.0),
        vb(10, 24, 3200.0),
        vb(25, u32::MAX, 2700.0),
    ],
    &[
        vb(2, 4, 6000.0),
        vb(5, 9, 5200.0),
        vb(10, 24, 4500.0),
        vb(25, u32::MAX, 3800.0),
    ],
];

// 순서: core, growth, scale, enterprise
const TIER_RECOVERY_BENCHMARKS: &[(&str, [RecoveryBenchmarks; 4])] = &[
    (
        "dental",
        [
            rb(5500.0, 9000.0, 15000.0),
            rb(7000.0, 12000.0, 20000.0),
            rb(8500.0, 15000.0, 25000.0),
            rb(9500.0, 17000.0, 28000.0),
        ],
    ),
    (
        "hvac",
        [
            rb(8000.0, 15000.0, 35000.0),
            rb(10500.0, 20000.0, 45000.0),
            rb(13000.0, 25000.0, 55000.0),
            rb(15000.0, 28000.0, 60000.0),
        ],
    ),
    (
        "legal",
        [
            rb(12000.0, 25000.0, 50000.0),
            rb(16000.0, 33000.0, 65000.0),
            rb(20000.0, 42000.0, 80000.0),
            rb(23000.0, 48000.0, 90000.0),
        ],
    ),
    (
        "plumbing",
        [
            rb(10000.0, 18000.0, 33000.0),
            rb(13000.0, 24000.0, 43000.0),
            rb(16000.0, 30000.0, 53000.0),
            rb(18500.0, 34000.0, 60000.0),
        ],
    ),
    (
        "medspa",
        [
            rb(8000.0, 13000.0, 24000.0),
            rb(10500.0, 17000.0, 31000.0),
            rb(13000.0, 22000.0, 40000.0),
            rb(15000.0, 25000.0, 45000.0),
        ],
    ),
    (
        "pest",
        [
            rb(6000.0, 10000.0, 20000.0),
            rb(8000.0, 13000.0, 26000.0),
            rb(10000.0, 17000.0, 33000.0),
            rb(11500.0, 19000.0, 38000.0),
        ],
    ),
];

const RISK_BANDS: &[RiskBand] = &[
    RiskBand {
        tier: Tier::Core,
        min_risk: 0.0,
        max_risk: 10_000.0,
        price_label: "$3,000–$4,000/mo",
    },
    RiskBand {
        tier: Tier::Growth,
        min_risk: 10_000.0,
        max_risk: 30_000.0,
        price_label: "$6,000–$7,000/mo",
    },
    RiskBand {
        tier: Tier::Scale,
        min_risk: 30_000.0,
        max_risk: 75_000.0,
        price_label: "$9,000–$12,000/mo",
    },
    RiskBand {
        tier: Tier::Enterprise,
        min_risk: 75_000.0,
        max_risk: f64::INFINITY,
        price_label: "$15,000+/mo",
    },
];

const fn vb(from: u32, to: u32, rate: f64) -> VolumeBracket {
    VolumeBracket { from, to, rate }
}

const fn rb(underperforming: f64, typical: f64, top_performer: f64) -> RecoveryBenchmarks {
    RecoveryBenchmarks {
        underperforming,
        typical,
        top_performer,
    }
}
