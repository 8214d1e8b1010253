//! 업종(버티컬)별 경제 상수 테이블과 조회 함수.
//! 값은 2025년 조사치 기반 참고값이며 등록되지 않은 업종은 `_default` 항목으로 대체한다.

use serde::Serialize;

/// 업종별 가치 스택 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalEconomics {
    /// 워크플로 1개당 월 절감액 [USD/월]
    pub workflow_savings_per_workflow_monthly: f64,
    /// 기본 2개를 넘는 채널 1개당 회수 매출 증가 비율
    pub channel_boost_per_channel: f64,
    /// 다운타임 1시간당 위험 비용 [USD/h]
    pub downtime_risk_per_hour: f64,
}

/// 업종 하나에 대한 모든 보정 상수.
#[derive(Debug)]
pub struct VerticalProfile {
    pub key: &'static str,
    pub economics: VerticalEconomics,
    /// AI 회수율 보정 계수
    pub recovery_adjustment: f64,
    /// 지점당 최소 유효 리드 수 [건/월]
    pub min_viable_leads: f64,
    /// 성수기 개월 수
    pub peak_months: u32,
}

/// 업종별 대표 시나리오 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmark {
    pub deal_value: f64,
    pub close_rate_pct: f64,
    pub missed_rate_pct: f64,
    pub response_time_hours: f64,
}

/// 업종 키로 프로필을 찾는다. 대소문자를 구분하지 않으며 없으면 `_default`.
pub fn vertical_profile(industry_key: &str) -> &'static VerticalProfile {
    let key = industry_key.trim();
    VERTICALS
        .iter()
        .find(|v| v.key.eq_ignore_ascii_case(key))
        .unwrap_or(&DEFAULT_VERTICAL)
}

pub fn vertical_defaults(industry_key: &str) -> VerticalEconomics {
    vertical_profile(industry_key).economics
}

pub fn vertical_recovery_adjustment(industry_key: &str) -> f64 {
    vertical_profile(industry_key).recovery_adjustment
}

pub fn min_viable_leads(industry_key: &str) -> f64 {
    vertical_profile(industry_key).min_viable_leads
}

pub fn peak_months(industry_key: &str) -> u32 {
    vertical_profile(industry_key).peak_months
}

/// 업종 대표 시나리오. 없는 업종은 `other` 프리셋을 돌려준다.
pub fn industry_benchmark(industry_key: &str) -> IndustryBenchmark {
    let key = industry_key.trim();
    INDUSTRY_BENCHMARKS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, b)| *b)
        .unwrap_or(OTHER_BENCHMARK)
}

static DEFAULT_VERTICAL: VerticalProfile = VerticalProfile {
    key: "_default",
    economics: econ(400.0, 0.10, 350.0),
    recovery_adjustment: 1.00,
    min_viable_leads: 150.0,
    peak_months: 0,
};

const VERTICALS: &[VerticalProfile] = &[
    VerticalProfile {
        key: "dental",
        // 워크플로당 연 ~$4,257
        economics: econ(355.0, 0.0625, 350.0),
        recovery_adjustment: 1.00,
        min_viable_leads: 140.0,
        // 1월, 8~9월
        peak_months: 3,
    },
    VerticalProfile {
        key: "legal",
        economics: econ(661.0, 0.1875, 650.0),
        recovery_adjustment: 0.74,
        min_viable_leads: 30.0,
        peak_months: 0,
    },
    VerticalProfile {
        key: "hvac",
        economics: econ(564.0, 0.10, 400.0),
        recovery_adjustment: 0.91,
        min_viable_leads: 95.0,
        // 5~9월, 11~2월
        peak_months: 7,
    },
    VerticalProfile {
        key: "plumbing",
        economics: econ(389.0, 0.1125, 350.0),
        recovery_adjustment: 0.97,
        min_viable_leads: 65.0,
        peak_months: 3,
    },
    VerticalProfile {
        key: "medspa",
        economics: econ(319.0, 0.10, 350.0),
        recovery_adjustment: 0.98,
        min_viable_leads: 175.0,
        peak_months: 6,
    },
    VerticalProfile {
        key: "pest",
        economics: econ(352.0, 0.125, 500.0),
        recovery_adjustment: 0.97,
        min_viable_leads: 200.0,
        // 3~10월
        peak_months: 8,
    },
];

const OTHER_BENCHMARK: IndustryBenchmark = bench(500.0, 30.0, 30.0, 4.0);

const INDUSTRY_BENCHMARKS: &[(&str, IndustryBenchmark)] = &[
    ("dental", bench(400.0, 33.0, 34.0, 4.5)),
    ("hvac", bench(1200.0, 28.0, 43.0, 8.2)),
    ("legal", bench(12000.0, 12.0, 45.0, 4.5)),
    ("plumbing", bench(600.0, 35.0, 42.0, 1.5)),
    ("medspa", bench(550.0, 35.0, 30.0, 3.5)),
    ("pest", bench(200.0, 35.0, 38.0, 5.0)),
    ("other", OTHER_BENCHMARK),
];

const fn econ(workflow: f64, channel: f64, downtime: f64) -> VerticalEconomics {
    VerticalEconomics {
        workflow_savings_per_workflow_monthly: workflow,
        channel_boost_per_channel: channel,
        downtime_risk_per_hour: downtime,
    }
}

const fn bench(deal: f64, close: f64, missed: f64, response: f64) -> IndustryBenchmark {
    IndustryBenchmark {
        deal_value: deal,
        close_rate_pct: close,
        missed_rate_pct: missed,
        response_time_hours: response,
    }
}
