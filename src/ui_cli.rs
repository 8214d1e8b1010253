use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::advisory::{
    FollowUp, TierPick, TierRecommendation, UpgradePath, ViabilityReport, ViabilitySeverity,
};
use crate::config::DEFAULT_CONFIG_PATH;
use crate::roi::{BaseRoiResult, BreakEven, ExtendedRoiResult, ProfitabilityState};
use crate::tables::{IndustryBenchmark, RecoveryBenchmarks, TierPositioning};

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "revenue_roi_engine", version, about = "누락 리드 회수 ROI 계산기")]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// 설정과 무관하게 JSON으로 출력
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 다지점/약정 조건을 포함한 네트워크 ROI
    Roi { scenario: PathBuf },
    /// 지점 1곳 기준 ROI
    Base { scenario: PathBuf },
    /// 리드 물량 적정성 평가
    Viability { scenario: PathBuf },
    /// 사업 프로필로 티어 추천
    Recommend { profile: PathBuf },
    /// 월 위험 매출 금액으로 티어 선택
    #[command(name = "risk-tier")]
    RiskTier {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// 티어 소개
    Tier { key: String },
    /// 업종·티어별 회수율 벤치마크
    Benchmarks { industry: String, tier: String },
    /// 업종 대표값으로 기본 ROI 계산
    Preset {
        industry: String,
        #[arg(long, default_value_t = 100.0)]
        leads: f64,
        #[arg(long, default_value_t = 1997.0)]
        investment: f64,
        #[arg(long, default_value_t = 0.6)]
        rate: f64,
    },
}

fn usd(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

fn state_label(state: ProfitabilityState) -> &'static str {
    match state {
        ProfitabilityState::Profitable => "수익",
        ProfitabilityState::Breakeven => "손익분기",
        ProfitabilityState::Unprofitable => "손실",
    }
}

fn print_break_even(be: &BreakEven) {
    let show = |v: Option<f64>, unit: &str| match v {
        Some(v) => format!("{v:.1} {unit}"),
        None => "-".to_string(),
    };
    println!("손익분기 리드 수: {}", show(be.leads_per_month, "건/월"));
    println!("손익분기 거래 금액: {}", show(be.deal_value, "USD"));
    println!("손익분기 성약률: {}", show(be.close_rate_pct, "%"));
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        println!("경고: {w}");
    }
}

pub fn print_base(result: &BaseRoiResult) {
    println!("\n-- 기본 ROI ({}) --", result.industry_key);
    println!("실효 회수율: {:.3}", result.ai_recovery_rate);
    println!("월 누락 리드: {:.1}", result.monthly_missed_leads);
    println!("연간 위험 매출: {}", usd(result.revenue_at_risk_annual));
    println!("연간 회수 매출: {}", usd(result.revenue_recovered_annual));
    println!("연간 투자: {}", usd(result.annual_investment));
    println!("연간 순이익: {}", usd(result.annual_net_profit));
    println!(
        "ROI: {:.1}% ({})",
        result.roi_percent,
        state_label(result.profitability_state)
    );
    print_break_even(&result.break_even);
    println!(
        "도입 지연 비용: 1개월 {} / 6개월 {} / 12개월 {}",
        usd(result.cost_of_waiting.per_month),
        usd(result.cost_of_waiting.six_months),
        usd(result.cost_of_waiting.twelve_months)
    );
    println!("절감 시간: {:.1} h/년", result.time_saved_hours_annual);
    print_warnings(&result.warnings);
}

pub fn print_roi(result: &ExtendedRoiResult, state: ProfitabilityState, paths: &[UpgradePath]) {
    let n = &result.normalized;
    let stack = &result.extended;
    println!("\n-- 네트워크 ROI ({}) --", result.industry_key);
    println!(
        "지점 수: {}, 약정: {:?}, 성수기 계수: {:.3}",
        stack.inputs.num_locations, stack.inputs.commitment_type, stack.inputs.peak_annual_factor
    );
    println!("실효 회수율: {:.3}", result.ai_recovery_rate);
    println!("연간 회수 매출: {}", usd(n.annual_recovered));
    println!("연간 투자(실효): {}", usd(n.annual_investment));
    println!("연간 순이익: {}", usd(n.annual_net_profit));
    println!("ROI: {:.1}% ({})", n.roi_percent, state_label(state));
    print_break_even(&n.break_even);

    println!("가치 스택:");
    println!("  전환 배수: {:.2}", stack.inputs.conversion_lift_factor);
    println!("  회수 매출(전환 반영): {}", usd(stack.lifted_recovered_annual));
    println!("  워크플로 절감: {}", usd(stack.workflow.annual_savings));
    println!("  채널 확장: {}", usd(stack.channel.channel_boost_value));
    println!("  SLA 가치: {}", usd(stack.sla.annual_sla_value));
    println!("  부가 상품: {}", usd(stack.add_ons.total_add_on_value));
    println!(
        "  1년 총가치 {} / 순가치 {} / ROI {:.1}%",
        usd(stack.totals.total_value_1y),
        usd(stack.totals.net_1y),
        stack.totals.roi_1y
    );
    if let (Some(total), Some(net)) = (stack.totals.total_value_3y, stack.totals.net_3y) {
        println!(
            "  3년 총가치 {} / 순가치 {} / ROI {:.1}%",
            usd(total),
            usd(net),
            stack.totals.roi_3y
        );
    }
    for p in paths {
        println!("개선 목표: {:?} → {:.0} {}", p.kind, p.target, p.unit);
    }
    print_warnings(&result.warnings);
}

pub fn print_viability(report: &ViabilityReport) {
    let label = match report.severity {
        ViabilitySeverity::Critical => "위험",
        ViabilitySeverity::Warning => "주의",
        ViabilitySeverity::Ok => "양호",
    };
    println!("\n-- 물량 적정성 ({} / {}) --", report.industry_key, report.tier_key);
    println!("판정: {label}");
    println!("현재 리드: {:.0} 건/월", report.current_leads);
    println!("최소 유효: {:.0}", report.min_viable_leads);
    println!("손익분기: {:.0}", report.breakeven_leads);
    println!("최적: {:.0}", report.optimal_leads);
    if report.volume_gap_percent > 0.0 {
        println!("부족분: {:.0}%", report.volume_gap_percent);
    }
}

pub fn print_recommendation(rec: &TierRecommendation) {
    println!("\n-- 티어 추천 --");
    println!("추천: {} ({:?})", rec.tier, rec.confidence);
    println!("근거: {}", rec.reason);
    println!("{}", rec.message);
    match &rec.follow_up {
        FollowUp::Alternative { tier, reason } => println!("대안: {tier} - {reason}"),
        FollowUp::Upgrade { tier, when } => println!("전환: {tier} - {when}"),
    }
}

pub fn print_tier_pick(pick: &TierPick) {
    println!("{} ({}) {}", pick.name, pick.key, pick.price_label);
    if let Some(tagline) = pick.tagline {
        println!("{tagline}");
    }
    println!("{}", pick.description);
}

pub fn print_positioning(p: &TierPositioning) {
    println!("\n-- {} ({}) --", p.name, p.key);
    println!("{}", p.tagline);
    println!("{}", p.description);
    for c in p.capabilities {
        println!("  - {c}");
    }
    println!("적합 대상: {}", p.best_for);
    println!("일반 규모: {}", p.typical);
    println!("기준 회수율: {:.0}%", p.recovery_rate * 100.0);
    if let Some(min) = p.min_recommended_locations {
        println!("권장 최소 지점 수: {min}");
    }
}

pub fn print_benchmarks(industry: &str, tier: &str, b: Option<&RecoveryBenchmarks>) {
    match b {
        Some(b) => println!(
            "{industry}/{tier} 월 회수액: 하위 {} / 평균 {} / 상위 {}",
            usd(b.underperforming),
            usd(b.typical),
            usd(b.top_performer)
        ),
        None => println!("{industry}/{tier}: 벤치마크 데이터 없음"),
    }
}

pub fn print_preset(industry: &str, preset: &IndustryBenchmark) {
    println!("\n-- 업종 대표값 ({industry}) --");
    println!("거래 금액: {}", usd(preset.deal_value));
    println!("성약률: {:.0}%", preset.close_rate_pct);
    println!("누락률: {:.0}%", preset.missed_rate_pct);
    println!("응답 시간: {:.1} h", preset.response_time_hours);
}
