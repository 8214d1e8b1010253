use serde::Serialize;

use crate::advisory::{
    check_volume_viability, classify_scenario, get_upgrade_paths, pick_tier_for_risk,
    recommend_tier, TierProfile, UpgradePath,
};
use crate::config::{self, Config, OutputFormat};
use crate::roi::{
    calculate_base_roi, calculate_roi_with, ExtendedRoiInput, ExtendedRoiResult,
    ProfitabilityState, RoiInput,
};
use crate::tables::{industry_benchmark, tier_positioning, tier_recovery_benchmarks};
use crate::ui_cli::{self, Cli, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 설정/시나리오 로드 오류
    Config(config::ConfigError),
    /// JSON 출력 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Json(e) => write!(f, "JSON 출력 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// `roi` 명령의 출력 레코드.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub scenario: ProfitabilityState,
    pub upgrade_paths: Vec<UpgradePath>,
    pub result: ExtendedRoiResult,
}

/// 네트워크 ROI와 시나리오 판정, 개선 목표를 한 번에 만든다.
pub fn build_roi_report(input: &ExtendedRoiInput, cfg: &Config) -> RoiReport {
    let result = calculate_roi_with(input, &cfg.defaults);
    RoiReport {
        scenario: classify_scenario(&result),
        upgrade_paths: get_upgrade_paths(&result),
        result,
    }
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T),
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

/// 파싱된 명령을 실행한다.
pub fn run(cli: &Cli, cfg: &Config) -> Result<(), AppError> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        cfg.output_format
    };

    match &cli.command {
        Command::Roi { scenario } => {
            let input: ExtendedRoiInput = config::load_scenario(scenario)?;
            let report = build_roi_report(&input, cfg);
            emit(format, &report, |r| {
                ui_cli::print_roi(&r.result, r.scenario, &r.upgrade_paths)
            })?;
        }
        Command::Base { scenario } => {
            let input: RoiInput = config::load_scenario(scenario)?;
            let result = calculate_base_roi(&input);
            emit(format, &result, ui_cli::print_base)?;
        }
        Command::Viability { scenario } => {
            let input: ExtendedRoiInput = config::load_scenario(scenario)?;
            let result = calculate_roi_with(&input, &cfg.defaults);
            let report = check_volume_viability(&input, Some(&result));
            emit(format, &report, ui_cli::print_viability)?;
        }
        Command::Recommend { profile } => {
            let profile: TierProfile = config::load_scenario(profile)?;
            let rec = recommend_tier(&profile);
            emit(format, &rec, ui_cli::print_recommendation)?;
        }
        Command::RiskTier { amount } => {
            let pick = pick_tier_for_risk(*amount);
            emit(format, &pick, ui_cli::print_tier_pick)?;
        }
        Command::Tier { key } => {
            emit(format, tier_positioning(key), ui_cli::print_positioning)?;
        }
        Command::Benchmarks { industry, tier } => {
            let bench = tier_recovery_benchmarks(industry, tier);
            emit(format, &bench, |b| {
                ui_cli::print_benchmarks(industry, tier, b.as_ref())
            })?;
        }
        Command::Preset {
            industry,
            leads,
            investment,
            rate,
        } => {
            let input = RoiInput::from_industry_preset(industry, *leads, *investment, *rate);
            let result = calculate_base_roi(&input);
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    ui_cli::print_preset(industry, &industry_benchmark(industry));
                    ui_cli::print_base(&result);
                }
            }
        }
    }
    Ok(())
}
