//! 누락 리드 회수 매출과 AI 응대 투자 대비 수익(ROI)을 계산하는 엔진.
//! 계산 로직은 라이브러리로 두고 CLI는 얇은 껍데기로 유지한다.

pub mod advisory;
pub mod app;
pub mod config;
pub mod numeric;
pub mod roi;
pub mod tables;
pub mod ui_cli;
