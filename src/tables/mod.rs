//! 계산기가 참조하는 읽기 전용 상수 테이블 모음.

pub mod tiers;
pub mod verticals;

pub use tiers::*;
pub use verticals::*;
