//! 회수 매출/투자 대비 수익(ROI) 계산 모듈 모음.
//! 단일 지점 기본 계산과 다지점·약정·가치 스택을 얹은 네트워크 계산으로 구성한다.

pub mod base;
pub mod defaults;
pub mod extended;
pub mod outcome;

pub use base::*;
pub use defaults::RoiDefaults;
pub use extended::*;
pub use outcome::*;
