//! 계산 결과를 해석해 영업/도입 판단을 돕는 보조 기능.

pub mod recommend;
pub mod scenario;
pub mod viability;

pub use recommend::*;
pub use scenario::*;
pub use viability::*;
