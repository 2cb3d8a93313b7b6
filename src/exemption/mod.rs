//! 순비용(CNA) 기반 면제 판정 계산 모듈 모음.

pub mod cna;
pub mod discounting;

pub use cna::*;
pub use discounting::{compound_factor, discount_factor, present_value_of_constant_stream};
