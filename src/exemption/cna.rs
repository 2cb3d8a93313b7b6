use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::discounting::{compound_factor, present_value_of_constant_stream};

/// 면제 판정 입력. 한 번의 시뮬레이션마다 함께 주어지며 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// 사이트 이름 (계산에는 쓰이지 않고 보고서로 전달)
    pub site_name: String,
    /// 주차장 면적 [m²] (보고용)
    pub parking_surface_m2: f64,
    /// 차양 구조물 면적 [m²] (보고용)
    pub shade_surface_m2: f64,
    /// 주차장 부지 감정가 [€]
    pub land_value: f64,
    /// 초기 투자비(CAPEX) [€]
    pub initial_cost: f64,
    /// 분석 기간 [년]. 음수는 거부된다.
    pub study_duration_years: i64,
    /// 할인율 [%]
    pub discount_rate_percent: f64,
    /// 면제 기준 비율 [%] (부지 가치 대비)
    pub exemption_threshold_percent: f64,
    /// 연간 유지보수비 [€/년]
    pub annual_maintenance_cost: f64,
    /// 해체/재활용 비용 [€] (기간 말 1회)
    pub decommissioning_cost: f64,
    /// 연간 발전량 [kWh/년]
    pub annual_energy_production_kwh: f64,
    /// kWh 판매/자가소비 단가 [€/kWh]
    pub price_per_kwh: f64,
    /// 보조금 총액 [€] (할인하지 않고 t=0 수입으로 처리)
    pub total_subsidies: f64,
}

/// 면제 판정 결과. 계산 후에는 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    /// 할인 수입 합계 [€] (보조금 포함)
    pub discounted_revenue: f64,
    /// 할인 비용 합계 [€]
    pub discounted_cost: f64,
    /// 순현재비용 CNA [€] = 할인 비용 - 할인 수입
    pub net_present_cost: f64,
    /// 면제 기준 금액 [€]
    pub exemption_threshold_value: f64,
    /// CNA가 기준 금액을 초과하면 true
    pub is_exempt: bool,
    /// 유지보수비 현재가치 [€]
    pub discounted_maintenance: f64,
    /// 해체 비용 현재가치 [€]
    pub discounted_decommissioning: f64,
}

/// 면제 계산 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExemptionError {
    #[error("잘못된 입력 `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

impl SimulationInput {
    /// 계산 전에 입력을 점검한다. NaN/무한대, 음수 기간만 거부한다.
    ///
    /// 음수 금액이나 0 기간, 0 할인율은 정상적인 경계값으로 통과시킨다.
    /// 성공하면 검증된 분석 기간[년]을 돌려준다.
    pub fn validate(&self) -> Result<u32, ExemptionError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ExemptionError::InvalidInput {
                    field,
                    reason: "값이 유한한 실수가 아님",
                });
            }
        }
        if self.study_duration_years < 0 {
            return Err(ExemptionError::InvalidInput {
                field: "study_duration_years",
                reason: "기간은 0 이상이어야 함",
            });
        }
        u32::try_from(self.study_duration_years).map_err(|_| ExemptionError::InvalidInput {
            field: "study_duration_years",
            reason: "기간이 너무 김",
        })
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("parking_surface_m2", self.parking_surface_m2),
            ("shade_surface_m2", self.shade_surface_m2),
            ("land_value", self.land_value),
            ("initial_cost", self.initial_cost),
            ("discount_rate_percent", self.discount_rate_percent),
            ("exemption_threshold_percent", self.exemption_threshold_percent),
            ("annual_maintenance_cost", self.annual_maintenance_cost),
            ("decommissioning_cost", self.decommissioning_cost),
            ("annual_energy_production_kwh", self.annual_energy_production_kwh),
            ("price_per_kwh", self.price_per_kwh),
            ("total_subsidies", self.total_subsidies),
        ]
    }
}

/// 할인 수입/비용, CNA, 면제 기준 금액과 면제 여부를 계산한다.
///
/// 순수 함수이며 같은 입력이면 항상 비트 단위로 같은 결과를 낸다.
pub fn compute(input: &SimulationInput) -> Result<SimulationResult, ExemptionError> {
    let years = input.validate()?;
    let r = input.discount_rate_percent / 100.0;

    let annual_revenue = input.annual_energy_production_kwh * input.price_per_kwh;
    let discounted_revenue =
        present_value_of_constant_stream(annual_revenue, r, years) + input.total_subsidies;

    let discounted_maintenance =
        present_value_of_constant_stream(input.annual_maintenance_cost, r, years);
    let discounted_decommissioning = input.decommissioning_cost / compound_factor(r, years);
    let discounted_cost = input.initial_cost + discounted_maintenance + discounted_decommissioning;

    let net_present_cost = discounted_cost - discounted_revenue;
    let exemption_threshold_value = input.land_value * (input.exemption_threshold_percent / 100.0);
    // 동률은 면제 아님
    let is_exempt = net_present_cost > exemption_threshold_value;

    debug!(
        site = %input.site_name,
        years,
        rate = r,
        discounted_revenue,
        discounted_cost,
        net_present_cost,
        exemption_threshold_value,
        is_exempt,
        "CNA 계산 완료"
    );

    Ok(SimulationResult {
        discounted_revenue,
        discounted_cost,
        net_present_cost,
        exemption_threshold_value,
        is_exempt,
        discounted_maintenance,
        discounted_decommissioning,
    })
}
