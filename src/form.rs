//! 입력 폼 수집 계층. 필드 목록, 기본값, 슬라이더 범위와 "검증 완료" 체크를 관리하고
//! 모든 값이 확인된 경우에만 계산 입력을 만들어 준다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exemption::SimulationInput;
use crate::i18n::keys;

/// 폼에서 입력받는 수치 필드. 화면/보고서 표시 순서와 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    ParkingSurface,
    ShadeSurface,
    LandValue,
    InitialCost,
    StudyDuration,
    DiscountRate,
    ExemptionThreshold,
    AnnualMaintenance,
    Decommissioning,
    AnnualProduction,
    PricePerKwh,
    TotalSubsidies,
}

/// 입력 위젯 종류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// 자유 입력 숫자
    Number,
    /// 범위가 정해진 슬라이더
    Slider { min: f64, max: f64, step: f64 },
}

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::ParkingSurface,
        FieldId::ShadeSurface,
        FieldId::LandValue,
        FieldId::InitialCost,
        FieldId::StudyDuration,
        FieldId::DiscountRate,
        FieldId::ExemptionThreshold,
        FieldId::AnnualMaintenance,
        FieldId::Decommissioning,
        FieldId::AnnualProduction,
        FieldId::PricePerKwh,
        FieldId::TotalSubsidies,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::StudyDuration => FieldKind::Slider {
                min: 0.0,
                max: 30.0,
                step: 1.0,
            },
            FieldId::DiscountRate => FieldKind::Slider {
                min: 0.0,
                max: 10.0,
                step: 0.1,
            },
            FieldId::ExemptionThreshold => FieldKind::Slider {
                min: 0.0,
                max: 30.0,
                step: 0.1,
            },
            _ => FieldKind::Number,
        }
    }

    /// 폼 라벨 번역 키.
    pub fn label_key(self) -> &'static str {
        match self {
            FieldId::ParkingSurface => keys::FIELD_PARKING_SURFACE,
            FieldId::ShadeSurface => keys::FIELD_SHADE_SURFACE,
            FieldId::LandValue => keys::FIELD_LAND_VALUE,
            FieldId::InitialCost => keys::FIELD_INITIAL_COST,
            FieldId::StudyDuration => keys::FIELD_DURATION,
            FieldId::DiscountRate => keys::FIELD_DISCOUNT_RATE,
            FieldId::ExemptionThreshold => keys::FIELD_THRESHOLD,
            FieldId::AnnualMaintenance => keys::FIELD_MAINTENANCE,
            FieldId::Decommissioning => keys::FIELD_DECOMMISSIONING,
            FieldId::AnnualProduction => keys::FIELD_PRODUCTION,
            FieldId::PricePerKwh => keys::FIELD_PRICE,
            FieldId::TotalSubsidies => keys::FIELD_SUBSIDIES,
        }
    }

    /// 보고서용 짧은 라벨 번역 키.
    pub fn report_label_key(self) -> &'static str {
        match self {
            FieldId::ParkingSurface => keys::REPORT_FIELD_PARKING_SURFACE,
            FieldId::ShadeSurface => keys::REPORT_FIELD_SHADE_SURFACE,
            FieldId::LandValue => keys::REPORT_FIELD_LAND_VALUE,
            FieldId::InitialCost => keys::REPORT_FIELD_INITIAL_COST,
            FieldId::StudyDuration => keys::REPORT_FIELD_DURATION,
            FieldId::DiscountRate => keys::REPORT_FIELD_DISCOUNT_RATE,
            FieldId::ExemptionThreshold => keys::REPORT_FIELD_THRESHOLD,
            FieldId::AnnualMaintenance => keys::REPORT_FIELD_MAINTENANCE,
            FieldId::Decommissioning => keys::REPORT_FIELD_DECOMMISSIONING,
            FieldId::AnnualProduction => keys::REPORT_FIELD_PRODUCTION,
            FieldId::PricePerKwh => keys::REPORT_FIELD_PRICE,
            FieldId::TotalSubsidies => keys::REPORT_FIELD_SUBSIDIES,
        }
    }

    /// 슬라이더 아래에 표시할 안내 문구 키.
    pub fn hint_key(self) -> Option<&'static str> {
        match self {
            FieldId::StudyDuration => Some(keys::HINT_DURATION),
            FieldId::DiscountRate => Some(keys::HINT_DISCOUNT_RATE),
            FieldId::ExemptionThreshold => Some(keys::HINT_THRESHOLD),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// 입력 구조체에서 해당 필드 값을 꺼낸다.
    pub fn value_of(self, input: &SimulationInput) -> f64 {
        match self {
            FieldId::ParkingSurface => input.parking_surface_m2,
            FieldId::ShadeSurface => input.shade_surface_m2,
            FieldId::LandValue => input.land_value,
            FieldId::InitialCost => input.initial_cost,
            FieldId::StudyDuration => input.study_duration_years as f64,
            FieldId::DiscountRate => input.discount_rate_percent,
            FieldId::ExemptionThreshold => input.exemption_threshold_percent,
            FieldId::AnnualMaintenance => input.annual_maintenance_cost,
            FieldId::Decommissioning => input.decommissioning_cost,
            FieldId::AnnualProduction => input.annual_energy_production_kwh,
            FieldId::PricePerKwh => input.price_per_kwh,
            FieldId::TotalSubsidies => input.total_subsidies,
        }
    }
}

/// 폼 기본값. config.toml의 `[defaults]` 테이블로 덮어쓸 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub parking_surface_m2: f64,
    pub shade_surface_m2: f64,
    pub land_value: f64,
    pub initial_cost: f64,
    pub study_duration_years: i64,
    pub discount_rate_percent: f64,
    pub exemption_threshold_percent: f64,
    pub annual_maintenance_cost: f64,
    pub decommissioning_cost: f64,
    pub annual_energy_production_kwh: f64,
    pub price_per_kwh: f64,
    pub total_subsidies: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            parking_surface_m2: 3000.0,
            shade_surface_m2: 2000.0,
            land_value: 300_000.0,
            initial_cost: 420_000.0,
            study_duration_years: 20,
            discount_rate_percent: 5.0,
            exemption_threshold_percent: 10.0,
            annual_maintenance_cost: 3000.0,
            decommissioning_cost: 20_000.0,
            annual_energy_production_kwh: 180_000.0,
            price_per_kwh: 0.08,
            total_subsidies: 0.0,
        }
    }
}

impl FormDefaults {
    fn values(&self) -> [f64; 12] {
        [
            self.parking_surface_m2,
            self.shade_surface_m2,
            self.land_value,
            self.initial_cost,
            self.study_duration_years as f64,
            self.discount_rate_percent,
            self.exemption_threshold_percent,
            self.annual_maintenance_cost,
            self.decommissioning_cost,
            self.annual_energy_production_kwh,
            self.price_per_kwh,
            self.total_subsidies,
        ]
    }
}

/// 계산 실행 전 폼 검사 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("사이트 이름이 비어 있음")]
    MissingSiteName,
    #[error("검증되지 않은 필드 {} 개", .0.len())]
    Unverified(Vec<FieldId>),
}

/// 폼 상태: 사이트 이름, 필드 값, 필드별 검증 체크.
#[derive(Debug, Clone)]
pub struct FormState {
    pub site_name: String,
    values: [f64; 12],
    verified: [bool; 12],
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_defaults(&FormDefaults::default())
    }
}

impl FormState {
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        let mut state = Self {
            site_name: String::new(),
            values: [0.0; 12],
            verified: [false; 12],
        };
        for (field, value) in FieldId::ALL.into_iter().zip(defaults.values()) {
            state.set_value(field, value);
        }
        state
    }

    pub fn value(&self, field: FieldId) -> f64 {
        self.values[field.index()]
    }

    /// GUI 위젯이 직접 바인딩할 수 있도록 가변 참조를 준다.
    pub fn value_mut(&mut self, field: FieldId) -> &mut f64 {
        &mut self.values[field.index()]
    }

    /// 값을 설정한다. 슬라이더 필드는 범위로 잘라낸 값을 저장하고 그 값을 돌려준다.
    pub fn set_value(&mut self, field: FieldId, value: f64) -> f64 {
        let stored = clamp_to_kind(field.kind(), value);
        self.values[field.index()] = stored;
        stored
    }

    pub fn is_verified(&self, field: FieldId) -> bool {
        self.verified[field.index()]
    }

    pub fn verified_mut(&mut self, field: FieldId) -> &mut bool {
        &mut self.verified[field.index()]
    }

    pub fn set_verified(&mut self, field: FieldId, verified: bool) {
        self.verified[field.index()] = verified;
    }

    pub fn all_verified(&self) -> bool {
        self.verified.iter().all(|v| *v)
    }

    pub fn unverified_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|f| !self.is_verified(*f))
            .collect()
    }

    /// 사이트 이름과 검증 체크를 확인한 뒤 계산 입력을 만든다.
    pub fn build_input(&self) -> Result<SimulationInput, FormError> {
        let site_name = self.site_name.trim();
        if site_name.is_empty() {
            return Err(FormError::MissingSiteName);
        }
        let unverified = self.unverified_fields();
        if !unverified.is_empty() {
            return Err(FormError::Unverified(unverified));
        }
        let v = |f: FieldId| clamp_to_kind(f.kind(), self.value(f));
        Ok(SimulationInput {
            site_name: site_name.to_string(),
            parking_surface_m2: v(FieldId::ParkingSurface),
            shade_surface_m2: v(FieldId::ShadeSurface),
            land_value: v(FieldId::LandValue),
            initial_cost: v(FieldId::InitialCost),
            study_duration_years: v(FieldId::StudyDuration).round() as i64,
            discount_rate_percent: v(FieldId::DiscountRate),
            exemption_threshold_percent: v(FieldId::ExemptionThreshold),
            annual_maintenance_cost: v(FieldId::AnnualMaintenance),
            decommissioning_cost: v(FieldId::Decommissioning),
            annual_energy_production_kwh: v(FieldId::AnnualProduction),
            price_per_kwh: v(FieldId::PricePerKwh),
            total_subsidies: v(FieldId::TotalSubsidies),
        })
    }
}

fn clamp_to_kind(kind: FieldKind, value: f64) -> f64 {
    match kind {
        FieldKind::Number => value,
        FieldKind::Slider { min, .. } if value.is_nan() => min,
        FieldKind::Slider { min, max, .. } => value.clamp(min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verified_form(site: &str) -> FormState {
        let mut form = FormState::default();
        form.site_name = site.to_string();
        for f in FieldId::ALL {
            form.set_verified(f, true);
        }
        form
    }

    #[test]
    fn defaults_match_reference_project() {
        let form = FormState::default();
        assert_eq!(form.value(FieldId::InitialCost), 420_000.0);
        assert_eq!(form.value(FieldId::StudyDuration), 20.0);
        assert_eq!(form.value(FieldId::PricePerKwh), 0.08);
        assert!(!form.all_verified());
    }

    #[test]
    fn site_name_is_checked_before_flags() {
        let form = FormState::default();
        assert_eq!(form.build_input(), Err(FormError::MissingSiteName));

        let mut form = FormState::default();
        form.site_name = "   ".into();
        assert_eq!(form.build_input(), Err(FormError::MissingSiteName));
    }

    #[test]
    fn unverified_fields_block_input() {
        let mut form = verified_form("Parking Nord");
        form.set_verified(FieldId::DiscountRate, false);
        form.set_verified(FieldId::TotalSubsidies, false);
        assert_eq!(
            form.build_input(),
            Err(FormError::Unverified(vec![
                FieldId::DiscountRate,
                FieldId::TotalSubsidies
            ]))
        );
    }

    #[test]
    fn verified_form_builds_trimmed_input() {
        let form = verified_form("  Parking Nord ");
        let input = form.build_input().expect("input");
        assert_eq!(input.site_name, "Parking Nord");
        assert_eq!(input.study_duration_years, 20);
        assert_eq!(input.land_value, 300_000.0);
    }

    #[test]
    fn sliders_are_clamped() {
        let mut form = FormState::default();
        assert_eq!(form.set_value(FieldId::StudyDuration, 45.0), 30.0);
        assert_eq!(form.set_value(FieldId::DiscountRate, -2.0), 0.0);
        assert_eq!(form.set_value(FieldId::LandValue, -5.0), -5.0);
    }
}
