//! CNA 계산 회귀 테스트. 기준 프로젝트(20년, 5%)와 경계값 동작을 확인한다.
use pv_canopy_exemption::exemption::{compute, ExemptionError, SimulationInput};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_input() -> SimulationInput {
    SimulationInput {
        site_name: "Parking de la gare".to_string(),
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

#[test]
fn reference_project_is_exempt() {
    let res = compute(&reference_input()).expect("compute");
    assert_close("revenue", res.discounted_revenue, 179_455.828_932_575_7, 1e-9);
    assert_close("maintenance", res.discounted_maintenance, 37_386.631_027_619_94, 1e-9);
    assert_close("decommissioning", res.discounted_decommissioning, 7_537.789_657_460_008, 1e-9);
    assert_close("cost", res.discounted_cost, 464_924.420_685_079_9, 1e-9);
    assert_close("cna", res.net_present_cost, 285_468.591_752_504_2, 1e-9);
    assert_eq!(res.exemption_threshold_value, 30_000.0);
    assert!(res.is_exempt);
}

#[test]
fn reference_project_matches_published_figures_loosely() {
    // 공개된 예시 값은 반올림 차이가 있어 0.1% 이내만 확인한다.
    let res = compute(&reference_input()).expect("compute");
    assert_close("revenue", res.discounted_revenue, 179_472.68, 1e-3);
    assert_close("cost", res.discounted_cost, 464_927.10, 1e-3);
    assert_close("cna", res.net_present_cost, 285_454.42, 1e-3);
}

#[test]
fn zero_duration_keeps_only_undiscounted_terms() {
    for rate in [0.0, 5.0, 37.5] {
        let input = SimulationInput {
            study_duration_years: 0,
            discount_rate_percent: rate,
            total_subsidies: 12_500.0,
            ..reference_input()
        };
        let res = compute(&input).expect("compute");
        assert_eq!(res.discounted_revenue, 12_500.0);
        assert_eq!(res.discounted_maintenance, 0.0);
        assert_eq!(res.discounted_cost, 420_000.0 + 20_000.0);
    }
}

#[test]
fn zero_rate_degenerates_to_plain_sums() {
    let input = SimulationInput {
        discount_rate_percent: 0.0,
        study_duration_years: 12,
        total_subsidies: 5_000.0,
        ..reference_input()
    };
    let res = compute(&input).expect("compute");
    assert_close("revenue", res.discounted_revenue, 5_000.0 + 12.0 * 14_400.0, 1e-12);
    assert_close("maintenance", res.discounted_maintenance, 12.0 * 3_000.0, 1e-12);
    assert_close("decommissioning", res.discounted_decommissioning, 20_000.0, 1e-12);
}

#[test]
fn higher_rate_lowers_discounted_streams() {
    let mut previous = compute(&SimulationInput {
        discount_rate_percent: 0.0,
        ..reference_input()
    })
    .expect("compute");
    for rate in [1.0, 2.5, 4.0, 6.0, 10.0] {
        let res = compute(&SimulationInput {
            discount_rate_percent: rate,
            ..reference_input()
        })
        .expect("compute");
        assert!(res.discounted_revenue < previous.discounted_revenue, "rate {rate}");
        assert!(res.discounted_maintenance < previous.discounted_maintenance, "rate {rate}");
        assert!(
            res.discounted_decommissioning < previous.discounted_decommissioning,
            "rate {rate}"
        );
        assert!(res.discounted_cost < previous.discounted_cost, "rate {rate}");
        previous = res;
    }
}

#[test]
fn tie_with_threshold_is_not_exempt() {
    // 기간 0, 수입 0: CNA = 초기비 + 해체비 = 30,000 = 기준 금액
    let input = SimulationInput {
        study_duration_years: 0,
        initial_cost: 25_000.0,
        decommissioning_cost: 5_000.0,
        total_subsidies: 0.0,
        land_value: 300_000.0,
        exemption_threshold_percent: 10.0,
        ..reference_input()
    };
    let res = compute(&input).expect("compute");
    assert_eq!(res.net_present_cost, res.exemption_threshold_value);
    assert!(!res.is_exempt);

    let above = compute(&SimulationInput {
        initial_cost: 25_000.01,
        ..input
    })
    .expect("compute");
    assert!(above.is_exempt);
}

#[test]
fn profitable_project_has_negative_cna() {
    let input = SimulationInput {
        price_per_kwh: 0.25,
        total_subsidies: 100_000.0,
        ..reference_input()
    };
    let res = compute(&input).expect("compute");
    assert!(res.net_present_cost < 0.0);
    assert!(!res.is_exempt);
}

#[test]
fn identical_input_gives_bit_identical_output() {
    let input = reference_input();
    let a = compute(&input).expect("compute");
    let b = compute(&input).expect("compute");
    assert_eq!(a.discounted_revenue.to_bits(), b.discounted_revenue.to_bits());
    assert_eq!(a.discounted_cost.to_bits(), b.discounted_cost.to_bits());
    assert_eq!(a.net_present_cost.to_bits(), b.net_present_cost.to_bits());
    assert_eq!(a, b);
}

#[test]
fn negative_money_is_accepted() {
    let input = SimulationInput {
        annual_maintenance_cost: -100.0,
        land_value: -1.0,
        ..reference_input()
    };
    assert!(compute(&input).is_ok());
}

#[test]
fn negative_duration_is_rejected() {
    let input = SimulationInput {
        study_duration_years: -1,
        ..reference_input()
    };
    assert!(matches!(
        compute(&input),
        Err(ExemptionError::InvalidInput {
            field: "study_duration_years",
            ..
        })
    ));
}

#[test]
fn non_finite_values_are_rejected() {
    let nan = SimulationInput {
        price_per_kwh: f64::NAN,
        ..reference_input()
    };
    assert!(matches!(
        compute(&nan),
        Err(ExemptionError::InvalidInput {
            field: "price_per_kwh",
            ..
        })
    ));

    let inf = SimulationInput {
        land_value: f64::INFINITY,
        ..reference_input()
    };
    assert!(matches!(
        compute(&inf),
        Err(ExemptionError::InvalidInput {
            field: "land_value",
            ..
        })
    ));
}
