//! 보고서 내용/내보내기 테스트.
use std::fs;
use std::path::PathBuf;

use pv_canopy_exemption::app;
use pv_canopy_exemption::exemption::{compute, SimulationInput};
use pv_canopy_exemption::i18n::Translator;
use pv_canopy_exemption::report::{methodology, Report};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pv_exemption_it_{}_{name}", std::process::id()))
}

fn input() -> SimulationInput {
    SimulationInput {
        site_name: "Parking Nord".to_string(),
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
fn french_report_lines() {
    let tr = Translator::new("fr-fr");
    let input = input();
    let result = compute(&input).expect("compute");
    let report = Report::new(&input, &result, &tr);

    assert_eq!(report.site_line, "Site : Parking Nord");
    assert_eq!(report.inputs.len(), 12);
    assert_eq!(report.inputs[2].value, "300,000.00");
    assert_eq!(report.inputs[4].value, "20");
    assert_eq!(report.inputs[10].value, "0.08");

    let labels: Vec<&str> = report.results.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Revenus actualisés (€)",
            "Coûts actualisés (€)",
            "Coût Net Actualisé (CNA) (€)",
            "Seuil d'exonération (10%) (€)",
            "Exonération possible ?",
        ]
    );
    assert_eq!(report.results[0].value, "179,455.83");
    assert_eq!(report.results[2].value, "285,468.59");
    assert_eq!(report.results[3].value, "30,000.00");
    assert_eq!(report.results[4].value, "OUI");
    assert_eq!(report.methodology, methodology(tr.language()));
}

#[test]
fn english_text_report_contains_sections() {
    let tr = Translator::new("en-us");
    let input = input();
    let result = compute(&input).expect("compute");
    let text = Report::new(&input, &result, &tr).to_text_with_methodology();
    assert!(text.contains("Site: Parking Nord"));
    assert!(text.contains("- Exemption possible? : YES"));
    assert!(text.contains("Calculation methodology"));
    assert!(text.contains("Exemption granted when CNA > Threshold"));
}

#[test]
fn pdf_is_written() {
    let tr = Translator::new("fr-fr");
    let input = input();
    let result = compute(&input).expect("compute");
    let path = temp_path("report.pdf");
    Report::new(&input, &result, &tr)
        .write_pdf(&path)
        .expect("write pdf");
    let bytes = fs::read(&path).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
    let _ = fs::remove_file(&path);
}

#[test]
fn batch_mode_reads_toml_input() {
    let path = temp_path("batch.toml");
    fs::write(
        &path,
        r#"
site_name = "Parking Sud"
parking_surface_m2 = 3000.0
shade_surface_m2 = 2000.0
land_value = 300000.0
initial_cost = 420000.0
study_duration_years = 20
discount_rate_percent = 5.0
exemption_threshold_percent = 10.0
annual_maintenance_cost = 3000.0
decommissioning_cost = 20000.0
annual_energy_production_kwh = 180000.0
price_per_kwh = 0.08
total_subsidies = 0.0
"#,
    )
    .expect("write input");
    let report = app::run_batch(&path, None, &Translator::new("en")).expect("batch");
    assert_eq!(report.site_name, "Parking Sud");
    assert_eq!(report.results[4].value, "YES");
    let _ = fs::remove_file(&path);
}

#[test]
fn batch_mode_rejects_blank_site_and_negative_duration() {
    let base = |site: &str, years: i64| {
        format!(
            "site_name = \"{site}\"\nparking_surface_m2 = 1.0\nshade_surface_m2 = 1.0\n\
             land_value = 1.0\ninitial_cost = 1.0\nstudy_duration_years = {years}\n\
             discount_rate_percent = 5.0\nexemption_threshold_percent = 10.0\n\
             annual_maintenance_cost = 1.0\ndecommissioning_cost = 1.0\n\
             annual_energy_production_kwh = 1.0\nprice_per_kwh = 1.0\ntotal_subsidies = 0.0\n"
        )
    };
    let tr = Translator::new("fr");

    let blank = temp_path("blank.toml");
    fs::write(&blank, base("  ", 10)).expect("write");
    assert!(matches!(
        app::run_batch(&blank, None, &tr),
        Err(app::AppError::Form(_))
    ));
    let _ = fs::remove_file(&blank);

    let negative = temp_path("negative.toml");
    fs::write(&negative, base("Parking", -3)).expect("write");
    assert!(matches!(
        app::run_batch(&negative, None, &tr),
        Err(app::AppError::Exemption(_))
    ));
    let _ = fs::remove_file(&negative);
}
