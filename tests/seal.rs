use approx::assert_relative_eq;
use construction_waste_toolbox::{
    catalog::MaterialCatalog,
    units::ConsumptionUnit,
    waste::{
        evaluate_seal, evaluate_seal_with, AnalysisError, AnalysisInput, MaterialResult,
        SealThresholds, WasteAnalyzer,
    },
};

fn result(name: &str, co2_kg: f64, reuse_note: &str, exceeded: bool) -> MaterialResult {
    MaterialResult {
        name: name.into(),
        unit: ConsumptionUnit::MassPerArea,
        effective_consumption: 1.0,
        total_consumption: 100.0,
        mass_kg: 100.0,
        waste_kg: 10.0,
        co2_kg,
        exceeded_default: exceeded,
        disposal_note: "Descarte controlado".into(),
        reuse_note: reuse_note.into(),
    }
}

#[test]
fn co2_exactly_at_limit_passes() {
    let results = [result("A", 500.0, "Reutilizável", false), result("B", 300.0, "Reciclável", false)];
    let v = evaluate_seal(&results, 100.0).expect("verdict");
    assert_relative_eq!(v.co2_per_area, 8.0);
    assert!(v.co2_per_area_under_limit);
    assert!(v.granted());

    let over = [result("A", 800.5, "Reutilizável", false)];
    let v = evaluate_seal(&over, 100.0).expect("verdict");
    assert!(!v.co2_per_area_under_limit);
    assert!(!v.granted());
}

#[test]
fn reuse_share_exactly_at_minimum_passes() {
    let mut results: Vec<MaterialResult> = (0..7)
        .map(|i| result(&format!("R{i}"), 1.0, "Usar em argamassa", false))
        .collect();
    results.extend((0..3).map(|i| result(&format!("N{i}"), 1.0, "Pode ser fundido", false)));
    let v = evaluate_seal(&results, 100.0).expect("verdict");
    assert_relative_eq!(v.reuse_share_percent, 70.0);
    assert!(v.reuse_share_at_least_min);
    assert!(v.granted());

    results[0] = result("N9", 1.0, "Pode ser fundido", false);
    assert_eq!(results.len(), 10);
    let v = evaluate_seal(&results, 100.0).expect("verdict");
    assert_relative_eq!(v.reuse_share_percent, 60.0);
    assert!(!v.reuse_share_at_least_min);
}

#[test]
fn any_exceedance_denies() {
    let results = [result("A", 1.0, "Reciclável", false), result("B", 1.0, "Reciclável", true)];
    let v = evaluate_seal(&results, 100.0).expect("verdict");
    assert!(!v.no_exceedance);
    assert!(v.co2_per_area_under_limit);
    assert!(v.reuse_share_at_least_min);
    assert!(!v.granted());
}

#[test]
fn empty_results_cannot_be_judged() {
    assert_eq!(evaluate_seal(&[], 100.0), Err(AnalysisError::EmptySelection));
}

#[test]
fn zero_area_is_rejected() {
    let results = [result("A", 1.0, "Reciclável", false)];
    assert!(matches!(
        evaluate_seal(&results, 0.0),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn builtin_catalog_reuse_notes() {
    let catalog = MaterialCatalog::builtin().expect("catalog");
    let th = SealThresholds::default();
    let reusable: Vec<&str> = catalog
        .iter()
        .filter(|m| th.is_reusable(&m.reuse_note))
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(reusable, ["Cimento", "Tijolo", "Madeira", "Aço", "Gesso"]);
}

#[test]
fn builtin_selection_can_earn_the_seal() {
    let az = WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"));
    let results = az
        .analyze(
            &AnalysisInput::new(100.0)
                .select("Cimento")
                .select("Madeira")
                .select("Gesso"),
        )
        .expect("analysis");
    let v = evaluate_seal(&results, 100.0).expect("verdict");
    assert_relative_eq!(v.co2_per_area, 1.701, max_relative = 1e-9);
    assert_relative_eq!(v.reuse_share_percent, 100.0);
    assert!(v.granted());

    let concrete = az
        .analyze(&AnalysisInput::new(100.0).select("Concreto"))
        .expect("analysis");
    let v = evaluate_seal(&concrete, 100.0).expect("verdict");
    assert_relative_eq!(v.reuse_share_percent, 0.0);
    assert!(!v.granted());
}

#[test]
fn custom_thresholds_are_applied() {
    let results = [result("A", 500.0, "Doar", false)];
    let th = SealThresholds {
        max_co2_per_area: 4.0,
        min_reuse_share_percent: 50.0,
        reuse_keywords: vec!["DOAR".into()],
    };
    let v = evaluate_seal_with(&results, 100.0, &th).expect("verdict");
    assert!(!v.co2_per_area_under_limit);
    assert!(v.reuse_share_at_least_min);
}
