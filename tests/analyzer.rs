use approx::assert_relative_eq;
use construction_waste_toolbox::{
    catalog::MaterialCatalog,
    units::ConsumptionUnit,
    waste::{AnalysisError, AnalysisInput, WasteAnalyzer},
};

fn analyzer() -> WasteAnalyzer {
    WasteAnalyzer::new(MaterialCatalog::builtin().expect("builtin catalog"))
}

#[test]
fn concrete_uses_density_for_mass() {
    let res = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("Concreto"))
        .expect("analysis");
    let r = &res[0];
    assert_eq!(r.unit, ConsumptionUnit::VolumePerArea);
    assert_relative_eq!(r.total_consumption, 5.0, max_relative = 1e-12);
    assert_relative_eq!(r.mass_kg, 12_000.0, max_relative = 1e-12);
    assert_relative_eq!(r.waste_kg, 1_440.0, max_relative = 1e-12);
    assert_relative_eq!(r.co2_kg, 216.0, max_relative = 1e-12);
    assert!(!r.exceeded_default);
}

#[test]
fn cement_mass_is_consumption_itself() {
    let res = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("Cimento"))
        .expect("analysis");
    let r = &res[0];
    assert_relative_eq!(r.total_consumption, 1_500.0, max_relative = 1e-12);
    assert_relative_eq!(r.mass_kg, 1_500.0, max_relative = 1e-12);
    assert_relative_eq!(r.waste_kg, 150.0, max_relative = 1e-12);
    assert_relative_eq!(r.co2_kg, 127.5, max_relative = 1e-12);
}

#[test]
fn bricks_convert_count_to_mass() {
    let res = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("Tijolo"))
        .expect("analysis");
    let r = &res[0];
    assert_relative_eq!(r.total_consumption, 6_000.0, max_relative = 1e-12);
    assert_relative_eq!(r.mass_kg, 21_000.0, max_relative = 1e-12);
    assert_relative_eq!(r.waste_kg, 4_200.0, max_relative = 1e-12);
    assert_relative_eq!(r.co2_kg, 504.0, max_relative = 1e-12);
}

#[test]
fn every_builtin_material_stays_physical() {
    let az = analyzer();
    let names: Vec<String> = az.catalog().names().map(str::to_string).collect();
    let mut input = AnalysisInput::new(250.0);
    input.selected = names.clone();
    let res = az.analyze(&input).expect("analysis");
    assert_eq!(res.len(), names.len());
    for r in &res {
        assert!(r.waste_kg <= r.mass_kg, "{}: waste {} > mass {}", r.name, r.waste_kg, r.mass_kg);
        assert!(r.co2_kg >= 0.0, "{}: co2 {}", r.name, r.co2_kg);
        assert!(r.mass_kg > 0.0);
    }
}

#[test]
fn same_input_gives_same_result() {
    let az = analyzer();
    let input = AnalysisInput::new(80.0)
        .select("Madeira")
        .select("Aço")
        .with_override("Aço", 25.0);
    let a = az.analyze(&input).expect("first");
    let b = az.analyze(&input).expect("second");
    assert_eq!(a, b);
}

#[test]
fn results_follow_selection_order() {
    let res = analyzer()
        .analyze(
            &AnalysisInput::new(10.0)
                .select("Gesso")
                .select("Areia")
                .select("Concreto"),
        )
        .expect("analysis");
    let names: Vec<&str> = res.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Gesso", "Areia", "Concreto"]);
}

#[test]
fn zero_override_means_default() {
    let res = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Cimento", 0.0))
        .expect("analysis");
    assert_relative_eq!(res[0].effective_consumption, 15.0);
    assert!(!res[0].exceeded_default);
}

#[test]
fn override_above_default_is_flagged() {
    let az = analyzer();
    let equal = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Cimento", 15.0))
        .expect("equal");
    assert!(!equal[0].exceeded_default);

    let above = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Cimento", 20.0))
        .expect("above");
    assert!(above[0].exceeded_default);
    assert_relative_eq!(above[0].mass_kg, 2_000.0, max_relative = 1e-12);

    let below = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Cimento", 10.0))
        .expect("below");
    assert!(!below[0].exceeded_default);
    assert_relative_eq!(below[0].co2_kg, 85.0, max_relative = 1e-12);
}

fn mortar_catalog(density: f64) -> MaterialCatalog {
    MaterialCatalog::from_toml_str(&format!(
        r#"
[[materials]]
name = "Argamassa"
waste_fraction = 0.1
co2_factor_per_kg = 0.5
default_consumption = 10.0
unit = "MassPerArea"
density = {density:?}
disposal_note = "Caçamba"
reuse_note = "Reciclável"
"#
    ))
    .expect("catalog")
}

#[test]
fn density_is_ignored_for_mass_units() {
    let input = AnalysisInput::new(10.0).select("Argamassa");
    let light = WasteAnalyzer::new(mortar_catalog(300.0))
        .analyze(&input)
        .expect("light");
    let heavy = WasteAnalyzer::new(mortar_catalog(7_850.0))
        .analyze(&input)
        .expect("heavy");
    assert_eq!(light[0].mass_kg, heavy[0].mass_kg);
    assert_eq!(light[0].waste_kg, heavy[0].waste_kg);
    assert_eq!(light[0].co2_kg, heavy[0].co2_kg);
    assert_relative_eq!(light[0].mass_kg, 100.0, max_relative = 1e-12);
    assert_relative_eq!(light[0].waste_kg, 10.0, max_relative = 1e-12);
    assert_relative_eq!(light[0].co2_kg, 5.0, max_relative = 1e-12);
}

#[test]
fn unknown_material_is_reported_by_name() {
    let err = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("Concreto").select("Vidro"))
        .expect_err("unknown");
    assert_eq!(err, AnalysisError::UnknownMaterial("Vidro".into()));
}

#[test]
fn names_are_case_sensitive() {
    let err = analyzer()
        .analyze(&AnalysisInput::new(100.0).select("concreto"))
        .expect_err("lowercase name");
    assert!(matches!(err, AnalysisError::UnknownMaterial(_)));
}

#[test]
fn empty_selection_is_rejected() {
    let err = analyzer()
        .analyze(&AnalysisInput::new(100.0))
        .expect_err("empty");
    assert_eq!(err, AnalysisError::EmptySelection);
}

#[test]
fn invalid_inputs_are_rejected() {
    let az = analyzer();
    for area in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = az
            .analyze(&AnalysisInput::new(area).select("Concreto"))
            .expect_err("bad area");
        assert!(matches!(err, AnalysisError::InvalidInput(_)), "area {area}");
    }

    let negative = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Cimento", -1.0))
        .expect_err("negative override");
    assert!(matches!(negative, AnalysisError::InvalidInput(_)));

    let duplicate = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").select("Cimento"))
        .expect_err("duplicate");
    assert!(matches!(duplicate, AnalysisError::InvalidInput(_)));

    let unselected = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").with_override("Areia", 1.0))
        .expect_err("override for unselected");
    assert!(matches!(unselected, AnalysisError::InvalidInput(_)));
}
