use approx::assert_relative_eq;
use chrono::NaiveDate;
use construction_waste_toolbox::{
    app::{self, AnalysisRequest, AppError},
    catalog::MaterialCatalog,
    config::Config,
    i18n::{self, Translator},
    units::{convert_area, convert_mass, AreaUnit, MassUnit},
    waste::{
        badge::{self, BadgeError},
        AnalysisError, WasteAnalyzer,
    },
};

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .expect("timestamp")
}

fn analyzer() -> WasteAnalyzer {
    WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"))
}

fn granted_request() -> AnalysisRequest {
    AnalysisRequest {
        area: 100.0,
        area_unit: AreaUnit::SquareMeter,
        materials: vec!["Cimento".into(), "Madeira".into(), "Gesso".into()],
        overrides: Vec::new(),
    }
}

#[test]
fn area_units_convert_to_square_meters() {
    assert_relative_eq!(convert_area(1.0, AreaUnit::Hectare, AreaUnit::SquareMeter), 10_000.0);
    assert_relative_eq!(
        convert_area(1_000.0, AreaUnit::SquareFoot, AreaUnit::SquareMeter),
        92.903_04,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        convert_area(
            convert_area(250.0, AreaUnit::SquareMeter, AreaUnit::SquareFoot),
            AreaUnit::SquareFoot,
            AreaUnit::SquareMeter
        ),
        250.0,
        max_relative = 1e-12
    );
    assert_eq!(AreaUnit::parse(" FT2 "), Some(AreaUnit::SquareFoot));
    assert_eq!(AreaUnit::parse("acre"), None);
}

#[test]
fn mass_units_convert_from_kilograms() {
    assert_relative_eq!(convert_mass(1_440.0, MassUnit::Kilogram, MassUnit::Tonne), 1.44);
    assert_relative_eq!(
        convert_mass(1.0, MassUnit::Pound, MassUnit::Kilogram),
        0.45359237,
        max_relative = 1e-9
    );
    assert_eq!(MassUnit::parse("t"), Some(MassUnit::Tonne));
}

#[test]
fn request_area_is_converted_before_analysis() {
    let request = AnalysisRequest {
        area: 0.01,
        area_unit: AreaUnit::Hectare,
        materials: vec!["Concreto".into()],
        overrides: Vec::new(),
    };
    let outcome = app::run_analysis(
        &analyzer(),
        &Config::default(),
        &Translator::new("pt"),
        &request,
        stamp(),
    )
    .expect("analysis");
    assert_relative_eq!(outcome.area_m2, 100.0, max_relative = 1e-9);
    assert_relative_eq!(outcome.results[0].co2_kg, 216.0, max_relative = 1e-9);
    assert!(!outcome.verdict.granted());
    assert!(outcome.badge.is_none());
    assert!(outcome.report.starts_with("Relatório de Análise de Resíduos - 2025-01-02 03:04:05"));
}

#[test]
fn missing_badge_does_not_fail_granted_analysis() {
    let mut cfg = Config::default();
    cfg.badge_path = std::env::temp_dir().join("cwt_no_such_badge.png");
    let outcome = app::run_analysis(
        &analyzer(),
        &cfg,
        &Translator::new("en"),
        &granted_request(),
        stamp(),
    )
    .expect("analysis");
    assert!(outcome.verdict.granted());
    assert!(outcome.badge.is_none());
}

#[test]
fn badge_is_loaded_when_granted() {
    let path = std::env::temp_dir().join(format!("cwt_badge_{}.png", std::process::id()));
    image::RgbaImage::from_pixel(4, 3, image::Rgba([0, 160, 80, 255]))
        .save(&path)
        .expect("write badge");
    let mut cfg = Config::default();
    cfg.badge_path = path.clone();
    let outcome = app::run_analysis(
        &analyzer(),
        &cfg,
        &Translator::new("pt"),
        &granted_request(),
        stamp(),
    )
    .expect("analysis");
    let badge = outcome.badge.expect("badge");
    assert_eq!((badge.width, badge.height), (4, 3));
    assert_eq!(badge.rgba.len(), 4 * 3 * 4);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_badge_is_reported_and_skipped() {
    let path = std::env::temp_dir().join(format!("cwt_bad_badge_{}.png", std::process::id()));
    std::fs::write(&path, b"not an image").expect("write");
    let err = badge::load_badge(&path).expect_err("decode failure");
    assert!(matches!(err, BadgeError::MissingAsset { path: ref p, .. } if p == &path));
    assert!(badge::load_badge_or_warn(&path).is_none());

    let mut cfg = Config::default();
    cfg.badge_path = path.clone();
    let outcome = app::run_analysis(
        &analyzer(),
        &cfg,
        &Translator::new("pt"),
        &granted_request(),
        stamp(),
    )
    .expect("analysis");
    assert!(outcome.verdict.granted());
    assert!(outcome.badge.is_none());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn analysis_errors_pass_through() {
    let mut request = granted_request();
    request.materials.clear();
    let err = app::run_analysis(
        &analyzer(),
        &Config::default(),
        &Translator::new("pt"),
        &request,
        stamp(),
    )
    .expect_err("empty selection");
    assert!(matches!(err, AppError::Analysis(AnalysisError::EmptySelection)));
}

#[test]
fn override_arguments_are_parsed() {
    assert_eq!(
        app::parse_override_arg("Cimento=20"),
        Ok(("Cimento".to_string(), 20.0))
    );
    assert_eq!(
        app::parse_override_arg(" Aço = 0.5 "),
        Ok(("Aço".to_string(), 0.5))
    );
    assert!(app::parse_override_arg("Cimento").is_err());
    assert!(app::parse_override_arg("=3").is_err());
    assert!(app::parse_override_arg("Cimento=muito").is_err());
}

#[test]
fn translations_fill_placeholders() {
    let tr = Translator::new("pt");
    assert_eq!(
        tr.tf(i18n::keys::RESULT_REPORT_SAVED, &[("path", "a.txt".into())]),
        "Relatório salvo: a.txt"
    );
    assert_eq!(
        i18n::fill_template("{a}+{a}={b}", &[("a", "1".into()), ("b", "2".into())]),
        "1+1=2"
    );
    assert_eq!(i18n::resolve_language("pt", Some("ko")), "pt");
    assert_eq!(i18n::resolve_language("auto", Some("ko")), "ko");
}
