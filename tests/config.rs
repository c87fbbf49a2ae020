use std::path::PathBuf;

use construction_waste_toolbox::{
    config::{self, Config},
    units::{AreaUnit, MassUnit},
};

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cwt_{tag}_{}.toml", std::process::id()))
}

#[test]
fn missing_config_is_created_with_defaults() {
    let path = temp_path("missing");
    let _ = std::fs::remove_file(&path);
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    assert_eq!(cfg.seal.max_co2_per_area, 8.0);
    assert_eq!(cfg.seal.min_reuse_share_percent, 70.0);
    assert_eq!(cfg.badge_path, PathBuf::from("SJG.png"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn saved_config_is_read_back() {
    let path = temp_path("saved");
    let mut cfg = Config::default();
    cfg.language = "pt".into();
    cfg.area_unit = AreaUnit::Hectare;
    cfg.mass_unit = MassUnit::Tonne;
    cfg.seal.max_co2_per_area = 6.5;
    cfg.save_to(&path).expect("save");
    let loaded = config::load_or_default_at(&path).expect("load");
    assert_eq!(loaded, cfg);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let path = temp_path("partial");
    std::fs::write(&path, "mass_unit = \"Pound\"\n\n[seal]\nmin_reuse_share_percent = 50.0\n")
        .expect("write");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg.mass_unit, MassUnit::Pound);
    assert_eq!(cfg.area_unit, AreaUnit::SquareMeter);
    assert_eq!(cfg.seal.min_reuse_share_percent, 50.0);
    assert_eq!(cfg.seal.max_co2_per_area, 8.0);
    assert_eq!(cfg.seal.reuse_keywords.len(), 3);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn broken_config_is_an_error() {
    let path = temp_path("broken");
    std::fs::write(&path, "area_unit = \"Acre\"\n").expect("write");
    assert!(matches!(
        config::load_or_default_at(&path),
        Err(config::ConfigError::Serde(_))
    ));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn default_config_uses_builtin_catalog() {
    let catalog = Config::default().load_catalog().expect("catalog");
    assert_eq!(catalog.len(), 8);
}
