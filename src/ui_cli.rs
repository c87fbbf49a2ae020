use std::io::{self, Write};

use chrono::Local;

use crate::app::{self, AnalysisOutcome, AnalysisRequest, AppError, Session};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::units::{convert_mass, AreaUnit, MassUnit};
use crate::waste::report::{criteria_lines, format_number, seal_headline, write_report};
use crate::waste::{AnalysisError, WasteAnalyzer};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Analysis,
    Materials,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ANALYSIS));
    println!("{}", tr.t(keys::MAIN_MENU_MATERIALS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Analysis),
            "2" => return Ok(MenuChoice::Materials),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 분석 메뉴: 면적, 자재 선택, 사용자 소비량을 입력받아 결과를 출력한다.
pub fn handle_analysis(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    let cfg = &session.config;
    println!("{}", tr.t(keys::ANALYSIS_HEADING));
    let area = read_positive_f64(
        tr,
        &tr.tf(keys::PROMPT_AREA, &[("unit", cfg.area_unit.symbol().to_string())]),
    )?;

    let names: Vec<String> = session.analyzer.catalog().names().map(str::to_string).collect();
    for (i, name) in names.iter().enumerate() {
        println!("{}) {name}", i + 1);
    }
    let sel = read_line(&tr.t(keys::PROMPT_MATERIAL_SELECTION))?;
    let materials = parse_selection(&sel, &names);
    if materials.is_empty() {
        return Err(AppError::Analysis(AnalysisError::EmptySelection));
    }

    println!("{}", tr.t(keys::OVERRIDE_HEADING));
    let mut overrides = Vec::new();
    for name in &materials {
        let Some(spec) = session.analyzer.catalog().get(name) else {
            continue;
        };
        let prompt = tr.tf(
            keys::PROMPT_OVERRIDE,
            &[
                ("name", name.clone()),
                ("unit", spec.unit.rate_label().to_string()),
                ("default", spec.default_consumption.to_string()),
            ],
        );
        if let Some(v) = read_optional_f64(tr, &prompt)? {
            overrides.push((name.clone(), v));
        }
    }

    let request = AnalysisRequest {
        area,
        area_unit: cfg.area_unit,
        materials,
        overrides,
    };
    let outcome = app::run_analysis(
        &session.analyzer,
        cfg,
        tr,
        &request,
        Local::now().naive_local(),
    )?;
    print_outcome(tr, cfg, &outcome);

    let answer = read_line(&tr.t(keys::PROMPT_SAVE_REPORT))?;
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim" | "예") {
        let path = write_report(&cfg.report_dir, outcome.timestamp, &outcome.report)?;
        println!(
            "{}",
            tr.tf(keys::RESULT_REPORT_SAVED, &[("path", path.display().to_string())])
        );
    }
    Ok(())
}

/// 결과 표, 합계, 판정 기준을 출력한다.
pub fn print_outcome(tr: &Translator, cfg: &Config, outcome: &AnalysisOutcome) {
    let mass = |kg: f64| {
        format!(
            "{} {}",
            format_number(convert_mass(kg, MassUnit::Kilogram, cfg.mass_unit), 2),
            cfg.mass_unit.symbol()
        )
    };
    println!();
    println!("{}", tr.t(keys::RESULT_TABLE_HEADER));
    for r in &outcome.results {
        println!(
            "{} | {} {} | {} | {} | {} kg{}",
            r.name,
            format_number(r.total_consumption, 2),
            r.unit.quantity_label(),
            mass(r.mass_kg),
            mass(r.waste_kg),
            format_number(r.co2_kg, 2),
            if r.exceeded_default { " *" } else { "" }
        );
    }
    let totals = crate::waste::AnalysisTotals::from_results(&outcome.results);
    println!("{}: {}", tr.t(keys::REPORT_TOTAL_WASTE), mass(totals.waste_kg));
    println!(
        "{}: {} kg",
        tr.t(keys::REPORT_TOTAL_CO2),
        format_number(totals.co2_kg, 2)
    );
    println!();
    println!("{}", tr.t(keys::REPORT_SEAL_HEADING));
    println!("{}", seal_headline(tr, &outcome.verdict));
    if outcome.verdict.granted() {
        let path = cfg.badge_path.display().to_string();
        match &outcome.badge {
            Some(b) => println!(
                "{}",
                tr.tf(
                    keys::BADGE_AVAILABLE,
                    &[
                        ("path", path),
                        ("width", b.width.to_string()),
                        ("height", b.height.to_string()),
                    ],
                )
            ),
            None => println!("{}", tr.tf(keys::BADGE_MISSING, &[("path", path)])),
        }
    }
    println!("{}", tr.t(keys::REPORT_CRITERIA));
    for c in criteria_lines(tr, &outcome.verdict, &cfg.seal) {
        println!("- {} {}", c.mark(), c.text);
    }
}

/// 자재 목록을 출력한다.
pub fn handle_materials(session: &Session) {
    let tr = &session.tr;
    println!("{}", tr.t(keys::MATERIALS_HEADING));
    print_catalog(tr, &session.analyzer);
}

pub fn print_catalog(tr: &Translator, analyzer: &WasteAnalyzer) {
    println!("{}", tr.t(keys::MATERIALS_TABLE_HEADER));
    for m in analyzer.catalog().iter() {
        let density = if m.unit.uses_density() {
            format!("{}", m.density)
        } else {
            "-".into()
        };
        println!(
            "{} | {:.0}% | {} | {} {} | {} | {}",
            m.name,
            m.waste_fraction * 100.0,
            m.co2_factor_per_kg,
            m.default_consumption,
            m.unit.rate_label(),
            density,
            m.reuse_note
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    let tr = session.tr.clone();
    let cfg = &mut session.config;
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", cfg.language.clone()),
                ("area", cfg.area_unit.symbol().to_string()),
                ("mass", cfg.mass_unit.symbol().to_string()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let changed = match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let code = read_line(&tr.t(keys::SETTINGS_LANGUAGE_PROMPT))?;
            let code = code.trim().to_lowercase();
            if matches!(code.as_str(), "auto" | "ko" | "en" | "pt") {
                cfg.language = code;
                true
            } else {
                false
            }
        }
        "2" => {
            let code = read_line(&tr.t(keys::SETTINGS_AREA_UNIT_PROMPT))?;
            match AreaUnit::parse(&code) {
                Some(u) => {
                    cfg.area_unit = u;
                    true
                }
                None => false,
            }
        }
        "3" => {
            let code = read_line(&tr.t(keys::SETTINGS_MASS_UNIT_PROMPT))?;
            match MassUnit::parse(&code) {
                Some(u) => {
                    cfg.mass_unit = u;
                    true
                }
                None => false,
            }
        }
        _ => false,
    };
    if changed {
        println!("{}", tr.t(keys::SETTINGS_SAVED));
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(())
}

/// "1, 3,3, 8" 같은 입력을 자재 이름 목록으로 바꾼다. 범위 밖 번호와 중복은 무시한다.
pub fn parse_selection(input: &str, names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in input.split([',', ' ']) {
        let Ok(n) = part.trim().parse::<usize>() else {
            continue;
        };
        if let Some(name) = n.checked_sub(1).and_then(|i| names.get(i)) {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
    }
    out
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_positive_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 `None`. 음수는 다시 묻는다.
fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(Some(v)),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
