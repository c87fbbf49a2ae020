//! 분석 결과를 텍스트 보고서로 만든다. 문자열 조립만 하며 입출력은 `write_report`에만 있다.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::analyzer::MaterialResult;
use super::seal::{SealThresholds, SealVerdict};
use crate::i18n::{keys, Translator};

/// 전체 폐기물/CO₂ 합계.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisTotals {
    pub waste_kg: f64,
    pub co2_kg: f64,
}

impl AnalysisTotals {
    pub fn from_results(results: &[MaterialResult]) -> Self {
        results.iter().fold(Self::default(), |acc, r| Self {
            waste_kg: acc.waste_kg + r.waste_kg,
            co2_kg: acc.co2_kg + r.co2_kg,
        })
    }
}

/// 판정 기준 한 줄. `passed`와 설명 문구를 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionLine {
    pub passed: bool,
    pub text: String,
}

impl CriterionLine {
    pub fn mark(&self) -> &'static str {
        if self.passed {
            "✅"
        } else {
            "❌"
        }
    }
}

/// 기본 기준과 포르투갈어 문구로 보고서를 만든다.
pub fn render_report(
    results: &[MaterialResult],
    verdict: &SealVerdict,
    area_m2: f64,
    timestamp: NaiveDateTime,
) -> String {
    render_report_with(
        &Translator::new("pt"),
        results,
        verdict,
        area_m2,
        timestamp,
        &SealThresholds::default(),
    )
}

/// 번역기와 판정 기준을 지정해 보고서를 만든다.
pub fn render_report_with(
    tr: &Translator,
    results: &[MaterialResult],
    verdict: &SealVerdict,
    area_m2: f64,
    timestamp: NaiveDateTime,
    thresholds: &SealThresholds,
) -> String {
    let totals = AnalysisTotals::from_results(results);
    let mut lines = vec![
        format!(
            "{} - {}",
            tr.t(keys::REPORT_TITLE),
            timestamp.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("{}: {} m²", tr.t(keys::REPORT_AREA), format_number(area_m2, 2)),
        String::new(),
        tr.t(keys::REPORT_DETAIL_HEADING),
    ];
    lines.extend(results.iter().map(|r| material_line(tr, r)));
    lines.push(String::new());
    lines.push(tr.t(keys::REPORT_SUMMARY_HEADING));
    lines.push(format!(
        "{}: {} kg",
        tr.t(keys::REPORT_TOTAL_WASTE),
        format_number(totals.waste_kg, 2)
    ));
    lines.push(format!(
        "{}: {} kg",
        tr.t(keys::REPORT_TOTAL_CO2),
        format_number(totals.co2_kg, 2)
    ));
    lines.push(String::new());
    lines.push(tr.t(keys::REPORT_SEAL_HEADING));
    lines.push(seal_headline(tr, verdict));
    lines.push(tr.t(keys::REPORT_CRITERIA));
    for c in criteria_lines(tr, verdict, thresholds) {
        lines.push(format!("- {} {}", c.mark(), c.text));
    }
    lines.join("\n")
}

/// 자재 한 줄 요약.
pub fn material_line(tr: &Translator, r: &MaterialResult) -> String {
    let mut line = format!(
        "- {}: {} {} | {} kg | {}: {} kg | {}: {} kg | {}: {} | {}: {}",
        r.name,
        format_number(r.total_consumption, 2),
        r.unit.quantity_label(),
        format_number(r.mass_kg, 2),
        tr.t(keys::REPORT_WASTE),
        format_number(r.waste_kg, 2),
        tr.t(keys::REPORT_CO2),
        format_number(r.co2_kg, 2),
        tr.t(keys::REPORT_REUSE),
        r.reuse_note,
        tr.t(keys::REPORT_DISPOSAL),
        r.disposal_note,
    );
    if r.exceeded_default {
        line.push_str(&format!(" [{}]", tr.t(keys::REPORT_EXCEEDED)));
    }
    line
}

pub fn seal_headline(tr: &Translator, verdict: &SealVerdict) -> String {
    if verdict.granted() {
        tr.t(keys::REPORT_SEAL_GRANTED)
    } else {
        tr.t(keys::REPORT_SEAL_DENIED)
    }
}

/// 세 가지 판정 기준 문구(소비량 초과, 면적당 CO₂, 재사용 비율).
pub fn criteria_lines(
    tr: &Translator,
    verdict: &SealVerdict,
    thresholds: &SealThresholds,
) -> [CriterionLine; 3] {
    [
        CriterionLine {
            passed: verdict.no_exceedance,
            text: tr.t(keys::CRITERION_NO_EXCEEDANCE),
        },
        CriterionLine {
            passed: verdict.co2_per_area_under_limit,
            text: tr.tf(
                keys::CRITERION_CO2,
                &[
                    ("limit", thresholds.max_co2_per_area.to_string()),
                    ("current", format!("{:.2}", verdict.co2_per_area)),
                ],
            ),
        },
        CriterionLine {
            passed: verdict.reuse_share_at_least_min,
            text: tr.tf(
                keys::CRITERION_REUSE,
                &[
                    ("percent", format!("{:.1}", verdict.reuse_share_percent)),
                    ("min", thresholds.min_reuse_share_percent.to_string()),
                ],
            ),
        },
    ]
}

/// 천 단위 구분 기호(,)를 넣어 숫자를 표기한다. 예: 12000 → "12,000.00"
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 보고서 파일명: `relatorio_residuos_YYYY-MM-DD_HH-MM.txt`
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!("relatorio_residuos_{}.txt", timestamp.format("%Y-%m-%d_%H-%M"))
}

/// 보고서를 `dir`에 타임스탬프 파일명으로 저장하고 경로를 반환한다.
pub fn write_report(dir: &Path, timestamp: NaiveDateTime, text: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(timestamp));
    fs::write(&path, text)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}
