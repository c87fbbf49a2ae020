use chrono::{NaiveDate, NaiveDateTime};
use construction_waste_toolbox::{
    catalog::MaterialCatalog,
    i18n::Translator,
    waste::{
        evaluate_seal, render_report, render_report_with, report::write_report, report_file_name,
        AnalysisInput, AnalysisTotals, SealThresholds, WasteAnalyzer,
    },
};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("timestamp")
}

fn concrete_report() -> String {
    let az = WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"));
    let results = az
        .analyze(&AnalysisInput::new(100.0).select("Concreto"))
        .expect("analysis");
    let verdict = evaluate_seal(&results, 100.0).expect("verdict");
    render_report(&results, &verdict, 100.0, at(14, 30, 5))
}

#[test]
fn report_lists_header_details_and_summary() {
    let text = concrete_report();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Relatório de Análise de Resíduos - 2024-05-01 14:30:05");
    assert_eq!(lines[1], "Área analisada: 100.00 m²");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "--- Detalhamento por Material ---");
    assert_eq!(
        lines[4],
        "- Concreto: 5.00 m³ | 12,000.00 kg | Resíduo: 1,440.00 kg | CO₂: 216.00 kg | Reutilização: Pode ser triturado | Descarte: Descarte em caçambas"
    );
    assert!(text.contains("--- Resumo Geral ---"));
    assert!(text.contains("Total de resíduo gerado: 1,440.00 kg"));
    assert!(text.contains("Total de emissão de CO₂: 216.00 kg"));
}

#[test]
fn report_ends_with_seal_and_criteria() {
    let text = concrete_report();
    let tail: Vec<&str> = text.lines().rev().take(6).collect();
    assert_eq!(tail[0], "- ❌ 0.0% dos materiais têm reaproveitamento (Meta: ≥ 70%)");
    assert_eq!(tail[1], "- ✅ Emissão de CO₂ por m² ≤ 8 kg (Atual: 2.16 kg)");
    assert_eq!(tail[2], "- ✅ Nenhum material ultrapassou o consumo médio.");
    assert_eq!(tail[3], "Critérios:");
    assert_eq!(tail[4], "❌ NÃO CONCEDIDO");
    assert_eq!(tail[5], "--- Resultado do Selo Verde ---");
}

#[test]
fn exceeded_materials_are_marked() {
    let az = WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"));
    let results = az
        .analyze(
            &AnalysisInput::new(100.0)
                .select("Cimento")
                .with_override("Cimento", 20.0),
        )
        .expect("analysis");
    let verdict = evaluate_seal(&results, 100.0).expect("verdict");
    let text = render_report(&results, &verdict, 100.0, at(8, 0, 0));
    assert!(text.contains("Descarte: Evitar solo e água [acima do padrão]"));
    assert!(text.contains("- ❌ Nenhum material ultrapassou o consumo médio."));
}

#[test]
fn report_follows_translator_language() {
    let az = WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"));
    let results = az
        .analyze(&AnalysisInput::new(100.0).select("Cimento").select("Gesso"))
        .expect("analysis");
    let verdict = evaluate_seal(&results, 100.0).expect("verdict");
    let pt = render_report(&results, &verdict, 100.0, at(9, 0, 0));
    let en = render_report_with(
        &Translator::new("en"),
        &results,
        &verdict,
        100.0,
        at(9, 0, 0),
        &SealThresholds::default(),
    );
    assert_ne!(pt, en);
    assert_eq!(pt.lines().count(), en.lines().count());
    assert!(pt.contains("✅ CONCEDIDO"));
}

#[test]
fn totals_sum_all_materials() {
    let az = WasteAnalyzer::new(MaterialCatalog::builtin().expect("catalog"));
    let results = az
        .analyze(&AnalysisInput::new(100.0).select("Concreto").select("Cimento"))
        .expect("analysis");
    let totals = AnalysisTotals::from_results(&results);
    assert!((totals.waste_kg - 1_590.0).abs() < 1e-9);
    assert!((totals.co2_kg - 343.5).abs() < 1e-9);
}

#[test]
fn file_name_uses_minute_timestamp() {
    assert_eq!(
        report_file_name(at(14, 30, 59)),
        "relatorio_residuos_2024-05-01_14-30.txt"
    );
}

#[test]
fn report_is_written_to_directory() {
    let dir = std::env::temp_dir().join(format!("cwt_report_{}", std::process::id()));
    let path = write_report(&dir, at(10, 5, 0), "conteúdo").expect("write");
    assert_eq!(path, dir.join("relatorio_residuos_2024-05-01_10-05.txt"));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "conteúdo");
    let _ = std::fs::remove_dir_all(&dir);
}
