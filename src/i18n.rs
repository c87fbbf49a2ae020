use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ANALYSIS: &str = "main_menu.analysis";
    pub const MAIN_MENU_MATERIALS: &str = "main_menu.materials";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const ANALYSIS_HEADING: &str = "analysis.heading";
    pub const PROMPT_AREA: &str = "prompt.area";
    pub const PROMPT_MATERIAL_SELECTION: &str = "prompt.material_selection";
    pub const INFO_SELECT_AT_LEAST_ONE: &str = "info.select_at_least_one";
    pub const OVERRIDE_HEADING: &str = "analysis.override_heading";
    pub const PROMPT_OVERRIDE: &str = "prompt.override";
    pub const RESULT_TABLE_HEADER: &str = "result.table_header";
    pub const PROMPT_SAVE_REPORT: &str = "prompt.save_report";
    pub const RESULT_REPORT_SAVED: &str = "result.report_saved";
    pub const BADGE_AVAILABLE: &str = "badge.available";
    pub const BADGE_MISSING: &str = "badge.missing";

    pub const MATERIALS_HEADING: &str = "materials.heading";
    pub const MATERIALS_TABLE_HEADER: &str = "materials.table_header";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_LANGUAGE_PROMPT: &str = "settings.language_prompt";
    pub const SETTINGS_AREA_UNIT_PROMPT: &str = "settings.area_unit_prompt";
    pub const SETTINGS_MASS_UNIT_PROMPT: &str = "settings.mass_unit_prompt";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_AREA: &str = "report.area";
    pub const REPORT_DETAIL_HEADING: &str = "report.detail_heading";
    pub const REPORT_WASTE: &str = "report.waste";
    pub const REPORT_CO2: &str = "report.co2";
    pub const REPORT_REUSE: &str = "report.reuse";
    pub const REPORT_DISPOSAL: &str = "report.disposal";
    pub const REPORT_EXCEEDED: &str = "report.exceeded";
    pub const REPORT_SUMMARY_HEADING: &str = "report.summary_heading";
    pub const REPORT_TOTAL_WASTE: &str = "report.total_waste";
    pub const REPORT_TOTAL_CO2: &str = "report.total_co2";
    pub const REPORT_SEAL_HEADING: &str = "report.seal_heading";
    pub const REPORT_SEAL_GRANTED: &str = "report.seal_granted";
    pub const REPORT_SEAL_DENIED: &str = "report.seal_denied";
    pub const REPORT_CRITERIA: &str = "report.criteria";
    pub const CRITERION_NO_EXCEEDANCE: &str = "criterion.no_exceedance";
    pub const CRITERION_CO2: &str = "criterion.co2";
    pub const CRITERION_REUSE: &str = "criterion.reuse";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Pt,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("pt") {
            Language::Pt
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    /// 내장 언어팩 위에 사용자 언어팩을 덮어쓴 키 → 문자열 맵
    overrides: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en/pt)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        let lang = Language::from_code(lang_code);
        Self {
            lang,
            overrides: built_in_pack(lang).unwrap_or_default(),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리에 있는 키만 내장 언어팩을 덮어쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let mut tr = Self::new(lang_code);
        let user_pack = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if let Some(user_pack) = user_pack {
            tracing::debug!(lang = lang_code, keys = user_pack.len(), "language pack overrides loaded");
            tr.overrides.extend(user_pack);
        }
        tr
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.get(key).cloned()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 → 키 순으로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key),
            Language::En => en(key),
            Language::Pt => pt(key),
        };
        builtin
            .or_else(|| en(key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// `{name}` 형식 자리표시자를 채운 번역을 반환한다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// 템플릿 문자열의 `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("pt") => Some("pt".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if matches!(lang.as_str(), "ko" | "en" | "pt") {
        Some(lang)
    } else {
        None
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 맵(중첩 테이블 허용).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 바이너리에 포함된 GUI 문자열 언어팩.
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko.toml")),
        Language::En => parse_toml_to_map(include_str!("../locales/en.toml")),
        Language::Pt => parse_toml_to_map(include_str!("../locales/pt.toml")),
    }
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 건설 폐기물 분석 도구 ===",
        MAIN_MENU_ANALYSIS => "1) 폐기물·CO₂ 분석",
        MAIN_MENU_MATERIALS => "2) 자재 목록",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "0 이상의 숫자를 입력하세요.",
        ANALYSIS_HEADING => "\n-- 폐기물·CO₂ 분석 --",
        PROMPT_AREA => "시공 면적 [{unit}]: ",
        PROMPT_MATERIAL_SELECTION => "분석할 자재 번호(쉼표로 구분): ",
        INFO_SELECT_AT_LEAST_ONE => "자재를 하나 이상 선택하세요.",
        OVERRIDE_HEADING => "사용자 소비량 (선택, 엔터 또는 0 = 기준값)",
        PROMPT_OVERRIDE => "{name} ({unit}, 기준: {default}): ",
        RESULT_TABLE_HEADER => "자재 | 총 소비량 | 질량 | 폐기물 | CO₂",
        PROMPT_SAVE_REPORT => "보고서를 저장할까요? (y/N): ",
        RESULT_REPORT_SAVED => "보고서를 저장했습니다: {path}",
        BADGE_AVAILABLE => "인증 배지: {path} ({width}x{height})",
        BADGE_MISSING => "경고: 인증 배지 이미지를 불러오지 못했습니다 ({path}).",
        MATERIALS_HEADING => "\n-- 자재 목록 --",
        MATERIALS_TABLE_HEADER => "자재 | 폐기율 | CO₂ [kg/kg] | 기준 소비량 | 밀도 | 재사용",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정: 언어={lang}, 면적 단위={area}, 질량 단위={mass}",
        SETTINGS_OPTIONS => "1) 언어  2) 면적 단위  3) 질량 단위",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_LANGUAGE_PROMPT => "언어 코드 (auto/ko/en/pt): ",
        SETTINGS_AREA_UNIT_PROMPT => "면적 단위 (m2/ft2/ha): ",
        SETTINGS_MASS_UNIT_PROMPT => "질량 단위 (kg/t/lb): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        REPORT_TITLE => "폐기물 분석 보고서",
        REPORT_AREA => "분석 면적",
        REPORT_DETAIL_HEADING => "--- 자재별 상세 ---",
        REPORT_WASTE => "폐기물",
        REPORT_CO2 => "CO₂",
        REPORT_REUSE => "재사용",
        REPORT_DISPOSAL => "처리",
        REPORT_EXCEEDED => "기준 초과",
        REPORT_SUMMARY_HEADING => "--- 종합 ---",
        REPORT_TOTAL_WASTE => "총 폐기물 발생량",
        REPORT_TOTAL_CO2 => "총 CO₂ 배출량",
        REPORT_SEAL_HEADING => "--- 그린 실 판정 ---",
        REPORT_SEAL_GRANTED => "✅ 인증",
        REPORT_SEAL_DENIED => "❌ 미인증",
        REPORT_CRITERIA => "판정 기준:",
        CRITERION_NO_EXCEEDANCE => "기준 소비량을 초과한 자재가 없습니다.",
        CRITERION_CO2 => "면적당 CO₂ ≤ {limit} kg (현재: {current} kg)",
        CRITERION_REUSE => "재사용 가능 자재 {percent}% (목표: ≥ {min}%)",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Construction Waste Toolbox ===",
        MAIN_MENU_ANALYSIS => "1) Waste & CO₂ analysis",
        MAIN_MENU_MATERIALS => "2) Material catalog",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number ≥ 0.",
        ANALYSIS_HEADING => "\n-- Waste & CO₂ analysis --",
        PROMPT_AREA => "Construction area [{unit}]: ",
        PROMPT_MATERIAL_SELECTION => "Material numbers to analyse (comma separated): ",
        INFO_SELECT_AT_LEAST_ONE => "Select at least one material.",
        OVERRIDE_HEADING => "Custom consumption (optional, enter or 0 = default)",
        PROMPT_OVERRIDE => "{name} ({unit}, default: {default}): ",
        RESULT_TABLE_HEADER => "Material | Total consumption | Mass | Waste | CO₂",
        PROMPT_SAVE_REPORT => "Save report? (y/N): ",
        RESULT_REPORT_SAVED => "Report saved: {path}",
        BADGE_AVAILABLE => "Seal badge: {path} ({width}x{height})",
        BADGE_MISSING => "Warning: could not load the seal badge image ({path}).",
        MATERIALS_HEADING => "\n-- Material catalog --",
        MATERIALS_TABLE_HEADER => "Material | Waste | CO₂ [kg/kg] | Default consumption | Density | Reuse",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current: language={lang}, area unit={area}, mass unit={mass}",
        SETTINGS_OPTIONS => "1) Language  2) Area unit  3) Mass unit",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_LANGUAGE_PROMPT => "Language code (auto/ko/en/pt): ",
        SETTINGS_AREA_UNIT_PROMPT => "Area unit (m2/ft2/ha): ",
        SETTINGS_MASS_UNIT_PROMPT => "Mass unit (kg/t/lb): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        REPORT_TITLE => "Waste Analysis Report",
        REPORT_AREA => "Analysed area",
        REPORT_DETAIL_HEADING => "--- Per-material detail ---",
        REPORT_WASTE => "Waste",
        REPORT_CO2 => "CO₂",
        REPORT_REUSE => "Reuse",
        REPORT_DISPOSAL => "Disposal",
        REPORT_EXCEEDED => "above default",
        REPORT_SUMMARY_HEADING => "--- Summary ---",
        REPORT_TOTAL_WASTE => "Total waste generated",
        REPORT_TOTAL_CO2 => "Total CO₂ emitted",
        REPORT_SEAL_HEADING => "--- Green seal result ---",
        REPORT_SEAL_GRANTED => "✅ GRANTED",
        REPORT_SEAL_DENIED => "❌ NOT GRANTED",
        REPORT_CRITERIA => "Criteria:",
        CRITERION_NO_EXCEEDANCE => "No material exceeded its default consumption.",
        CRITERION_CO2 => "CO₂ per m² ≤ {limit} kg (current: {current} kg)",
        CRITERION_REUSE => "{percent}% of materials are reusable (target: ≥ {min}%)",
        _ => return None,
    })
}

fn pt(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando.",
        MAIN_MENU_TITLE => "\n=== Análise de Resíduos de Materiais de Construção ===",
        MAIN_MENU_ANALYSIS => "1) Análise de resíduos e CO₂",
        MAIN_MENU_MATERIALS => "2) Materiais",
        MAIN_MENU_SETTINGS => "3) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Opção: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        ERROR_INVALID_NUMBER => "Informe um número ≥ 0.",
        ANALYSIS_HEADING => "\n-- Análise de resíduos e CO₂ --",
        PROMPT_AREA => "Área da obra [{unit}]: ",
        PROMPT_MATERIAL_SELECTION => "Materiais a serem analisados (números separados por vírgula): ",
        INFO_SELECT_AT_LEAST_ONE => "Selecione ao menos um material.",
        OVERRIDE_HEADING => "Consumo personalizado (opcional, enter ou 0 = padrão)",
        PROMPT_OVERRIDE => "{name} ({unit}, padrão: {default}): ",
        RESULT_TABLE_HEADER => "Material | Consumo Total | Consumo | Resíduo | CO₂",
        PROMPT_SAVE_REPORT => "Salvar relatório? (s/N): ",
        RESULT_REPORT_SAVED => "Relatório salvo: {path}",
        BADGE_AVAILABLE => "Selo: {path} ({width}x{height})",
        BADGE_MISSING => "⚠ Imagem do selo não encontrada ({path}).",
        MATERIALS_HEADING => "\n-- Materiais --",
        MATERIALS_TABLE_HEADER => "Material | Desperdício | CO₂ [kg/kg] | Consumo padrão | Densidade | Reutilização",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT => "Atual: idioma={lang}, unidade de área={area}, unidade de massa={mass}",
        SETTINGS_OPTIONS => "1) Idioma  2) Unidade de área  3) Unidade de massa",
        SETTINGS_PROMPT_CHANGE => "Número a alterar (enter para cancelar): ",
        SETTINGS_LANGUAGE_PROMPT => "Idioma (auto/ko/en/pt): ",
        SETTINGS_AREA_UNIT_PROMPT => "Unidade de área (m2/ft2/ha): ",
        SETTINGS_MASS_UNIT_PROMPT => "Unidade de massa (kg/t/lb): ",
        SETTINGS_INVALID => "Entrada inválida; nada foi alterado.",
        SETTINGS_SAVED => "Configurações salvas.",
        REPORT_TITLE => "Relatório de Análise de Resíduos",
        REPORT_AREA => "Área analisada",
        REPORT_DETAIL_HEADING => "--- Detalhamento por Material ---",
        REPORT_WASTE => "Resíduo",
        REPORT_CO2 => "CO₂",
        REPORT_REUSE => "Reutilização",
        REPORT_DISPOSAL => "Descarte",
        REPORT_EXCEEDED => "acima do padrão",
        REPORT_SUMMARY_HEADING => "--- Resumo Geral ---",
        REPORT_TOTAL_WASTE => "Total de resíduo gerado",
        REPORT_TOTAL_CO2 => "Total de emissão de CO₂",
        REPORT_SEAL_HEADING => "--- Resultado do Selo Verde ---",
        REPORT_SEAL_GRANTED => "✅ CONCEDIDO",
        REPORT_SEAL_DENIED => "❌ NÃO CONCEDIDO",
        REPORT_CRITERIA => "Critérios:",
        CRITERION_NO_EXCEEDANCE => "Nenhum material ultrapassou o consumo médio.",
        CRITERION_CO2 => "Emissão de CO₂ por m² ≤ {limit} kg (Atual: {current} kg)",
        CRITERION_REUSE => "{percent}% dos materiais têm reaproveitamento (Meta: ≥ {min}%)",
        _ => return None,
    })
}
