use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::catalog::CatalogError;
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice};
use crate::units::{convert_area, AreaUnit};
use crate::waste::badge::{self, BadgeImage};
use crate::waste::report;
use crate::waste::{
    evaluate_seal_with, AnalysisError, AnalysisInput, MaterialResult, SealVerdict, WasteAnalyzer,
};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 자재 카탈로그 오류
    Catalog(CatalogError),
    /// 폐기물 분석 오류
    Analysis(AnalysisError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Catalog(e) => write!(f, "카탈로그 오류: {e}"),
            AppError::Analysis(e) => write!(f, "분석 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        AppError::Catalog(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        AppError::Analysis(value)
    }
}

/// 분석 한 번의 입력. 면적은 설정된 면적 단위 기준이다.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub area: f64,
    pub area_unit: AreaUnit,
    pub materials: Vec<String>,
    pub overrides: Vec<(String, f64)>,
}

impl AnalysisRequest {
    /// 분석 코어 입력(면적 m²)으로 바꾼다.
    pub fn to_input(&self) -> AnalysisInput {
        let mut input = AnalysisInput::new(convert_area(
            self.area,
            self.area_unit,
            AreaUnit::SquareMeter,
        ));
        input.selected = self.materials.clone();
        input.overrides = self.overrides.iter().cloned().collect();
        input
    }
}

/// 분석 결과 묶음: 자재별 결과, 판정, 보고서 본문, (인증 시) 배지.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub area_m2: f64,
    pub results: Vec<MaterialResult>,
    pub verdict: SealVerdict,
    pub report: String,
    pub timestamp: NaiveDateTime,
    pub badge: Option<BadgeImage>,
}

/// 분석 → 판정 → 보고서 → 배지 순으로 실행한다.
/// 배지 이미지가 없으면 경고만 남기며 결과는 그대로 반환한다.
pub fn run_analysis(
    analyzer: &WasteAnalyzer,
    config: &Config,
    tr: &Translator,
    request: &AnalysisRequest,
    timestamp: NaiveDateTime,
) -> Result<AnalysisOutcome, AppError> {
    let input = request.to_input();
    let results = analyzer.analyze(&input)?;
    let verdict = evaluate_seal_with(&results, input.area_m2, &config.seal)?;
    let report = report::render_report_with(
        tr,
        &results,
        &verdict,
        input.area_m2,
        timestamp,
        &config.seal,
    );
    let badge = if verdict.granted() {
        badge::load_badge_or_warn(&config.badge_path)
    } else {
        None
    };
    tracing::info!(
        area_m2 = input.area_m2,
        materials = results.len(),
        granted = verdict.granted(),
        "analysis complete"
    );
    Ok(AnalysisOutcome {
        area_m2: input.area_m2,
        results,
        verdict,
        report,
        timestamp,
        badge,
    })
}

/// `NAME=VALUE` 형식의 사용자 소비량 인자를 해석한다.
pub fn parse_override_arg(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("'{arg}': NAME=VALUE 형식이어야 합니다."))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("'{arg}': 자재 이름이 비어 있습니다."));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{arg}': 숫자가 아닙니다."))?;
    Ok((name.to_string(), value))
}

/// 대화형 실행에 필요한 상태.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub analyzer: WasteAnalyzer,
}

impl Session {
    pub fn new(config: Config, config_path: &Path, cli_lang: &str) -> Result<Self, AppError> {
        let analyzer = WasteAnalyzer::new(config.load_catalog()?);
        let tr = translator_for(&config, cli_lang);
        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
            tr,
            analyzer,
        })
    }

    /// 설정이 바뀐 뒤 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        self.tr = translator_for(&self.config, "auto");
    }
}

/// CLI 인자 → 설정 → 시스템 로케일 순으로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: &str) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Analysis => {
                // 분석 오류는 메뉴로 돌아가 다시 입력받는다.
                if let Err(e) = ui_cli::handle_analysis(session) {
                    match e {
                        AppError::Analysis(AnalysisError::EmptySelection) => {
                            println!("{}", session.tr.t(i18n::keys::INFO_SELECT_AT_LEAST_ONE))
                        }
                        AppError::Analysis(err) => {
                            println!("{}: {err}", session.tr.t(i18n::keys::ERROR_PREFIX))
                        }
                        other => return Err(other),
                    }
                }
            }
            MenuChoice::Materials => ui_cli::handle_materials(session),
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.config.save_to(&session.config_path)?;
                session.reload_translator();
            }
            MenuChoice::Exit => {
                session.config.save_to(&session.config_path)?;
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
