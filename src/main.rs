use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use construction_waste_toolbox::app::{self, AnalysisRequest, AppError, Session};
use construction_waste_toolbox::units::AreaUnit;
use construction_waste_toolbox::waste::report::write_report;
use construction_waste_toolbox::{config, i18n, logging, ui_cli};

/// 건설 자재 폐기물·CO₂ 분석 및 그린 실 판정 CLI.
#[derive(Debug, Parser)]
#[command(name = "construction_waste_toolbox_cli", version, about)]
struct Cli {
    /// 언어 (auto/ko/en/pt)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 한 번 분석하고 결과를 출력한다.
    Analyze {
        /// 시공 면적
        #[arg(long)]
        area: f64,
        /// 면적 단위 (m2/ft2/ha). 생략하면 설정값.
        #[arg(long, value_parser = parse_area_unit)]
        area_unit: Option<AreaUnit>,
        /// 분석할 자재 (여러 번 지정 가능, 순서 유지)
        #[arg(short = 'm', long = "material", required = true)]
        materials: Vec<String>,
        /// 사용자 소비량 NAME=VALUE (0은 기준값 사용)
        #[arg(short = 'o', long = "override", value_parser = app::parse_override_arg)]
        overrides: Vec<(String, f64)>,
        /// 보고서를 저장할 디렉터리
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// 자재 목록을 출력한다.
    Materials,
}

fn parse_area_unit(s: &str) -> Result<AreaUnit, String> {
    AreaUnit::parse(s).ok_or_else(|| format!("알 수 없는 면적 단위: {s}"))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let tr = i18n::Translator::new(&i18n::resolve_language(&cli.lang, None));
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default_at(&cli.config)?;
    let mut session = Session::new(cfg, &cli.config, &cli.lang)?;
    match cli.command {
        None => app::run(&mut session),
        Some(Command::Materials) => {
            ui_cli::handle_materials(&session);
            Ok(())
        }
        Some(Command::Analyze {
            area,
            area_unit,
            materials,
            overrides,
            out,
        }) => {
            let request = AnalysisRequest {
                area,
                area_unit: area_unit.unwrap_or(session.config.area_unit),
                materials,
                overrides,
            };
            let outcome = app::run_analysis(
                &session.analyzer,
                &session.config,
                &session.tr,
                &request,
                Local::now().naive_local(),
            )?;
            ui_cli::print_outcome(&session.tr, &session.config, &outcome);
            if let Some(dir) = out {
                let path = write_report(&dir, outcome.timestamp, &outcome.report)?;
                println!(
                    "{}",
                    session.tr.tf(
                        i18n::keys::RESULT_REPORT_SAVED,
                        &[("path", path.display().to_string())]
                    )
                );
            }
            Ok(())
        }
    }
}
