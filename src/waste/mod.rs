//! 폐기물·CO₂ 계산과 그린 실 판정, 보고서 생성 모듈 모음.

pub mod analyzer;
pub mod badge;
pub mod report;
pub mod seal;

pub use analyzer::*;
pub use report::{render_report, render_report_with, report_file_name, AnalysisTotals};
pub use seal::*;
