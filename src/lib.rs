//! 핵심 계산 로직(자재 카탈로그, 폐기물·CO₂ 분석, 그린 실 판정, 보고서)을 라이브러리로 분리하여
//! CLI와 GUI가 함께 사용한다.

pub mod app;
pub mod catalog;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod ui_cli;
pub mod units;
pub mod waste;
