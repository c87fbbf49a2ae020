use std::collections::HashMap;

use crate::catalog::{MaterialCatalog, MaterialSpec};
use crate::units::ConsumptionUnit;

/// 폐기물 분석 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// 카탈로그에 없는 자재 이름
    UnknownMaterial(String),
    /// 면적, 사용자 소비량 등 입력값 오류
    InvalidInput(String),
    /// 선택된 자재가 없음
    EmptySelection,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::UnknownMaterial(name) => write!(f, "알 수 없는 자재: {name}"),
            AnalysisError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
            AnalysisError::EmptySelection => write!(f, "자재를 하나 이상 선택하세요."),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// 분석 입력.
///
/// `overrides`에 0을 넣으면 "사용자 값 없음"으로 보고 기준 소비량을 쓴다.
/// 명시적인 0 소비량은 표현할 수 없다.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    /// 시공 면적 [m²]
    pub area_m2: f64,
    /// 선택 순서를 유지하는 자재 이름 목록
    pub selected: Vec<String>,
    /// 자재 이름 → 사용자 지정 면적당 소비량
    pub overrides: HashMap<String, f64>,
}

impl AnalysisInput {
    pub fn new(area_m2: f64) -> Self {
        Self {
            area_m2,
            ..Default::default()
        }
    }

    pub fn select(mut self, name: impl Into<String>) -> Self {
        self.selected.push(name.into());
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, consumption: f64) -> Self {
        self.overrides.insert(name.into(), consumption);
        self
    }

    /// 분석 전에 입력을 검증한다.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "면적은 0보다 커야 합니다 (입력값 {}).",
                self.area_m2
            )));
        }
        if self.selected.is_empty() {
            return Err(AnalysisError::EmptySelection);
        }
        for (i, name) in self.selected.iter().enumerate() {
            if self.selected[..i].contains(name) {
                return Err(AnalysisError::InvalidInput(format!(
                    "자재가 중복 선택되었습니다: {name}"
                )));
            }
        }
        for (name, value) in &self.overrides {
            if !value.is_finite() || *value < 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "{name} 소비량은 0 이상이어야 합니다 (입력값 {value})."
                )));
            }
            if !self.selected.contains(name) {
                return Err(AnalysisError::InvalidInput(format!(
                    "선택되지 않은 자재의 소비량이 지정되었습니다: {name}"
                )));
            }
        }
        Ok(())
    }
}

/// 자재별 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialResult {
    pub name: String,
    pub unit: ConsumptionUnit,
    /// 실제 적용된 면적당 소비량
    pub effective_consumption: f64,
    /// 소비량 × 면적 (자재 고유 단위)
    pub total_consumption: f64,
    /// kg으로 환산한 소비 질량
    pub mass_kg: f64,
    pub waste_kg: f64,
    pub co2_kg: f64,
    /// 사용자 소비량이 기준 소비량을 초과했는지 여부
    pub exceeded_default: bool,
    pub disposal_note: String,
    pub reuse_note: String,
}

/// 카탈로그를 보유하고 분석을 수행한다. 실행 간 공유 상태는 없다.
#[derive(Debug, Clone)]
pub struct WasteAnalyzer {
    catalog: MaterialCatalog,
}

impl WasteAnalyzer {
    pub fn new(catalog: MaterialCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    /// 선택된 자재별 소비량, 폐기물, CO₂를 계산한다. 결과 순서는 선택 순서와 같다.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<Vec<MaterialResult>, AnalysisError> {
        input.validate()?;
        let results = input
            .selected
            .iter()
            .map(|name| {
                let spec = self
                    .catalog
                    .get(name)
                    .ok_or_else(|| AnalysisError::UnknownMaterial(name.clone()))?;
                let consumption = effective_consumption(spec, input.overrides.get(name).copied());
                Ok(compute_material(spec, consumption, input.area_m2))
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;
        tracing::debug!(
            area_m2 = input.area_m2,
            materials = results.len(),
            "waste analysis finished"
        );
        Ok(results)
    }
}

/// 사용자 값이 있고 0보다 크면 그 값을, 아니면 기준 소비량을 쓴다.
pub fn effective_consumption(spec: &MaterialSpec, user_value: Option<f64>) -> f64 {
    match user_value {
        Some(v) if v > 0.0 => v,
        _ => spec.default_consumption,
    }
}

/// 자재 하나에 대한 소비량/질량/폐기물/CO₂ 계산.
pub fn compute_material(spec: &MaterialSpec, consumption: f64, area_m2: f64) -> MaterialResult {
    let total_consumption = consumption * area_m2;
    let mass_kg = spec.unit.to_mass_kg(total_consumption, spec.density);
    let waste_kg = mass_kg * spec.waste_fraction;
    let co2_kg = waste_kg * spec.co2_factor_per_kg;
    MaterialResult {
        name: spec.name.clone(),
        unit: spec.unit,
        effective_consumption: consumption,
        total_consumption,
        mass_kg,
        waste_kg,
        co2_kg,
        exceeded_default: consumption > spec.default_consumption,
        disposal_note: spec.disposal_note.clone(),
        reuse_note: spec.reuse_note.clone(),
    }
}
