//! 건설 자재 기준 데이터(폐기율, CO₂ 계수, 기준 소비량, 밀도, 처리/재사용 안내).
//!
//! 카탈로그는 생성 시점에 모든 항목을 검증한다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::units::ConsumptionUnit;

/// 밀도가 지정되지 않은 자재의 기본 밀도.
pub const DEFAULT_DENSITY: f64 = 1000.0;

fn default_density() -> f64 {
    DEFAULT_DENSITY
}

/// 카탈로그 한 항목. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub name: String,
    /// 소비 질량 중 폐기물이 되는 비율(0~1)
    pub waste_fraction: f64,
    /// 폐기물 kg당 CO₂ 배출량 [kg CO₂/kg]
    pub co2_factor_per_kg: f64,
    /// 면적당 기준 소비량 (단위는 `unit`)
    pub default_consumption: f64,
    pub unit: ConsumptionUnit,
    /// kg/m³ 또는 kg/개. 질량 단위 자재는 사용하지 않으며 검증도 하지 않는다.
    #[serde(default = "default_density")]
    pub density: f64,
    pub disposal_note: String,
    pub reuse_note: String,
}

/// 카탈로그 로드/검증 오류.
#[derive(Debug)]
pub enum CatalogError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 항목 값이 허용 범위를 벗어남
    Invalid { name: String, reason: &'static str },
    /// 같은 이름의 자재가 두 번 이상 등장
    Duplicate(String),
    /// 자재가 하나도 없음
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "카탈로그 파일 입출력 오류: {e}"),
            CatalogError::Parse(e) => write!(f, "카탈로그 파싱 오류: {e}"),
            CatalogError::Invalid { name, reason } => {
                write!(f, "잘못된 자재 항목 '{name}': {reason}")
            }
            CatalogError::Duplicate(name) => write!(f, "중복된 자재 이름: {name}"),
            CatalogError::Empty => write!(f, "카탈로그에 자재가 없습니다."),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        CatalogError::Io(value)
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(value: toml::de::Error) -> Self {
        CatalogError::Parse(value)
    }
}

/// 이름 → 자재 사양 조회용 불변 카탈로그. 항목 순서는 정의 순서를 유지한다.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: Vec<MaterialSpec>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    materials: Vec<MaterialSpec>,
}

impl MaterialCatalog {
    /// 항목을 검증한 뒤 카탈로그를 만든다.
    pub fn new(materials: Vec<MaterialSpec>) -> Result<Self, CatalogError> {
        if materials.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, spec) in materials.iter().enumerate() {
            validate(spec)?;
            if materials[..i].iter().any(|m| m.name == spec.name) {
                return Err(CatalogError::Duplicate(spec.name.clone()));
            }
        }
        Ok(Self { materials })
    }

    /// 프로그램에 내장된 기본 자재표.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN.iter().map(BuiltinMaterial::to_spec).collect())
    }

    /// `[[materials]]` 배열 형식의 TOML 문자열에서 카탈로그를 읽는다.
    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(src)?;
        Self::new(file.materials)
    }

    /// TOML 카탈로그 파일을 읽는다.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            materials = catalog.len(),
            "loaded material catalog"
        );
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&MaterialSpec> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialSpec> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

fn validate(spec: &MaterialSpec) -> Result<(), CatalogError> {
    let invalid = |reason| {
        Err(CatalogError::Invalid {
            name: spec.name.clone(),
            reason,
        })
    };
    if spec.name.trim().is_empty() {
        return invalid("이름이 비어 있습니다.");
    }
    if !spec.waste_fraction.is_finite() || !(0.0..=1.0).contains(&spec.waste_fraction) {
        return invalid("폐기율은 0~1 범위여야 합니다.");
    }
    if !spec.co2_factor_per_kg.is_finite() || spec.co2_factor_per_kg < 0.0 {
        return invalid("CO₂ 계수는 0 이상이어야 합니다.");
    }
    if !spec.default_consumption.is_finite() || spec.default_consumption < 0.0 {
        return invalid("기준 소비량은 0 이상이어야 합니다.");
    }
    if spec.unit.uses_density() && (!spec.density.is_finite() || spec.density <= 0.0) {
        return invalid("밀도는 0보다 커야 합니다.");
    }
    Ok(())
}

struct BuiltinMaterial {
    name: &'static str,
    waste_fraction: f64,
    co2_factor_per_kg: f64,
    default_consumption: f64,
    unit: ConsumptionUnit,
    density: f64,
    disposal_note: &'static str,
    reuse_note: &'static str,
}

impl BuiltinMaterial {
    fn to_spec(&self) -> MaterialSpec {
        MaterialSpec {
            name: self.name.to_string(),
            waste_fraction: self.waste_fraction,
            co2_factor_per_kg: self.co2_factor_per_kg,
            default_consumption: self.default_consumption,
            unit: self.unit,
            density: self.density,
            disposal_note: self.disposal_note.to_string(),
            reuse_note: self.reuse_note.to_string(),
        }
    }
}

const BUILTIN: &[BuiltinMaterial] = &[
    BuiltinMaterial {
        name: "Concreto",
        waste_fraction: 0.12,
        co2_factor_per_kg: 0.15,
        default_consumption: 0.05,
        unit: ConsumptionUnit::VolumePerArea,
        density: 2400.0,
        disposal_note: "Descarte em caçambas",
        reuse_note: "Pode ser triturado",
    },
    BuiltinMaterial {
        name: "Cimento",
        waste_fraction: 0.10,
        co2_factor_per_kg: 0.85,
        default_consumption: 15.0,
        unit: ConsumptionUnit::MassPerArea,
        density: DEFAULT_DENSITY,
        disposal_note: "Evitar solo e água",
        reuse_note: "Usar em argamassa",
    },
    BuiltinMaterial {
        name: "Areia",
        waste_fraction: 0.05,
        co2_factor_per_kg: 0.01,
        default_consumption: 0.006,
        unit: ConsumptionUnit::VolumePerArea,
        density: 1600.0,
        disposal_note: "Descarte controlado",
        reuse_note: "Pode ser misturada com nova areia",
    },
    BuiltinMaterial {
        name: "Tijolo",
        waste_fraction: 0.20,
        co2_factor_per_kg: 0.12,
        default_consumption: 60.0,
        unit: ConsumptionUnit::CountPerArea,
        density: 3.5,
        disposal_note: "Descarte autorizado",
        reuse_note: "Reutilizável em calçadas",
    },
    BuiltinMaterial {
        name: "Madeira",
        waste_fraction: 0.08,
        co2_factor_per_kg: 0.10,
        default_consumption: 0.01,
        unit: ConsumptionUnit::VolumePerArea,
        density: 600.0,
        disposal_note: "Reciclagem ou compostagem",
        reuse_note: "Reutilização em pequenas obras",
    },
    BuiltinMaterial {
        name: "Aço",
        waste_fraction: 0.07,
        co2_factor_per_kg: 1.80,
        default_consumption: 20.0,
        unit: ConsumptionUnit::MassPerArea,
        density: DEFAULT_DENSITY,
        disposal_note: "Enviar para reciclagem",
        reuse_note: "100% reciclável",
    },
    BuiltinMaterial {
        name: "Ferro",
        waste_fraction: 0.08,
        co2_factor_per_kg: 1.80,
        default_consumption: 1.0,
        unit: ConsumptionUnit::MassPerArea,
        density: DEFAULT_DENSITY,
        disposal_note: "Lavar para ferro-velho",
        reuse_note: "Pode ser fundido",
    },
    BuiltinMaterial {
        name: "Gesso",
        waste_fraction: 0.30,
        co2_factor_per_kg: 0.18,
        default_consumption: 7.0,
        unit: ConsumptionUnit::MassPerArea,
        density: DEFAULT_DENSITY,
        disposal_note: "Evitar solo e água",
        reuse_note: "Usar em argamassa",
    },
];

// NOTE:
// - 계수는 참고용 평균치이며 실제 현장 기준(자재 사양서, 지역 배출계수)으로 검증해야 한다.
// - 벽돌(Tijolo)의 밀도는 개당 질량[kg/개]으로 해석한다.
