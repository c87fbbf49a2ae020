use serde::{Deserialize, Serialize};

/// 자재 소비량(면적당) 단위.
///
/// 체적/개수 기준 소비량은 밀도(kg/m³ 또는 kg/개)를 곱해 kg으로 환산하고,
/// 질량 기준 소비량은 그대로 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumptionUnit {
    /// m³/m²
    VolumePerArea,
    /// un/m²
    CountPerArea,
    /// kg/m²
    MassPerArea,
}

impl ConsumptionUnit {
    /// 면적당 소비량 표기 (예: "m³/m²").
    pub fn rate_label(self) -> &'static str {
        match self {
            ConsumptionUnit::VolumePerArea => "m³/m²",
            ConsumptionUnit::CountPerArea => "un/m²",
            ConsumptionUnit::MassPerArea => "kg/m²",
        }
    }

    /// 총 소비량 표기 (예: "m³").
    pub fn quantity_label(self) -> &'static str {
        match self {
            ConsumptionUnit::VolumePerArea => "m³",
            ConsumptionUnit::CountPerArea => "un",
            ConsumptionUnit::MassPerArea => "kg",
        }
    }

    /// 밀도가 질량 환산에 쓰이는지 여부.
    pub fn uses_density(self) -> bool {
        !matches!(self, ConsumptionUnit::MassPerArea)
    }

    /// 총 소비량을 kg으로 환산한다. 질량 단위면 밀도는 무시한다.
    pub fn to_mass_kg(self, total_consumption: f64, density: f64) -> f64 {
        if self.uses_density() {
            total_consumption * density
        } else {
            total_consumption
        }
    }
}
