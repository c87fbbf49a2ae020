use serde::{Deserialize, Serialize};

/// 질량 단위. 내부 기준은 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Kilogram,
    Tonne,
    Pound,
}

impl MassUnit {
    pub const ALL: [MassUnit; 3] = [MassUnit::Kilogram, MassUnit::Tonne, MassUnit::Pound];

    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Kilogram => "kg",
            MassUnit::Tonne => "t",
            MassUnit::Pound => "lb",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "kg" => Some(MassUnit::Kilogram),
            "t" | "ton" | "tonne" => Some(MassUnit::Tonne),
            "lb" | "lbs" => Some(MassUnit::Pound),
            _ => None,
        }
    }
}

fn to_kg(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Kilogram => value,
        MassUnit::Tonne => value * 1000.0,
        MassUnit::Pound => value * 0.453_592_37,
    }
}

fn from_kg(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Kilogram => value,
        MassUnit::Tonne => value / 1000.0,
        MassUnit::Pound => value / 0.453_592_37,
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    let base = to_kg(value, from);
    from_kg(base, to)
}
