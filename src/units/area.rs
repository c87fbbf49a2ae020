use serde::{Deserialize, Serialize};

/// 면적 단위. 내부 기준은 제곱미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    SquareFoot,
    Hectare,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 3] = [AreaUnit::SquareMeter, AreaUnit::SquareFoot, AreaUnit::Hectare];

    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareFoot => "ft²",
            AreaUnit::Hectare => "ha",
        }
    }

    /// "m2", "ft2", "ha" 같은 입력 문자열을 단위로 해석한다.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m2" | "m²" | "sqm" => Some(AreaUnit::SquareMeter),
            "ft2" | "ft²" | "sqft" => Some(AreaUnit::SquareFoot),
            "ha" => Some(AreaUnit::Hectare),
            _ => None,
        }
    }
}

fn to_square_meter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => value,
        AreaUnit::SquareFoot => value * 0.092_903_04,
        AreaUnit::Hectare => value * 10_000.0,
    }
}

fn from_square_meter(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => value,
        AreaUnit::SquareFoot => value / 0.092_903_04,
        AreaUnit::Hectare => value / 10_000.0,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    let m2 = to_square_meter(value, from);
    from_square_meter(m2, to)
}
