//! 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod consumption;
pub mod mass;

pub use area::{convert_area, AreaUnit};
pub use consumption::ConsumptionUnit;
pub use mass::{convert_mass, MassUnit};
