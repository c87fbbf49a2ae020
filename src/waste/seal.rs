use serde::{Deserialize, Serialize};

use super::analyzer::{AnalysisError, MaterialResult};

/// 그린 실(Selo Verde) 판정 기준.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealThresholds {
    /// 면적당 허용 CO₂ [kg/m²], 경계값 포함
    pub max_co2_per_area: f64,
    /// 재사용 가능 자재 최소 비율 [%], 경계값 포함
    pub min_reuse_share_percent: f64,
    /// 재사용 안내문에 포함되면 재사용 가능으로 보는 키워드 (대소문자 무시)
    pub reuse_keywords: Vec<String>,
}

impl Default for SealThresholds {
    fn default() -> Self {
        Self {
            max_co2_per_area: 8.0,
            min_reuse_share_percent: 70.0,
            reuse_keywords: vec!["reutil".into(), "recicl".into(), "usar".into()],
        }
    }
}

impl SealThresholds {
    /// 재사용 안내문이 키워드 중 하나를 포함하는지 판정한다.
    pub fn is_reusable(&self, reuse_note: &str) -> bool {
        let note = reuse_note.to_lowercase();
        self.reuse_keywords
            .iter()
            .any(|kw| note.contains(&kw.to_lowercase()))
    }
}

/// 세 가지 판정 결과와 부가 수치.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SealVerdict {
    /// 기준 소비량을 초과한 자재가 없음
    pub no_exceedance: bool,
    /// 면적당 CO₂가 기준 이하
    pub co2_per_area_under_limit: bool,
    /// 재사용 가능 자재 비율이 기준 이상
    pub reuse_share_at_least_min: bool,
    /// 재사용 가능 자재 비율 [%]
    pub reuse_share_percent: f64,
    /// 면적당 CO₂ [kg/m²]
    pub co2_per_area: f64,
}

impl SealVerdict {
    /// 세 기준을 모두 만족할 때만 인증한다.
    pub fn granted(&self) -> bool {
        self.no_exceedance && self.co2_per_area_under_limit && self.reuse_share_at_least_min
    }
}

/// 기본 기준(8 kg/m², 70 %)으로 판정한다.
pub fn evaluate_seal(results: &[MaterialResult], area_m2: f64) -> Result<SealVerdict, AnalysisError> {
    evaluate_seal_with(results, area_m2, &SealThresholds::default())
}

/// 주어진 기준으로 판정한다. 결과가 비어 있으면 비율을 계산할 수 없으므로 오류.
pub fn evaluate_seal_with(
    results: &[MaterialResult],
    area_m2: f64,
    thresholds: &SealThresholds,
) -> Result<SealVerdict, AnalysisError> {
    if results.is_empty() {
        return Err(AnalysisError::EmptySelection);
    }
    if !area_m2.is_finite() || area_m2 <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "면적은 0보다 커야 합니다 (입력값 {area_m2})."
        )));
    }

    let no_exceedance = !results.iter().any(|r| r.exceeded_default);

    let total_co2: f64 = results.iter().map(|r| r.co2_kg).sum();
    let co2_per_area = total_co2 / area_m2;

    let reusable = results
        .iter()
        .filter(|r| thresholds.is_reusable(&r.reuse_note))
        .count();
    let reuse_share_percent = 100.0 * reusable as f64 / results.len() as f64;

    Ok(SealVerdict {
        no_exceedance,
        co2_per_area_under_limit: co2_per_area <= thresholds.max_co2_per_area,
        reuse_share_at_least_min: reuse_share_percent >= thresholds.min_reuse_share_percent,
        reuse_share_percent,
        co2_per_area,
    })
}
