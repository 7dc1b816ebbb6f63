//! API response types matching the wire contract

use lematrice::Matrix;
use lestats::StatsSummary;
use serde::Serialize;

/// The two factors of the decomposition
#[derive(Debug, Clone, Serialize)]
pub struct FactorPair {
    /// Orthogonal-columns factor, same dimensions as the input
    #[serde(rename = "Q")]
    pub q: Matrix,

    /// Upper-triangular factor, square with the input's column count
    #[serde(rename = "R")]
    pub r: Matrix,
}

/// Statistics section of a successful response
///
/// Re-emits the collaborator's summary without its transport-level
/// `success`/`message` fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSection {
    /// Largest value across both factors
    pub max_value: f64,

    /// Smallest value across both factors
    pub min_value: f64,

    /// Mean of all values
    pub promedio: f64,

    /// Sum of all values
    pub total_sum: f64,

    /// Whether both factors are diagonal
    pub is_diagonal: bool,

    /// Total number of elements inspected
    pub total_elements: u64,
}

impl From<StatsSummary> for StatisticsSection {
    fn from(summary: StatsSummary) -> Self {
        Self {
            max_value: summary.max_value,
            min_value: summary.min_value,
            promedio: summary.promedio,
            total_sum: summary.total_sum,
            is_diagonal: summary.is_diagonal,
            total_elements: summary.total_elements,
        }
    }
}

/// Response for the factorization endpoint
///
/// `success` reflects the factorization alone; `statistics` is present only
/// when the downstream call succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct QrResponse {
    /// Whether the factorization completed
    pub success: bool,

    /// The computed factor pair
    pub result: FactorPair,

    /// Human-readable status message
    pub message: String,

    /// Optional statistics enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsSection>,
}
