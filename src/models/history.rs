use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::solution::{ EquationSource, ParsedSolution };

/// A solved equation kept in the history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub created_at: DateTime<Utc>,
    pub source: EquationSource,
    pub solution: ParsedSolution,
}

impl HistoryEntry {
    pub fn new(source: EquationSource, solution: ParsedSolution) -> Self {
        Self {
            created_at: Utc::now(),
            source,
            solution,
        }
    }
}
