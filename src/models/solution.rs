use serde::{ Deserialize, Serialize };

/// One explanatory line of a worked solution; may embed `$...$` math markup
pub type SolutionStep = String;

/// Structured result of solving one equation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSolution {
    /// Steps in display order
    pub steps: Vec<SolutionStep>,
    /// Never empty once a parse has succeeded
    pub final_answer: String,
    /// The equation that was solved, wrapped in one pair of `$` delimiters
    pub original_equation: String,
}

impl ParsedSolution {
    /// True when no worked steps survived parsing, e.g. when the only step
    /// was promoted to the final answer
    pub fn is_degraded(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Where the equation for a solution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationSource {
    Image,
    Text,
}
