use serde::{ Deserialize, Serialize };

/// A sampled point; `y` is `None` where the expression is undefined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Points sampled from an extracted equation, ready for a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// The infix expression that was evaluated
    pub expression: String,
    pub points: Vec<GraphPoint>,
}

impl GraphData {
    pub fn defined_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(|p| p.y.map(|y| (p.x, y)))
    }
}
