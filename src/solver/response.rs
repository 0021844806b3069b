//! Response shapes returned by the solving service

use super::errors::SolveError;
use super::request::Endpoint;
use crate::chart::ViewDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Angle shown on the trig-functions chart when no quadrant is selected
const DEFAULT_FUNCTIONS_ANGLE: f64 = 45.0;

/// A number that the service may send either as JSON number or numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(f64),
    Text(String),
}

impl Figure {
    /// Integer part grouped in thousands, e.g. `1234567` → `1,234,567`
    pub fn grouped(&self) -> String {
        let raw = self.to_string();
        let (sign, digits) = match raw.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", raw.as_str()),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac)) => (int_part, Some(frac)),
            None => (digits, None),
        };
        if !int_part.chars().all(|c| c.is_ascii_digit()) {
            return raw;
        }
        let mut grouped = String::new();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        match frac_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", n),
            Figure::Text(s) => f.write_str(s),
        }
    }
}

/// Informational timing comparison attached to any result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub human_time: Figure,
    pub machine_time: Figure,
    pub speedup: Figure,
}

/// Result of `/solve/algebra` and `/solve/equation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResult {
    #[serde(default)]
    pub original_latex: String,
    #[serde(default)]
    pub final_latex: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<Benchmarks>,
}

/// Result of `/solve/trig/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleAnalysis {
    /// Smallest positive coterminal angle in degrees
    pub base_deg: f64,
    #[serde(default)]
    pub base_rad: String,
    #[serde(default)]
    pub neg_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_pos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_neg: Option<f64>,
    #[serde(default)]
    pub quadrant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_interpretation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords_latex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<Benchmarks>,
}

/// One quadrant's candidate angle in a functions result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantSolution {
    pub quad: u8,
    #[serde(default)]
    pub angle_float: f64,
    #[serde(default)]
    pub angle_latex: String,
    #[serde(default)]
    pub value_latex: String,
    #[serde(default)]
    pub is_selected: bool,
}

/// Result of `/solve/trig/functions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrigFunctions {
    #[serde(default)]
    pub sin: String,
    #[serde(default)]
    pub cos: String,
    #[serde(default)]
    pub tan: String,
    #[serde(default)]
    pub csc: String,
    #[serde(default)]
    pub sec: String,
    #[serde(default)]
    pub cot: String,
    #[serde(default)]
    pub angles_analysis: Vec<QuadrantSolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords_latex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<Benchmarks>,
}

impl TrigFunctions {
    /// The six function values in display order
    pub fn values(&self) -> [(&'static str, &str); 6] {
        [
            ("sin", &self.sin),
            ("cos", &self.cos),
            ("tan", &self.tan),
            ("csc", &self.csc),
            ("sec", &self.sec),
            ("cot", &self.cot),
        ]
    }

    pub fn selected(&self) -> Option<&QuadrantSolution> {
        self.angles_analysis.iter().find(|q| q.is_selected)
    }
}

/// A successful reply, shaped by the endpoint that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SolveResult {
    Expression(ExpressionResult),
    AngleAnalysis(AngleAnalysis),
    TrigFunctions(TrigFunctions),
}

impl SolveResult {
    pub fn benchmarks(&self) -> Option<&Benchmarks> {
        match self {
            SolveResult::Expression(r) => r.benchmarks.as_ref(),
            SolveResult::AngleAnalysis(r) => r.benchmarks.as_ref(),
            SolveResult::TrigFunctions(r) => r.benchmarks.as_ref(),
        }
    }

    /// Unit-circle view for trig results; expression results have none
    pub fn chart_view(&self) -> Option<ViewDescriptor> {
        match self {
            SolveResult::Expression(_) => None,
            SolveResult::AngleAnalysis(r) => {
                Some(ViewDescriptor::new(r.base_deg, r.coords_latex.clone()))
            }
            SolveResult::TrigFunctions(r) => {
                let angle = r
                    .selected()
                    .map(|q| q.angle_float)
                    .unwrap_or(DEFAULT_FUNCTIONS_ANGLE);
                Some(ViewDescriptor::new(angle, r.coords_latex.clone()))
            }
        }
    }
}

/// What a 2xx response meant
#[derive(Debug, Clone, PartialEq)]
pub enum SolveReply {
    Solved(SolveResult),
    /// The service answered `{"status": "error", "message": ...}`
    Rejected(String),
}

/// Classify a 2xx body for the endpoint that was called
pub fn parse_reply(endpoint: Endpoint, body: Value) -> Result<SolveReply, SolveError> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Ok(SolveReply::Rejected(message));
    }

    let result = match endpoint {
        Endpoint::Algebra | Endpoint::Equation => {
            serde_json::from_value(body).map(SolveResult::Expression)
        }
        Endpoint::TrigAnalyze => serde_json::from_value(body).map(SolveResult::AngleAnalysis),
        Endpoint::TrigFunctions => serde_json::from_value(body).map(SolveResult::TrigFunctions),
    }?;

    Ok(SolveReply::Solved(result))
}

/// Pull FastAPI's `detail` out of an error body
pub fn detail_of(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
