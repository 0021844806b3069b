//! Solve requests: which endpoint a mode maps to and what it sends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level calculator tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Algebra,
    Equation,
    Trig,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Algebra, Tab::Equation, Tab::Trig];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Algebra => "ANALYSIS",
            Tab::Equation => "SOLVER",
            Tab::Trig => "TRIGONOMETRY",
        }
    }
}

/// Sub-mode of the trigonometry tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrigMode {
    /// Analyze a single angle
    #[default]
    Angle,
    /// Find all six functions from one known value
    Func,
}

impl TrigMode {
    pub fn toggle(self) -> Self {
        match self {
            TrigMode::Angle => TrigMode::Func,
            TrigMode::Func => TrigMode::Angle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrigMode::Angle => "Angle Analysis",
            TrigMode::Func => "Find Functions",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunc {
    #[default]
    Sin,
    Cos,
    Tan,
}

impl TrigFunc {
    pub fn next(self) -> Self {
        match self {
            TrigFunc::Sin => TrigFunc::Cos,
            TrigFunc::Cos => TrigFunc::Tan,
            TrigFunc::Tan => TrigFunc::Sin,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrigFunc::Sin => "sin",
            TrigFunc::Cos => "cos",
            TrigFunc::Tan => "tan",
        }
    }
}

impl fmt::Display for TrigFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quadrant number, always 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quadrant(u8);

impl Quadrant {
    pub const FIRST: Quadrant = Quadrant(1);

    pub fn new(number: u8) -> Option<Self> {
        (1..=4).contains(&number).then_some(Quadrant(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Quadrant(self.0 % 4 + 1)
    }
}

impl Default for Quadrant {
    fn default() -> Self {
        Quadrant::FIRST
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Remote endpoints of the solving service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Algebra,
    Equation,
    TrigAnalyze,
    TrigFunctions,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Algebra => "/solve/algebra",
            Endpoint::Equation => "/solve/equation",
            Endpoint::TrigAnalyze => "/solve/trig/analyze",
            Endpoint::TrigFunctions => "/solve/trig/functions",
        }
    }
}

/// Immutable snapshot of one submission.
///
/// Serializes to exactly the JSON body the endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SolveRequest {
    Algebra {
        expression: String,
    },
    Equation {
        expression: String,
    },
    AnalyzeAngle {
        angle: String,
        is_radians: bool,
    },
    TrigFunctions {
        func: TrigFunc,
        value: String,
        quadrant: Quadrant,
    },
}

impl SolveRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SolveRequest::Algebra { .. } => Endpoint::Algebra,
            SolveRequest::Equation { .. } => Endpoint::Equation,
            SolveRequest::AnalyzeAngle { .. } => Endpoint::TrigAnalyze,
            SolveRequest::TrigFunctions { .. } => Endpoint::TrigFunctions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payloads_use_wire_field_names() {
        let algebra = SolveRequest::Algebra {
            expression: "x^2-1".into(),
        };
        assert_eq!(
            serde_json::to_value(&algebra).unwrap(),
            json!({ "expression": "x^2-1" })
        );

        let angle = SolveRequest::AnalyzeAngle {
            angle: "π/3".into(),
            is_radians: true,
        };
        assert_eq!(
            serde_json::to_value(&angle).unwrap(),
            json!({ "angle": "π/3", "is_radians": true })
        );

        let funcs = SolveRequest::TrigFunctions {
            func: TrigFunc::Tan,
            value: "3/4".into(),
            quadrant: Quadrant::new(3).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&funcs).unwrap(),
            json!({ "func": "tan", "value": "3/4", "quadrant": 3 })
        );
    }

    #[test]
    fn endpoints_map_to_paths() {
        let equation = SolveRequest::Equation {
            expression: "2*x+5=15".into(),
        };
        assert_eq!(equation.endpoint().path(), "/solve/equation");
        assert_eq!(Endpoint::TrigFunctions.path(), "/solve/trig/functions");
    }

    #[test]
    fn quadrant_stays_in_range() {
        assert!(Quadrant::new(0).is_none());
        assert!(Quadrant::new(5).is_none());
        assert_eq!(Quadrant::new(4).unwrap().next().number(), 1);
    }
}
