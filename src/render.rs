//! Solve Result → display fragments
//!
//! This is a pure mapping. The TUI draws the fragments with ratatui and the
//! one-shot `solve` command prints them through their `Display` impl.

use crate::chart::ViewDescriptor;
use crate::latex::Typesetter;
use crate::solver::response::{AngleAnalysis, Benchmarks, ExpressionResult, TrigFunctions};
use crate::solver::SolveResult;
use std::fmt;

/// One cell of the per-quadrant solution grid
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantCell {
    pub label: String,
    pub angle: String,
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Typeset expression; `emphasis` marks the final answer
    Expression { text: String, emphasis: bool },
    /// Labelled value
    Field { label: String, value: String },
    /// Unit-circle diagram
    Chart(ViewDescriptor),
    /// The six trigonometric function values
    FunctionGrid(Vec<(String, String)>),
    QuadrantGrid(Vec<QuadrantCell>),
    Benchmarks {
        human: String,
        machine: String,
        speedup: String,
    },
}

/// Map a result to its fragments, in display order
pub fn fragments(result: &SolveResult, typesetter: &dyn Typesetter) -> Vec<Fragment> {
    let mut out = match result {
        SolveResult::Expression(r) => expression(r, typesetter),
        SolveResult::AngleAnalysis(r) => angle_analysis(r, typesetter),
        SolveResult::TrigFunctions(r) => trig_functions(r, typesetter),
    };
    if let Some(chart) = result.chart_view() {
        out.insert(0, Fragment::Chart(chart));
    }
    if let Some(bench) = result.benchmarks() {
        out.push(benchmarks(bench));
    }
    out
}

fn expression(r: &ExpressionResult, ts: &dyn Typesetter) -> Vec<Fragment> {
    vec![
        Fragment::Expression {
            text: ts.render(&r.original_latex),
            emphasis: false,
        },
        Fragment::Expression {
            text: ts.render(&r.final_latex),
            emphasis: true,
        },
        field("TYPE", r.kind.clone()),
    ]
}

fn angle_analysis(r: &AngleAnalysis, ts: &dyn Typesetter) -> Vec<Fragment> {
    let mut out = Vec::new();
    if let Some(input) = &r.input_interpretation {
        out.push(field("Input", ts.render(input)));
    }
    out.push(field("Quadrant", r.quadrant.clone()));
    out.push(field("Radian", ts.render(&r.base_rad)));
    out.push(field("Pos", degrees(r.base_deg)));
    out.push(field("Neg", degrees(r.neg_deg)));
    if let (Some(pos), Some(neg)) = (r.extra_pos, r.extra_neg) {
        out.push(field("More", format!("{}, {}", degrees(pos), degrees(neg))));
    }
    out
}

fn trig_functions(r: &TrigFunctions, ts: &dyn Typesetter) -> Vec<Fragment> {
    let values = r
        .values()
        .iter()
        .map(|(name, latex)| (name.to_string(), ts.render(latex)))
        .collect();

    let cells = r
        .angles_analysis
        .iter()
        .map(|q| QuadrantCell {
            label: format!("Q{}", q.quad),
            angle: format!("{}°", ts.render(&q.angle_latex)),
            value: ts.render(&q.value_latex),
            selected: q.is_selected,
        })
        .collect();

    vec![Fragment::FunctionGrid(values), Fragment::QuadrantGrid(cells)]
}

fn benchmarks(bench: &Benchmarks) -> Fragment {
    Fragment::Benchmarks {
        human: format!("{}s", bench.human_time),
        machine: format!("{}s", bench.machine_time),
        speedup: format!("{}x", bench.speedup.grouped()),
    }
}

fn field(label: &str, value: String) -> Fragment {
    Fragment::Field {
        label: label.to_string(),
        value,
    }
}

fn degrees(value: f64) -> String {
    format!("{}°", value)
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Expression { text, emphasis } => {
                if *emphasis {
                    write!(f, "=> {}", text)
                } else {
                    write!(f, "   {}", text)
                }
            }
            Fragment::Field { label, value } => write!(f, "{}: {}", label, value),
            Fragment::Chart(view) => match &view.coords {
                Some(coords) => write!(f, "Chart: θ = {}°, P {}", view.angle, coords),
                None => write!(f, "Chart: θ = {}°", view.angle),
            },
            Fragment::FunctionGrid(values) => {
                let cells: Vec<String> = values
                    .iter()
                    .map(|(name, value)| format!("{} = {}", name, value))
                    .collect();
                write!(f, "{}", cells.join("   "))
            }
            Fragment::QuadrantGrid(cells) => {
                let cells: Vec<String> = cells
                    .iter()
                    .map(|c| {
                        let marker = if c.selected { "*" } else { " " };
                        format!("{}{} {} [{}]", marker, c.label, c.angle, c.value)
                    })
                    .collect();
                write!(f, "{}", cells.join("  "))
            }
            Fragment::Benchmarks {
                human,
                machine,
                speedup,
            } => write!(
                f,
                "Human estimate {} | machine {} | {} faster",
                human, machine, speedup
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::PlainTypesetter;
    use crate::solver::response::{Figure, QuadrantSolution};

    #[test]
    fn expression_result_has_no_chart() {
        let result = SolveResult::Expression(ExpressionResult {
            original_latex: "x^{2} - 1".into(),
            final_latex: "\\left(x - 1\\right) \\left(x + 1\\right)".into(),
            kind: "difference of squares".into(),
            benchmarks: None,
        });
        let frags = fragments(&result, &PlainTypesetter);
        assert_eq!(
            frags,
            vec![
                Fragment::Expression {
                    text: "x² - 1".into(),
                    emphasis: false
                },
                Fragment::Expression {
                    text: "(x - 1) (x + 1)".into(),
                    emphasis: true
                },
                Fragment::Field {
                    label: "TYPE".into(),
                    value: "difference of squares".into()
                },
            ]
        );
    }

    #[test]
    fn angle_analysis_leads_with_chart_and_ends_with_benchmarks() {
        let result = SolveResult::AngleAnalysis(AngleAnalysis {
            base_deg: 90.0,
            base_rad: "\\frac{\\pi}{2}".into(),
            neg_deg: -270.0,
            extra_pos: None,
            extra_neg: None,
            quadrant: "Axial (Y-Axis)".into(),
            input_interpretation: None,
            coords_latex: Some("\\left( 0, 1 \\right)".into()),
            benchmarks: Some(Benchmarks {
                human_time: Figure::Number(10.0),
                machine_time: Figure::Text("0.000500".into()),
                speedup: Figure::Number(20000.0),
            }),
        });
        let frags = fragments(&result, &PlainTypesetter);
        assert_eq!(
            frags.first(),
            Some(&Fragment::Chart(ViewDescriptor::new(
                90.0,
                Some("\\left( 0, 1 \\right)".into())
            )))
        );
        assert!(frags.contains(&Fragment::Field {
            label: "Radian".into(),
            value: "π/2".into()
        }));
        assert!(frags.contains(&Fragment::Field {
            label: "Neg".into(),
            value: "-270°".into()
        }));
        assert_eq!(
            frags.last(),
            Some(&Fragment::Benchmarks {
                human: "10s".into(),
                machine: "0.000500s".into(),
                speedup: "20,000x".into()
            })
        );
    }

    #[test]
    fn quadrant_grid_marks_selection() {
        let result = SolveResult::TrigFunctions(TrigFunctions {
            sin: "\\frac{1}{2}".into(),
            cos: "\\frac{\\sqrt{3}}{2}".into(),
            tan: "\\frac{\\sqrt{3}}{3}".into(),
            csc: "2".into(),
            sec: "\\frac{2 \\sqrt{3}}{3}".into(),
            cot: "\\sqrt{3}".into(),
            angles_analysis: vec![
                QuadrantSolution {
                    quad: 1,
                    angle_float: 30.0,
                    angle_latex: "30".into(),
                    value_latex: "\\frac{1}{2}".into(),
                    is_selected: true,
                },
                QuadrantSolution {
                    quad: 2,
                    angle_float: 150.0,
                    angle_latex: "150".into(),
                    value_latex: "\\frac{1}{2}".into(),
                    is_selected: false,
                },
            ],
            coords_latex: None,
            benchmarks: None,
        });
        let frags = fragments(&result, &PlainTypesetter);
        let Some(Fragment::QuadrantGrid(cells)) = frags.last() else {
            panic!("expected a quadrant grid last");
        };
        assert!(cells[0].selected);
        assert_eq!(cells[0].angle, "30°");
        assert_eq!(cells[1].label, "Q2");
        assert!(frags[0] == Fragment::Chart(ViewDescriptor::new(30.0, None)));
    }
}
