//! LaTeX fragments to terminal text
//!
//! The solving service answers with LaTeX. A terminal cannot typeset it, so
//! [`PlainTypesetter`] rewrites the subset the service produces (fractions,
//! roots, Greek letters, degree marks, scripts) into readable Unicode.

/// Turns a LaTeX fragment into display text
pub trait Typesetter {
    fn render(&self, latex: &str) -> String;
}

/// Scanner-based LaTeX → Unicode conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTypesetter;

impl Typesetter for PlainTypesetter {
    fn render(&self, latex: &str) -> String {
        let mut scanner = Scanner::new(latex);
        let rendered = scanner.render_until(None);
        collapse_spaces(&rendered)
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Scanner {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Render until `close` (consumed) or end of input
    fn render_until(&mut self, close: Option<char>) -> String {
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if Some(c) == close {
                break;
            }
            match c {
                '\\' => out.push_str(&self.command()),
                '{' => out.push_str(&self.render_until(Some('}'))),
                '^' => {
                    let arg = self.argument();
                    out.push_str(&script(&arg, superscript, '^'));
                }
                '_' => {
                    let arg = self.argument();
                    out.push_str(&script(&arg, subscript, '_'));
                }
                '~' => out.push(' '),
                _ => out.push(c),
            }
        }
        out
    }

    /// A braced group, a command, or a single character
    fn argument(&mut self) -> String {
        self.skip_whitespace();
        match self.bump() {
            Some('{') => self.render_until(Some('}')),
            Some('\\') => self.command(),
            Some(c) => c.to_string(),
            None => String::new(),
        }
    }

    /// Optional `[...]` argument, used by `\sqrt[n]{x}`
    fn optional_argument(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.peek() != Some('[') {
            return None;
        }
        self.pos += 1;
        Some(self.render_until(Some(']')))
    }

    /// Verbatim braced group, used by `\text{...}`
    fn raw_group(&mut self) -> String {
        self.skip_whitespace();
        if self.peek() != Some('{') {
            return self.argument();
        }
        self.pos += 1;
        let mut depth = 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            out.push(c);
        }
        out
    }

    fn command(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        if name.is_empty() {
            // Control symbol such as \, \{ or \%
            return match self.bump() {
                Some(',') | Some(';') | Some(':') | Some(' ') | Some('!') => " ".to_string(),
                Some(c) => c.to_string(),
                None => String::new(),
            };
        }

        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let numerator = self.argument();
                let denominator = self.argument();
                format!("{}/{}", wrap(&numerator), wrap(&denominator))
            }
            "sqrt" => {
                let index = self.optional_argument();
                let radicand = self.argument();
                let root = match index.as_deref() {
                    Some("3") => "∛",
                    Some("4") => "∜",
                    Some(n) => return format!("{}√{}", superscript_or(n), wrap(&radicand)),
                    None => "√",
                };
                format!("{}{}", root, wrap(&radicand))
            }
            "text" | "mathrm" | "textrm" | "mathit" | "mathbf" | "operatorname" => self.raw_group(),
            "left" | "right" | "bigl" | "bigr" | "Bigl" | "Bigr" => {
                // The delimiter that follows is printed as-is; `.` means none
                self.skip_whitespace();
                if self.peek() == Some('.') {
                    self.pos += 1;
                }
                String::new()
            }
            "displaystyle" | "textstyle" | "limits" => String::new(),
            "quad" => "  ".to_string(),
            "qquad" => "    ".to_string(),
            other => symbol(other)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        }
    }
}

fn symbol(name: &str) -> Option<&'static str> {
    let glyph = match name {
        "pi" => "π",
        "theta" => "θ",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "phi" | "varphi" => "φ",
        "circ" => "°",
        "cdot" => "·",
        "times" => "×",
        "div" => "÷",
        "pm" => "±",
        "mp" => "∓",
        "infty" => "∞",
        "le" | "leq" => "≤",
        "ge" | "geq" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "in" => "∈",
        "emptyset" | "varnothing" => "∅",
        "mathbb" => "",
        _ => return None,
    };
    Some(glyph)
}

/// Parenthesize anything longer than a single term
fn wrap(s: &str) -> String {
    let trimmed = s.trim();
    let simple = trimmed.chars().count() <= 1
        || trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '√' || c == 'π');
    if simple {
        trimmed.to_string()
    } else {
        format!("({})", trimmed)
    }
}

fn script(arg: &str, map: fn(char) -> Option<char>, marker: char) -> String {
    let trimmed = arg.trim();
    if trimmed == "°" {
        return trimmed.to_string();
    }
    let mapped: Option<String> = trimmed.chars().map(map).collect();
    match mapped {
        Some(s) if !s.is_empty() => s,
        _ => format!("{}{}", marker, wrap(trimmed)),
    }
}

fn superscript_or(s: &str) -> String {
    script(s, superscript, '^')
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'x' => 'ˣ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        _ => return None,
    })
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
