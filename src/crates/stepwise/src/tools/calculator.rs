//! Basic arithmetic on two operands.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Arithmetic failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperator(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an ASCII operator symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Parse an operator word such as "plus" or "times"
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "add" | "plus" => Some(Operator::Add),
            "subtract" | "minus" => Some(Operator::Subtract),
            "multiply" | "times" => Some(Operator::Multiply),
            "divide" | "over" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Symbol used in rendered expressions
    pub fn display_symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "addition",
            Operator::Subtract => "subtraction",
            Operator::Multiply => "multiplication",
            Operator::Divide => "division",
        }
    }

    fn apply(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide if b == 0.0 => Err(CalculatorError::DivisionByZero),
            Operator::Divide => Ok(a / b),
        }
    }
}

/// A finished calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Operation name, e.g. "multiplication"
    pub operation: String,
    pub operand1: f64,
    pub operand2: f64,
    pub result: f64,
    /// Rendered form, e.g. "5 × 6 = 30.0"
    pub expression: String,
}

/// An arithmetic request found in free text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticRequest {
    pub operator: Operator,
    pub operand1: f64,
    pub operand2: f64,
}

enum OperatorSource {
    Fixed(Operator),
    Symbol(usize),
    Word(usize),
}

struct DetectPattern {
    regex: Regex,
    operator: OperatorSource,
    operands: (usize, usize),
}

fn detect_pattern(pattern: &str, operator: OperatorSource, operands: (usize, usize)) -> DetectPattern {
    DetectPattern {
        regex: Regex::new(pattern).unwrap(),
        operator,
        operands,
    }
}

static DETECT_PATTERNS: LazyLock<Vec<DetectPattern>> = LazyLock::new(|| {
    use OperatorSource::*;
    vec![
        detect_pattern(r"(?i)\bwhat\s+is\s+([0-9]+)\s*([-+*/])\s*([0-9]+)", Symbol(2), (1, 3)),
        detect_pattern(
            r"(?i)([0-9]+)\s+(plus|minus|times|multiply|divide)\s+([0-9]+)",
            Word(2),
            (1, 3),
        ),
        detect_pattern(r"(?i)\badd\s+([0-9]+)\s+and\s+([0-9]+)", Fixed(Operator::Add), (1, 2)),
        detect_pattern(
            r"(?i)\bmultiply\s+([0-9]+)\s+and\s+([0-9]+)",
            Fixed(Operator::Multiply),
            (1, 2),
        ),
        detect_pattern(r"([0-9]+)\s*\+\s*([0-9]+)", Fixed(Operator::Add), (1, 2)),
        detect_pattern(r"([0-9]+)\s*\*\s*([0-9]+)", Fixed(Operator::Multiply), (1, 2)),
        detect_pattern(r"([0-9]+)\s*-\s*([0-9]+)", Fixed(Operator::Subtract), (1, 2)),
        detect_pattern(r"([0-9]+)\s*/\s*([0-9]+)", Fixed(Operator::Divide), (1, 2)),
    ]
});

impl DetectPattern {
    fn request(&self, caps: &Captures<'_>) -> Option<ArithmeticRequest> {
        let operator = match self.operator {
            OperatorSource::Fixed(op) => op,
            OperatorSource::Symbol(group) => Operator::from_symbol(caps.get(group)?.as_str())?,
            OperatorSource::Word(group) => Operator::from_word(caps.get(group)?.as_str())?,
        };
        Some(ArithmeticRequest {
            operator,
            operand1: parse_operand(caps.get(self.operands.0)?.as_str())?,
            operand2: parse_operand(caps.get(self.operands.1)?.as_str())?,
        })
    }
}

/// Parse a matched integer literal. Literals too large for a finite `f64`
/// are rejected.
pub(crate) fn parse_operand(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Two-operand calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    /// Apply the operator named by `symbol` to `a` and `b`
    pub fn apply(&self, symbol: &str, a: f64, b: f64) -> Result<Calculation, CalculatorError> {
        let operator = Operator::from_symbol(symbol)
            .ok_or_else(|| CalculatorError::UnsupportedOperator(symbol.to_string()))?;
        let result = operator.apply(a, b)?;

        Ok(Calculation {
            operation: operator.name().to_string(),
            operand1: a,
            operand2: b,
            result,
            expression: format!(
                "{} {} {} = {}",
                a,
                operator.display_symbol(),
                b,
                format_result_value(result)
            ),
        })
    }

    /// Find a single arithmetic request in `text`.
    ///
    /// Recognizes "what is 7 / 2", "8 minus 3", "add 2 and 2",
    /// "multiply 5 and 6" and bare `a op b` forms. The first matching shape
    /// wins.
    pub fn detect(text: &str) -> Option<ArithmeticRequest> {
        DETECT_PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .captures(text)
                .and_then(|caps| pattern.request(&caps))
        })
    }

    /// Render an outcome for display
    pub fn format_result(result: &Result<Calculation, CalculatorError>) -> String {
        match result {
            Ok(calc) => format!("Calculation: {}", calc.expression),
            Err(e) => format!("Calculation error: {}", e),
        }
    }
}

/// Results always carry a decimal point: `30.0`, `3.5`.
pub fn format_result_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_multiply() {
        let calc = Calculator::new().apply("*", 5.0, 6.0).unwrap();
        assert_eq!(calc.operation, "multiplication");
        assert_eq!(calc.result, 30.0);
        assert_eq!(calc.expression, "5 × 6 = 30.0");
    }

    #[test]
    fn test_apply_add() {
        let calc = Calculator::new().apply("+", 2.0, 2.0).unwrap();
        assert_eq!(calc.expression, "2 + 2 = 4.0");
    }

    #[test]
    fn test_apply_divide_fractional() {
        let calc = Calculator::new().apply("/", 7.0, 2.0).unwrap();
        assert_eq!(calc.operation, "division");
        assert_eq!(calc.expression, "7 ÷ 2 = 3.5");
    }

    #[test]
    fn test_apply_subtract_negative() {
        let calc = Calculator::new().apply("-", 3.0, 8.0).unwrap();
        assert_eq!(calc.expression, "3 - 8 = -5.0");
    }

    #[test]
    fn test_division_by_zero() {
        let err = Calculator::new().apply("/", 1.0, 0.0).unwrap_err();
        assert_eq!(err, CalculatorError::DivisionByZero);
        assert_eq!(err.to_string(), "Division by zero is not allowed");
    }

    #[test]
    fn test_unsupported_operator() {
        let err = Calculator::new().apply("^", 2.0, 3.0).unwrap_err();
        assert_eq!(err, CalculatorError::UnsupportedOperator("^".into()));
        assert_eq!(err.to_string(), "Unsupported operation: ^");
    }

    #[test]
    fn test_detect_shapes() {
        let cases = [
            ("What is 7 / 2?", Operator::Divide, 7.0, 2.0),
            ("8 minus 3", Operator::Subtract, 8.0, 3.0),
            ("12 times 4", Operator::Multiply, 12.0, 4.0),
            ("Add 2 and 2", Operator::Add, 2.0, 2.0),
            ("please multiply 5 and 6", Operator::Multiply, 5.0, 6.0),
            ("10+5", Operator::Add, 10.0, 5.0),
            ("9 * 9", Operator::Multiply, 9.0, 9.0),
            ("20 - 4", Operator::Subtract, 20.0, 4.0),
            ("20/4", Operator::Divide, 20.0, 4.0),
        ];

        for (text, operator, a, b) in cases {
            let request = Calculator::detect(text).unwrap_or_else(|| panic!("no match: {}", text));
            assert_eq!(request.operator, operator, "{}", text);
            assert_eq!(request.operand1, a, "{}", text);
            assert_eq!(request.operand2, b, "{}", text);
        }
    }

    #[test]
    fn test_detect_none() {
        assert!(Calculator::detect("What is the capital of Italy?").is_none());
        assert!(Calculator::detect("").is_none());
    }

    #[test]
    fn test_detect_rejects_non_finite_operands() {
        let huge = "9".repeat(400);
        assert!(Calculator::detect(&format!("Add {} and 1", huge)).is_none());
        assert_eq!(parse_operand("42"), Some(42.0));
        assert_eq!(parse_operand(&huge), None);
    }

    #[test]
    fn test_format_result() {
        let calc = Calculator::new();
        assert_eq!(
            Calculator::format_result(&calc.apply("+", 1.0, 2.0)),
            "Calculation: 1 + 2 = 3.0"
        );
        assert_eq!(
            Calculator::format_result(&calc.apply("/", 1.0, 0.0)),
            "Calculation error: Division by zero is not allowed"
        );
    }

    #[test]
    fn test_format_result_value() {
        assert_eq!(format_result_value(30.0), "30.0");
        assert_eq!(format_result_value(0.25), "0.25");
        assert_eq!(format_result_value(f64::INFINITY), "inf");
    }
}
