//! Intent Classifier
//!
//! Decides whether a free-text question is a calculation the formula library
//! can answer on its own:
//! - Simple interest: "interés simple" + capital, rate, years
//! - Compound interest: "interés compuesto" + capital, rate, years
//! - Monthly budget: "presupuesto" + income, expenses
//!
//! A keyword without enough numbers is not a calculation; the question falls
//! through to the conversational advisor.

use crate::calculator::{self, format_currency, format_years};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Unsigned decimal literal with an optional fractional part. `\d` is any
    /// Unicode decimal digit, so `١٠٠٠` and `５` count as numbers too.
    static ref NUMBER: Regex = Regex::new(r"\d+\.?\d*").expect("number pattern is valid");
    static ref DIGIT: Regex = Regex::new(r"^\d$").expect("digit pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntentKind {
    SimpleInterest,
    CompoundInterest,
    MonthlyBudget,
}

/// Ordered rule table: the first phrase present with enough numbers wins.
const RULES: &[(&str, usize, IntentKind)] = &[
    ("interés simple", 3, IntentKind::SimpleInterest),
    ("interés compuesto", 3, IntentKind::CompoundInterest),
    ("presupuesto", 2, IntentKind::MonthlyBudget),
];

/// A recognised calculation request with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SimpleInterest { capital: f64, rate: f64, years: f64 },
    CompoundInterest { capital: f64, rate: f64, years: f64 },
    MonthlyBudget { income: f64, expenses: f64 },
}

impl Intent {
    /// Run the formula and format the answer shown to the user.
    pub fn render(&self) -> String {
        match *self {
            Intent::SimpleInterest { capital, rate, years } => format!(
                "💰 El interés simple sería de {} después de {} años.",
                format_currency(calculator::simple_interest(capital, rate, years)),
                format_years(years)
            ),
            Intent::CompoundInterest { capital, rate, years } => format!(
                "📈 El monto final con interés compuesto sería de {} después de {} años.",
                format_currency(calculator::compound_interest(capital, rate, years)),
                format_years(years)
            ),
            Intent::MonthlyBudget { income, expenses } => {
                calculator::monthly_budget(income, expenses)
            }
        }
    }
}

/// Every numeric literal in the query, left to right.
pub fn extract_numbers(query: &str) -> Vec<f64> {
    NUMBER
        .find_iter(query)
        .filter_map(|m| to_ascii_literal(m.as_str()).parse::<f64>().ok())
        .collect()
}

fn to_ascii_literal(literal: &str) -> String {
    literal
        .chars()
        .map(|ch| match digit_value(ch) {
            Some(d) => char::from(b'0' + d),
            None => ch,
        })
        .collect()
}

/// Unicode assigns decimal digits in contiguous runs of ten starting at zero,
/// so a digit's value is its distance from the start of its run, modulo 10.
fn digit_value(ch: char) -> Option<u8> {
    if let Some(d) = ch.to_digit(10) {
        return Some(d as u8);
    }
    if !is_decimal_digit(ch) {
        return None;
    }

    let mut offset = 0u32;
    let mut code = ch as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }

    Some((offset % 10) as u8)
}

fn is_decimal_digit(ch: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT.is_match(ch.encode_utf8(&mut buf))
}

/// Stateless intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn classify(query: &str) -> Option<Intent> {
        let numbers = extract_numbers(query);
        let lowered = query.to_lowercase();

        let (_, _, kind) = RULES
            .iter()
            .find(|(phrase, min_numbers, _)| {
                lowered.contains(*phrase) && numbers.len() >= *min_numbers
            })?;

        let intent = match kind {
            IntentKind::SimpleInterest => Intent::SimpleInterest {
                capital: numbers[0],
                rate: numbers[1],
                years: numbers[2],
            },
            IntentKind::CompoundInterest => Intent::CompoundInterest {
                capital: numbers[0],
                rate: numbers[1],
                years: numbers[2],
            },
            IntentKind::MonthlyBudget => Intent::MonthlyBudget {
                income: numbers[0],
                expenses: numbers[1],
            },
        };

        Some(intent)
    }
}

/// Classify and answer in one step. `None` means "ask the advisor".
pub fn detect_calculation(query: &str) -> Option<String> {
    IntentClassifier::classify(query).map(|intent| intent.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numbers() {
        assert_eq!(
            extract_numbers("calcula el interés simple de 1000 al 5 por 2 años"),
            vec![1000.0, 5.0, 2.0]
        );
        assert_eq!(extract_numbers("tasa 3.75 y 1000."), vec![3.75, 1000.0]);
        // thousands separators split the literal
        assert_eq!(extract_numbers("1,000"), vec![1.0, 0.0]);
        // no sign handling
        assert_eq!(extract_numbers("-50"), vec![50.0]);
        assert!(extract_numbers("hola").is_empty());
    }

    #[test]
    fn test_extract_unicode_digits() {
        // Arabic-Indic and fullwidth digits
        assert_eq!(
            extract_numbers("interés simple ١٠٠٠ ５ 2"),
            vec![1000.0, 5.0, 2.0]
        );
        // Devanagari, with a fractional part
        assert_eq!(extract_numbers("१२.५"), vec![12.5]);
        // adjacent runs of mathematical digits
        assert_eq!(extract_numbers("\u{1D7D7}\u{1D7DF}"), vec![97.0]);

        assert!(matches!(
            IntentClassifier::classify("interés simple ١٠٠٠ ５ 2"),
            Some(Intent::SimpleInterest { capital, rate, years })
                if capital == 1000.0 && rate == 5.0 && years == 2.0
        ));
    }

    #[test]
    fn test_huge_year_count_uses_exponent() {
        let answer = detect_calculation("interés simple 1 1 10000000000000000").unwrap();
        assert!(answer.contains("después de 1e+16 años."));
    }

    #[test]
    fn test_simple_interest_query() {
        let query = "calcula el interés simple de 1000 al 5 por 2 años";
        assert_eq!(
            IntentClassifier::classify(query),
            Some(Intent::SimpleInterest { capital: 1000.0, rate: 5.0, years: 2.0 })
        );

        let answer = detect_calculation(query).unwrap();
        assert!(answer.contains("$100.00"));
        assert!(answer.contains("2.0 años"));
    }

    #[test]
    fn test_compound_interest_query() {
        let answer = detect_calculation("interés compuesto 1000 10 3").unwrap();
        assert!(answer.contains("1,331.00"));
        assert!(answer.contains("3.0 años"));
    }

    #[test]
    fn test_budget_query() {
        let answer = detect_calculation("presupuesto con ingreso 2000 y gastos 2500").unwrap();
        assert!(answer.contains("$500.00"));
        assert!(answer.starts_with("⚠️"));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        assert!(matches!(
            IntentClassifier::classify("INTERÉS SIMPLE 100 10 1"),
            Some(Intent::SimpleInterest { .. })
        ));
    }

    #[test]
    fn test_no_keyword_no_match() {
        assert_eq!(IntentClassifier::classify("hola, ¿cómo ahorro dinero?"), None);
        assert_eq!(detect_calculation("ahorro 100 200 300"), None);
    }

    #[test]
    fn test_keyword_without_numbers_no_match() {
        assert_eq!(detect_calculation("presupuesto"), None);
        assert_eq!(detect_calculation("presupuesto de 2000"), None);
        assert_eq!(detect_calculation("interés simple de 1000 al 5"), None);
        // unaccented spelling is not the recognised phrase
        assert_eq!(detect_calculation("interes simple 1000 5 2"), None);
    }

    #[test]
    fn test_rule_priority() {
        let both = "interés compuesto o interés simple 1000 10 2";
        assert!(matches!(
            IntentClassifier::classify(both),
            Some(Intent::SimpleInterest { .. })
        ));

        // a keyword that lacks numbers does not block later rules
        let fallthrough = "interés simple y presupuesto 3000 1000";
        assert_eq!(
            IntentClassifier::classify(fallthrough),
            Some(Intent::MonthlyBudget { income: 3000.0, expenses: 1000.0 })
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let query = "interés compuesto de 2500 al 4.5 por 7.5 años";
        let first = detect_calculation(query);
        for _ in 0..5 {
            assert_eq!(detect_calculation(query), first);
        }
    }
}
