//! Formula library
//!
//! Pure, deterministic finance formulas. No bounds checking: callers that
//! accept user input enforce non-negativity at their own boundary.

use serde::{Deserialize, Serialize};

/// Interest earned linearly on the principal only.
pub fn simple_interest(capital: f64, rate_percent: f64, time_years: f64) -> f64 {
    capital * (rate_percent / 100.0) * time_years
}

/// Final accumulated amount (principal included), compounding once per year.
/// Fractional years use a non-integer exponent.
pub fn compound_interest(capital: f64, rate_percent: f64, time_years: f64) -> f64 {
    capital * (1.0 + rate_percent / 100.0).powf(time_years)
}

/// Outcome of a monthly budget. Both variants carry a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum BudgetBalance {
    Surplus(f64),
    Deficit(f64),
}

impl BudgetBalance {
    pub fn amount(&self) -> f64 {
        match self {
            Self::Surplus(a) | Self::Deficit(a) => *a,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Deficit(shortfall) => format!(
                "⚠️ Estás gastando más de lo que ganas. Te faltan {}.",
                format_currency(*shortfall)
            ),
            Self::Surplus(savings) => format!(
                "💪 Podrías ahorrar aproximadamente {} este mes.",
                format_currency(*savings)
            ),
        }
    }
}

/// `income == expenses` is a zero surplus, never a deficit.
pub fn budget_balance(income: f64, expenses: f64) -> BudgetBalance {
    let savings = income - expenses;
    if savings < 0.0 {
        BudgetBalance::Deficit(savings.abs())
    } else {
        BudgetBalance::Surplus(savings)
    }
}

/// Human-readable monthly budget verdict, displayed as-is.
pub fn monthly_budget(income: f64, expenses: f64) -> String {
    budget_balance(income, expenses).message()
}

/// `$` + thousands separators + two decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "$inf" } else { "$-inf" }.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Year counts always show a fractional part: `2` → `2.0`, `2.5` → `2.5`.
/// Very large or small values use a signed two-digit exponent: `1e+16`, `1e-05`.
pub fn format_years(time_years: f64) -> String {
    if time_years.is_nan() {
        return "nan".to_string();
    }

    let shortest = format!("{:?}", time_years);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
