//! Request and result types shared by the page and the JSON API

use crate::calculator::{self, format_currency, format_years, BudgetBalance};
use crate::error::FinaticError;
use crate::Result;
use serde::{Deserialize, Serialize};

//
// ================= Calculator modes =================
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorMode {
    #[default]
    #[serde(rename = "interes_simple")]
    SimpleInterest,
    #[serde(rename = "interes_compuesto")]
    CompoundInterest,
    #[serde(rename = "presupuesto")]
    MonthlyBudget,
}

impl CalculatorMode {
    pub const ALL: [CalculatorMode; 3] = [
        CalculatorMode::SimpleInterest,
        CalculatorMode::CompoundInterest,
        CalculatorMode::MonthlyBudget,
    ];

    /// Wire value, as used in query strings and form fields.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::SimpleInterest => "interes_simple",
            Self::CompoundInterest => "interes_compuesto",
            Self::MonthlyBudget => "presupuesto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SimpleInterest => "Interés Simple",
            Self::CompoundInterest => "Interés Compuesto",
            Self::MonthlyBudget => "Presupuesto Mensual",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::SimpleInterest => "Calcular Interés Simple",
            Self::CompoundInterest => "Calcular Interés Compuesto",
            Self::MonthlyBudget => "Calcular Presupuesto",
        }
    }
}

//
// ================= Requests =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(alias = "pregunta", default)]
    pub question: String,
}

/// Direct calculator submission. Only the fields of `mode` are read.
/// Spanish aliases match the page's form field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(alias = "modo")]
    pub mode: CalculatorMode,
    #[serde(default)]
    pub capital: Option<f64>,
    #[serde(alias = "tasa", default)]
    pub rate: Option<f64>,
    #[serde(alias = "tiempo", default)]
    pub years: Option<f64>,
    #[serde(alias = "ingreso", default)]
    pub income: Option<f64>,
    #[serde(alias = "gastos", default)]
    pub expenses: Option<f64>,
}

//
// ================= Results =================
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub mode: CalculatorMode,
    /// Interest earned, final amount, or budget magnitude, by mode.
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<BudgetBalance>,
    pub message: String,
}

impl CalculationRequest {
    pub fn evaluate(&self) -> Result<Calculation> {
        match self.mode {
            CalculatorMode::SimpleInterest => {
                let (capital, rate, years) = self.interest_inputs()?;
                let value = calculator::simple_interest(capital, rate, years);
                Ok(Calculation {
                    mode: self.mode,
                    value,
                    balance: None,
                    message: format!(
                        "El interés simple sería de {} después de {} años.",
                        format_currency(value),
                        format_years(years)
                    ),
                })
            }
            CalculatorMode::CompoundInterest => {
                let (capital, rate, years) = self.interest_inputs()?;
                let value = calculator::compound_interest(capital, rate, years);
                Ok(Calculation {
                    mode: self.mode,
                    value,
                    balance: None,
                    message: format!(
                        "El monto final sería de {} después de {} años.",
                        format_currency(value),
                        format_years(years)
                    ),
                })
            }
            CalculatorMode::MonthlyBudget => {
                let income = non_negative("income", self.income)?;
                let expenses = non_negative("expenses", self.expenses)?;
                let balance = calculator::budget_balance(income, expenses);
                Ok(Calculation {
                    mode: self.mode,
                    value: balance.amount(),
                    balance: Some(balance),
                    message: balance.message(),
                })
            }
        }
    }

    fn interest_inputs(&self) -> Result<(f64, f64, f64)> {
        Ok((
            non_negative("capital", self.capital)?,
            non_negative("rate", self.rate)?,
            non_negative("years", self.years)?,
        ))
    }
}

/// Mirrors the page widgets' `min="0"`.
fn non_negative(field: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(FinaticError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, v
        ))),
        None => Err(FinaticError::InvalidInput(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interest(mode: CalculatorMode, capital: f64, rate: f64, years: f64) -> CalculationRequest {
        CalculationRequest {
            mode,
            capital: Some(capital),
            rate: Some(rate),
            years: Some(years),
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_interest_mode() {
        let result = interest(CalculatorMode::SimpleInterest, 1000.0, 5.0, 2.0)
            .evaluate()
            .unwrap();
        assert!((result.value - 100.0).abs() < 1e-9);
        assert_eq!(result.message, "El interés simple sería de $100.00 después de 2.0 años.");
    }

    #[test]
    fn test_compound_interest_mode() {
        let result = interest(CalculatorMode::CompoundInterest, 1000.0, 10.0, 3.0)
            .evaluate()
            .unwrap();
        assert_eq!(result.message, "El monto final sería de $1,331.00 después de 3.0 años.");
    }

    #[test]
    fn test_budget_mode() {
        let request = CalculationRequest {
            mode: CalculatorMode::MonthlyBudget,
            income: Some(2000.0),
            expenses: Some(2500.0),
            ..Default::default()
        };
        let result = request.evaluate().unwrap();
        assert_eq!(result.balance, Some(BudgetBalance::Deficit(500.0)));
        assert!(result.message.contains("$500.00"));
    }

    #[test]
    fn test_rejects_negative_and_missing_inputs() {
        let negative = interest(CalculatorMode::SimpleInterest, -1.0, 5.0, 2.0).evaluate();
        assert!(matches!(negative, Err(FinaticError::InvalidInput(_))));

        let not_a_number = interest(CalculatorMode::CompoundInterest, 1.0, f64::NAN, 2.0).evaluate();
        assert!(matches!(not_a_number, Err(FinaticError::InvalidInput(_))));

        let missing = CalculationRequest {
            mode: CalculatorMode::MonthlyBudget,
            income: Some(100.0),
            ..Default::default()
        }
        .evaluate();
        assert!(matches!(missing, Err(FinaticError::InvalidInput(_))));
    }

    #[test]
    fn test_spanish_field_aliases() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"modo": "interes_compuesto", "capital": 500, "tasa": 2.5, "tiempo": 1.5}"#,
        )
        .unwrap();
        assert_eq!(request.mode, CalculatorMode::CompoundInterest);
        assert_eq!(request.rate, Some(2.5));
        assert_eq!(request.years, Some(1.5));

        let ask: AskRequest = serde_json::from_str(r#"{"pregunta": "hola"}"#).unwrap();
        assert_eq!(ask.question, "hola");
    }

    #[test]
    fn test_mode_slugs_match_serde() {
        for mode in CalculatorMode::ALL {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, mode.slug());
        }
    }
}
