//! HTML rendering for the assistant page
//!
//! The page is rebuilt from scratch on every request; nothing is kept between
//! submissions beyond what the browser sends back in its forms.

use crate::models::{CalculationRequest, CalculatorMode};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Finatic IA";
pub const PAGE_ICON: &str = "💸";

const MONEY_STEP: &str = "100.0";
const RATE_STEP: &str = "0.1";
const YEARS_STEP: &str = "0.5";

/// Outcome box shown under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub question: String,
    pub answer: Option<Notice>,
    pub mode: CalculatorMode,
    pub inputs: CalculationRequest,
    pub result: Option<Notice>,
}

impl PageView {
    pub fn for_mode(mode: CalculatorMode) -> Self {
        Self {
            mode,
            inputs: CalculationRequest {
                mode,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>">
<style>
body {{ font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }}
label {{ display: block; margin-top: .8rem; }}
input[type=text], input[type=number], select {{ width: 100%; padding: .5rem; box-sizing: border-box; }}
button {{ margin-top: 1rem; padding: .5rem 1rem; }}
.success {{ background: #e8f5e9; border-radius: .4rem; padding: .8rem; margin-top: 1rem; white-space: pre-wrap; }}
.error {{ background: #fdecea; border-radius: .4rem; padding: .8rem; margin-top: 1rem; white-space: pre-wrap; }}
.caption {{ color: #6b6b76; font-size: .9rem; }}
</style>
</head>
<body>
<h1>{icon} Finatic</h1>
<p>Fintor tu asesor virtual para aprender a manejar el dinero de forma fácil y divertida.</p>
<hr>
<form method="post" action="/preguntar">
<label for="pregunta">💬 Escribe tu pregunta o cálculo financiero:</label>
<input type="text" id="pregunta" name="pregunta" value="{question}" autofocus>
<button type="submit">Enviar</button>
</form>
"#,
        title = PAGE_TITLE,
        icon = PAGE_ICON,
        question = escape_html(&view.question),
    );

    if let Some(answer) = &view.answer {
        render_notice(&mut html, answer, "✅ Resultado:");
    }

    html.push_str("<hr>\n<h2>🧮 Calculadora financiera rápida</h2>\n");
    render_mode_selector(&mut html, view.mode);
    render_calculator_form(&mut html, view.mode, &view.inputs);

    if let Some(result) = &view.result {
        render_notice(&mut html, result, "");
    }

    html.push_str(
        "<hr>\n<p class=\"caption\">💡 Consejo: ahorrar incluso pequeñas cantidades cada mes \
         puede tener un gran impacto a largo plazo.</p>\n</body>\n</html>\n",
    );

    html
}

fn render_notice(html: &mut String, notice: &Notice, heading: &str) {
    let (class, body) = match notice {
        Notice::Success(text) => ("success", text),
        Notice::Error(text) => ("error", text),
    };

    html.push_str("<div class=\"");
    html.push_str(class);
    html.push_str("\">");
    if matches!(notice, Notice::Success(_)) && !heading.is_empty() {
        html.push_str("<strong>");
        html.push_str(heading);
        html.push_str("</strong>\n");
    }
    html.push_str(&escape_html(body));
    html.push_str("</div>\n");
}

fn render_mode_selector(html: &mut String, selected: CalculatorMode) {
    html.push_str(
        "<form method=\"get\" action=\"/\">\n\
         <label for=\"modo\">Selecciona el tipo de cálculo:</label>\n\
         <select id=\"modo\" name=\"modo\" onchange=\"this.form.submit()\">\n",
    );
    for mode in CalculatorMode::ALL {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            mode.slug(),
            if mode == selected { " selected" } else { "" },
            mode.label()
        );
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Cambiar</button></noscript>\n</form>\n");
}

fn render_calculator_form(html: &mut String, mode: CalculatorMode, inputs: &CalculationRequest) {
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/calcular\">\n<input type=\"hidden\" name=\"modo\" value=\"{}\">",
        mode.slug()
    );

    match mode {
        CalculatorMode::SimpleInterest | CalculatorMode::CompoundInterest => {
            number_field(html, "capital", "💵 Capital inicial:", MONEY_STEP, inputs.capital);
            number_field(html, "tasa", "📊 Tasa de interés (% anual):", RATE_STEP, inputs.rate);
            number_field(html, "tiempo", "📆 Tiempo (años):", YEARS_STEP, inputs.years);
        }
        CalculatorMode::MonthlyBudget => {
            number_field(html, "ingreso", "💰 Ingreso mensual:", MONEY_STEP, inputs.income);
            number_field(html, "gastos", "💸 Gastos mensuales:", MONEY_STEP, inputs.expenses);
        }
    }

    let _ = writeln!(
        html,
        "<button type=\"submit\">{}</button>\n</form>",
        mode.button_label()
    );
}

fn number_field(html: &mut String, name: &str, label: &str, step: &str, value: Option<f64>) {
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"0\" step=\"{step}\" value=\"{value:?}\" required>",
        name = name,
        label = label,
        step = step,
        value = value.unwrap_or(0.0),
    );
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & y")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("ahorro 'diario'"), "ahorro &#39;diario&#39;");
    }

    #[test]
    fn test_default_page() {
        let html = render(&PageView::default());

        assert!(html.contains("<title>Finatic IA</title>"));
        assert!(html.contains("action=\"/preguntar\""));
        assert!(html.contains("<option value=\"interes_simple\" selected>Interés Simple</option>"));
        assert!(html.contains("name=\"capital\" min=\"0\" step=\"100.0\" value=\"0.0\""));
        assert!(html.contains("name=\"tasa\" min=\"0\" step=\"0.1\""));
        assert!(html.contains("name=\"tiempo\" min=\"0\" step=\"0.5\""));
        assert!(html.contains("Calcular Interés Simple"));
        assert!(!html.contains("class=\"success\""));
    }

    #[test]
    fn test_budget_mode_fields() {
        let html = render(&PageView::for_mode(CalculatorMode::MonthlyBudget));

        assert!(html.contains("name=\"ingreso\" min=\"0\" step=\"100.0\""));
        assert!(html.contains("name=\"gastos\" min=\"0\" step=\"100.0\""));
        assert!(!html.contains("name=\"capital\""));
        assert!(html.contains("Calcular Presupuesto"));
        assert!(html.contains("<option value=\"presupuesto\" selected>"));
    }

    #[test]
    fn test_notices_are_escaped() {
        let view = PageView {
            question: "<b>hola</b>".to_string(),
            answer: Some(Notice::Success("usa <b>metas</b>".to_string())),
            result: Some(Notice::Error("capital must be a non-negative number".to_string())),
            ..Default::default()
        };
        let html = render(&view);

        assert!(html.contains("value=\"&lt;b&gt;hola&lt;/b&gt;\""));
        assert!(html.contains("✅ Resultado:"));
        assert!(html.contains("usa &lt;b&gt;metas&lt;/b&gt;"));
        assert!(html.contains("<div class=\"error\">capital must be a non-negative number</div>"));
    }
}
