use super::ui;
use crate::core::valuation::{PortfolioTotals, PortfolioValuation};
use comfy_table::Cell;

impl PortfolioValuation {
    pub fn display_as_table(&self) -> String {
        let currency = &self.reporting_currency;
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Holding"),
            ui::header_cell("Units"),
            ui::header_cell("Price"),
            ui::header_cell(&format!("Value ({currency})")),
            ui::header_cell(&format!("Cost ({currency})")),
            ui::header_cell("Gain"),
            ui::header_cell("Dividends"),
            ui::header_cell("Gain incl. Div."),
        ]);

        for holding in &self.holdings {
            let value = if holding.rate != 1.0 {
                format!("{:.2}\n@ {:.4}", holding.converted_value, holding.rate)
            } else {
                format!("{:.2}", holding.converted_value)
            };

            table.add_row(vec![
                Cell::new(format!("{}\n{}", holding.name, holding.symbol)),
                ui::right_cell(format!("{:.4}", holding.quantity)),
                ui::right_cell(format!("{:.2} {}", holding.price(), holding.currency())),
                ui::right_cell(value),
                ui::number_cell(holding.cost_basis),
                ui::gain_cell(holding.gain(), holding.gain_pct()),
                ui::number_cell(holding.dividends.amount),
                ui::gain_cell(
                    holding.gain_incl_dividends(),
                    holding.gain_incl_dividends_pct(),
                ),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Portfolio", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str("\n\n");
        output.push_str(&display_totals(&self.totals, currency));
        output
    }
}

fn display_totals(totals: &PortfolioTotals, currency: &str) -> String {
    let line = |label: &str, value: String| {
        format!(
            "{:>22} {}\n",
            ui::style_text(&format!("{label}:"), ui::StyleType::Label),
            value
        )
    };
    let gain = totals.gain();
    let gain_incl = totals.gain_incl_dividends();

    let mut output = format!(
        "{}\n",
        ui::style_text(&format!("Total ({currency})"), ui::StyleType::Title)
    );
    output.push_str(&line("Value", format!("{:>12.2}", totals.value)));
    output.push_str(&line("Cost", format!("{:>12.2}", totals.cost_basis)));
    output.push_str(&line(
        "Gain",
        ui::style_text(
            &ui::format_gain(gain, totals.gain_pct()),
            ui::style_for_amount(gain),
        ),
    ));
    output.push_str(&line(
        "Dividends",
        format!(
            "{:>12.2} (tax {:.2})",
            totals.dividends, totals.dividend_tax
        ),
    ));
    output.push_str(&line(
        "Gain incl. Div.",
        ui::style_text(
            &ui::format_gain(gain_incl, totals.gain_incl_dividends_pct()),
            ui::style_for_amount(gain_incl),
        ),
    ));
    output
}

pub fn run(valuation: &PortfolioValuation) {
    if valuation.holdings.is_empty() {
        println!("No holdings with market data found.");
        return;
    }
    println!("{}", valuation.display_as_table());
}
