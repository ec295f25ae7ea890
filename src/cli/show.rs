use super::ui;
use crate::core::quote::PriceKind;
use crate::core::valuation::{HoldingValuation, PortfolioValuation};
use anyhow::{Result, anyhow};

impl HoldingValuation {
    /// Detail view of one holding with its cost and dividend tax breakdown.
    pub fn display_details(&self, reporting_currency: &str) -> String {
        let cur = self.currency();
        let rc = reporting_currency;
        let (price, kind) = self.quote.display_price();
        let price_label = match kind {
            PriceKind::Bid => "Bid",
            PriceKind::Regular => "Reg",
        };
        let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

        let mut table = ui::new_styled_table();
        let mut row = |label: &str, value: String| {
            table.add_row(vec![
                ui::header_cell(label),
                ui::right_cell(value),
            ]);
        };

        row("Symbol", self.symbol.clone());
        row("WKN", optional(&self.wkn));
        row("ISIN", optional(&self.isin));
        row("Price", format!("{price:.2} {cur} ({price_label})"));
        if kind == PriceKind::Bid {
            // Valuation always uses the regular market price
            row("Regular price", format!("{:.2} {cur}", self.price()));
        }
        if self.rate != 1.0 {
            row("Rate", format!("{:.4} {rc}/{cur}", self.rate));
        }
        row("Units", format!("{:.4}", self.quantity));
        row(
            "Value",
            format!(
                "{:.2} {cur} ({:.4} x {:.2})",
                self.value,
                self.quantity,
                self.price()
            ),
        );
        if self.rate != 1.0 {
            row("", format!("{:.2} {rc}", self.converted_value));
        }
        row(
            "Cost",
            format!(
                "{:.2} {rc} ({:.4} x {:.2})",
                -self.cost_basis,
                self.quantity,
                self.average_price()
            ),
        );
        row("Provisions", format!("{:.2} {rc}", -self.provisions));
        row("Fees", format!("{:.2} {rc}", -self.fees));
        row(
            "Gain (price)",
            format!("{} {rc}", ui::format_gain(self.gain(), self.gain_pct())),
        );

        let dividends = &self.dividends;
        row("Dividends", format!("{:.2} {rc}", dividends.amount));
        row(
            "Withholding tax",
            format!("{:.2} {rc}", -dividends.withholding_tax),
        );
        row(
            "Capital gains tax",
            format!("{:.2} {rc}", -dividends.capital_gains_tax),
        );
        row(
            "Solidarity surcharge",
            format!("{:.2} {rc}", -dividends.solidarity_surcharge),
        );
        row("Church tax", format!("{:.2} {rc}", -dividends.church_tax));
        row("Dividends (net)", format!("{:.2} {rc}", dividends.net()));
        row(
            "Gain incl. Div.",
            format!(
                "{} {rc}",
                ui::format_gain(self.gain_incl_dividends(), self.gain_incl_dividends_pct())
            ),
        );

        let after_tax = self.gain_after_tax();
        format!(
            "{}\n\n{}\n\n{} {}",
            ui::style_text(&self.name, ui::StyleType::Title),
            table,
            ui::style_text("Gain after tax:", ui::StyleType::Label),
            ui::style_text(
                &format!("{after_tax:+.2} {rc}"),
                ui::style_for_amount(after_tax)
            )
        )
    }
}

pub fn run(valuation: &PortfolioValuation, symbol: &str) -> Result<()> {
    let holding = valuation
        .holding(symbol)
        .ok_or_else(|| anyhow!("No holding with market data for symbol: {}", symbol))?;
    println!("{}", holding.display_details(&valuation.reporting_currency));
    Ok(())
}
