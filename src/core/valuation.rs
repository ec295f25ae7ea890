//! Per-holding and portfolio-wide valuation.
//!
//! All figures are plain `f64`. Percentages are computed against the cost basis
//! without guarding against a zero basis, so a holding without recorded
//! purchases yields NaN or an infinite percentage. Renderers decide how to show
//! non-finite values.
use crate::core::config::Holding;
use crate::core::quote::{Quote, Quotes};
use crate::core::rates::RateTable;
use tracing::debug;

/// Dividend income of one holding and the taxes withheld from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DividendSummary {
    pub amount: f64,
    pub withholding_tax: f64,
    pub capital_gains_tax: f64,
    pub solidarity_surcharge: f64,
    pub church_tax: f64,
}

impl DividendSummary {
    pub fn tax(&self) -> f64 {
        self.withholding_tax + self.capital_gains_tax + self.solidarity_surcharge + self.church_tax
    }

    pub fn net(&self) -> f64 {
        self.amount - self.tax()
    }
}

/// Valuation of a single holding.
///
/// `value` and `price` are in the quote currency, every other monetary field
/// is in the reporting currency.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingValuation {
    pub symbol: String,
    pub name: String,
    pub wkn: Option<String>,
    pub isin: Option<String>,
    pub quote: Quote,
    pub rate: f64,
    pub quantity: f64,
    pub order_price: f64,
    pub provisions: f64,
    pub fees: f64,
    pub cost_basis: f64,
    pub value: f64,
    pub converted_value: f64,
    pub dividends: DividendSummary,
}

impl HoldingValuation {
    pub fn currency(&self) -> &str {
        &self.quote.currency
    }

    pub fn price(&self) -> f64 {
        self.quote.regular_market_price
    }

    /// Average price paid per unit, excluding provisions and fees.
    pub fn average_price(&self) -> f64 {
        self.order_price / self.quantity
    }

    pub fn gain(&self) -> f64 {
        self.converted_value - self.cost_basis
    }

    pub fn gain_pct(&self) -> f64 {
        percent_of(self.converted_value, self.cost_basis)
    }

    pub fn gain_incl_dividends(&self) -> f64 {
        self.converted_value + self.dividends.amount - self.cost_basis
    }

    pub fn gain_incl_dividends_pct(&self) -> f64 {
        percent_of(self.converted_value + self.dividends.amount, self.cost_basis)
    }

    /// Gain including dividends with every withheld tax deducted.
    pub fn gain_after_tax(&self) -> f64 {
        self.gain_incl_dividends() - self.dividends.tax()
    }
}

/// Portfolio-wide sums in the reporting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioTotals {
    pub value: f64,
    pub cost_basis: f64,
    pub dividends: f64,
    pub dividend_tax: f64,
}

impl PortfolioTotals {
    pub fn gain(&self) -> f64 {
        self.value - self.cost_basis
    }

    pub fn gain_pct(&self) -> f64 {
        percent_of(self.value, self.cost_basis)
    }

    pub fn gain_incl_dividends(&self) -> f64 {
        self.value + self.dividends - self.cost_basis
    }

    pub fn gain_incl_dividends_pct(&self) -> f64 {
        percent_of(self.value + self.dividends, self.cost_basis)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioValuation {
    pub reporting_currency: String,
    pub holdings: Vec<HoldingValuation>,
    pub totals: PortfolioTotals,
}

impl PortfolioValuation {
    pub fn holding(&self, symbol: &str) -> Option<&HoldingValuation> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }
}

fn percent_of(amount: f64, basis: f64) -> f64 {
    (amount / basis * 100.0) - 100.0
}

/// Values a single holding against its quote.
pub fn value_holding(
    holding: &Holding,
    quote: &Quote,
    rates: &RateTable,
    reporting_currency: &str,
) -> HoldingValuation {
    let rate = rates.conversion_factor(&quote.currency, reporting_currency);

    let mut quantity = 0.0;
    let mut order_price = 0.0;
    let mut provisions = 0.0;
    let mut fees = 0.0;
    let mut cost_basis = 0.0;
    for order in &holding.orders {
        quantity += order.count;
        order_price += order.price;
        provisions += order.provision;
        fees += order.fee;
        cost_basis += order.price + order.provision + order.fee;
    }

    let mut dividends = DividendSummary::default();
    for dividend in &holding.dividends {
        dividends.amount += dividend.amount;
        dividends.withholding_tax += dividend.withholding_tax;
        dividends.capital_gains_tax += dividend.capital_gains_tax;
        dividends.solidarity_surcharge += dividend.solidarity_surcharge;
        dividends.church_tax += dividend.church_tax;
    }

    let value = quantity * quote.regular_market_price;
    let name = holding
        .name
        .clone()
        .or_else(|| quote.long_name.clone())
        .or_else(|| quote.short_name.clone())
        .unwrap_or_else(|| holding.symbol.clone());

    HoldingValuation {
        symbol: holding.symbol.clone(),
        name,
        wkn: holding.wkn.clone(),
        isin: holding.isin.clone(),
        quote: quote.clone(),
        rate,
        quantity,
        order_price,
        provisions,
        fees,
        cost_basis,
        value,
        converted_value: value * rate,
        dividends,
    }
}

/// Values every holding that has a quote, in symbol order, and sums the
/// results. Holdings without a quote are left out entirely.
pub fn value_portfolio(
    holdings: &[Holding],
    quotes: &Quotes,
    rates: &RateTable,
    reporting_currency: &str,
) -> PortfolioValuation {
    let mut sorted: Vec<&Holding> = holdings.iter().collect();
    sorted.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut valuations = Vec::with_capacity(sorted.len());
    let mut totals = PortfolioTotals::default();
    for holding in sorted {
        let Some(quote) = quotes.get(&holding.symbol) else {
            debug!(symbol = %holding.symbol, "No quote, skipping holding");
            continue;
        };

        let valuation = value_holding(holding, quote, rates, reporting_currency);
        debug!(
            symbol = %valuation.symbol,
            rate = valuation.rate,
            converted_value = valuation.converted_value,
            cost_basis = valuation.cost_basis,
            "Valued holding"
        );

        let rate = valuation.rate;
        totals.value += valuation.value * rate;
        totals.cost_basis += valuation.cost_basis * rate;
        totals.dividends += valuation.dividends.amount * rate;
        totals.dividend_tax += valuation.dividends.tax() * rate;
        valuations.push(valuation);
    }

    PortfolioValuation {
        reporting_currency: reporting_currency.to_string(),
        holdings: valuations,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Dividend, Order};

    fn quote(symbol: &str, currency: &str, price: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            long_name: Some(format!("{symbol} Corp.")),
            short_name: None,
            currency: currency.to_string(),
            regular_market_price: price,
            bid: None,
            ask: None,
            exchange: None,
            market_state: None,
            quote_type: None,
            regular_market_change_percent: None,
            regular_market_previous_close: None,
        }
    }

    fn holding(symbol: &str, orders: Vec<Order>, dividends: Vec<Dividend>) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            orders,
            dividends,
            ..Default::default()
        }
    }

    fn order(count: f64, price: f64, provision: f64, fee: f64) -> Order {
        Order {
            count,
            price,
            provision,
            fee,
            ..Default::default()
        }
    }

    fn quotes(list: Vec<Quote>) -> Quotes {
        list.into_iter().map(|q| (q.symbol.clone(), q)).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_priceless_quote_values_at_zero() {
        let holdings = vec![
            holding("ABC", vec![order(2.0, 100.0, 0.0, 0.0)], vec![]),
            holding("GONE", vec![order(5.0, 50.0, 0.0, 0.0)], vec![]),
        ];
        let quotes = quotes(vec![quote("ABC", "EUR", 60.0), quote("GONE", "", 0.0)]);
        let rates: RateTable = [("USD".to_string(), 1.25)].into_iter().collect();

        let valuation = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let gone = valuation.holding("GONE").unwrap();

        assert_eq!(gone.rate, 1.0);
        assert_close(gone.converted_value, 0.0);
        assert_close(gone.gain(), -50.0);
        assert_close(valuation.totals.value, 120.0);
        assert_close(valuation.totals.cost_basis, 250.0);
    }

    #[test]
    fn test_single_holding_with_conversion_and_dividend() {
        let holdings = vec![holding(
            "ABC",
            vec![order(2.0, 100.0, 5.0, 1.0)],
            vec![Dividend {
                amount: 10.0,
                withholding_tax: 1.5,
                ..Default::default()
            }],
        )];
        let quotes = quotes(vec![quote("ABC", "USD", 60.0)]);
        let rates: RateTable = [("USD".to_string(), 1.25)].into_iter().collect();

        let valuation = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let abc = valuation.holding("ABC").unwrap();

        assert_eq!(abc.rate, 0.8);
        assert_close(abc.value, 120.0);
        assert_close(abc.converted_value, 96.0);
        assert_close(abc.cost_basis, 106.0);
        assert_close(abc.gain(), -10.0);
        assert_close(abc.gain_pct(), 96.0 / 106.0 * 100.0 - 100.0);
        assert!((abc.gain_pct() - -9.43).abs() < 0.01);
        assert_close(abc.gain_incl_dividends(), 0.0);
        assert_close(abc.gain_incl_dividends_pct(), 0.0);
        assert_close(abc.dividends.tax(), 1.5);
        assert_close(abc.dividends.net(), 8.5);
        assert_close(abc.gain_after_tax(), -1.5);
        assert_eq!(abc.name, "ABC Corp.");
    }

    #[test]
    fn test_missing_rate_falls_back_to_one() {
        let holdings = vec![holding("XYZ", vec![order(3.0, 30.0, 0.0, 0.0)], vec![])];
        let quotes = quotes(vec![quote("XYZ", "CHF", 12.5)]);
        let rates: RateTable = [("USD".to_string(), 1.25)].into_iter().collect();

        let valuation = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let xyz = &valuation.holdings[0];
        assert_eq!(xyz.rate, 1.0);
        assert_eq!(xyz.converted_value, xyz.value);
        assert_close(xyz.value, 37.5);
    }

    #[test]
    fn test_holding_without_quote_is_skipped() {
        let holdings = vec![
            holding("AAA", vec![order(1.0, 10.0, 1.0, 0.0)], vec![]),
            holding(
                "MISSING",
                vec![order(100.0, 5000.0, 10.0, 2.0)],
                vec![Dividend {
                    amount: 50.0,
                    capital_gains_tax: 12.5,
                    ..Default::default()
                }],
            ),
        ];
        let quotes = quotes(vec![quote("AAA", "EUR", 12.0)]);

        let valuation = value_portfolio(&holdings, &quotes, &RateTable::default(), "EUR");
        assert_eq!(valuation.holdings.len(), 1);
        assert!(valuation.holding("MISSING").is_none());
        assert_close(valuation.totals.value, 12.0);
        assert_close(valuation.totals.cost_basis, 11.0);
        assert_eq!(valuation.totals.dividends, 0.0);
        assert_eq!(valuation.totals.dividend_tax, 0.0);
    }

    #[test]
    fn test_holdings_sorted_by_symbol() {
        let holdings = vec![
            holding("MSFT", vec![order(1.0, 1.0, 0.0, 0.0)], vec![]),
            holding("AAPL", vec![order(1.0, 1.0, 0.0, 0.0)], vec![]),
            holding("BAS.DE", vec![order(1.0, 1.0, 0.0, 0.0)], vec![]),
        ];
        let quotes = quotes(vec![
            quote("AAPL", "USD", 1.0),
            quote("MSFT", "USD", 1.0),
            quote("BAS.DE", "EUR", 1.0),
        ]);
        let rates = RateTable::default();

        let first = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let second = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let symbols: Vec<&str> = first.holdings.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "BAS.DE", "MSFT"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_totals_convert_each_holding() {
        let holdings = vec![
            holding(
                "USD1",
                vec![order(10.0, 500.0, 5.0, 0.0)],
                vec![Dividend {
                    amount: 20.0,
                    withholding_tax: 3.0,
                    church_tax: 1.0,
                    ..Default::default()
                }],
            ),
            holding(
                "EUR1",
                vec![order(4.0, 200.0, 0.0, 1.0), order(1.0, 60.0, 0.0, 1.0)],
                vec![Dividend {
                    amount: 8.0,
                    capital_gains_tax: 2.0,
                    solidarity_surcharge: 0.11,
                    ..Default::default()
                }],
            ),
        ];
        let quotes = quotes(vec![quote("USD1", "USD", 55.0), quote("EUR1", "EUR", 70.0)]);
        let rates: RateTable = [("USD".to_string(), 1.25), ("EUR".to_string(), 1.0)]
            .into_iter()
            .collect();

        let valuation = value_portfolio(&holdings, &quotes, &rates, "EUR");
        let totals = valuation.totals;

        // USD1: 550 USD * 0.8 = 440; EUR1: 5 * 70 = 350
        assert_close(totals.value, 790.0);
        // USD1: 505 * 0.8 = 404; EUR1: 262
        assert_close(totals.cost_basis, 666.0);
        assert_close(totals.dividends, 20.0 * 0.8 + 8.0);
        assert_close(totals.dividend_tax, 4.0 * 0.8 + 2.11);
        assert_close(totals.gain(), 124.0);
        assert_close(totals.gain_pct(), 790.0 / 666.0 * 100.0 - 100.0);
        assert_close(totals.gain_incl_dividends(), 790.0 + 24.0 - 666.0);

        let eur1 = valuation.holding("EUR1").unwrap();
        assert_close(eur1.quantity, 5.0);
        assert_close(eur1.order_price, 260.0);
        assert_close(eur1.fees, 2.0);
        assert_close(eur1.average_price(), 52.0);
    }

    #[test]
    fn test_zero_cost_basis_yields_non_finite_percentages() {
        let holdings = vec![
            holding(
                "GIFT",
                vec![order(2.0, 0.0, 0.0, 0.0)],
                vec![Dividend {
                    amount: 3.0,
                    ..Default::default()
                }],
            ),
            holding("EMPTY", vec![], vec![]),
        ];
        let quotes = quotes(vec![quote("GIFT", "EUR", 10.0), quote("EMPTY", "EUR", 10.0)]);

        let valuation = value_portfolio(&holdings, &quotes, &RateTable::default(), "EUR");
        let gift = valuation.holding("GIFT").unwrap();
        assert_eq!(gift.cost_basis, 0.0);
        assert_eq!(gift.gain_pct(), f64::INFINITY);
        assert_eq!(gift.gain_incl_dividends_pct(), f64::INFINITY);
        assert_close(gift.gain(), 20.0);

        // 0 / 0
        let empty = valuation.holding("EMPTY").unwrap();
        assert!(empty.gain_pct().is_nan());
        assert!(empty.average_price().is_nan());
    }

    #[test]
    fn test_name_falls_back_to_quote_then_symbol() {
        let mut named = holding("N1", vec![], vec![]);
        named.name = Some("Own Name".to_string());
        let mut short = quote("N2", "EUR", 1.0);
        short.long_name = None;
        short.short_name = Some("Short".to_string());
        let mut bare = quote("N3", "EUR", 1.0);
        bare.long_name = None;

        let rates = RateTable::default();
        assert_eq!(
            value_holding(&named, &quote("N1", "EUR", 1.0), &rates, "EUR").name,
            "Own Name"
        );
        assert_eq!(
            value_holding(&holding("N2", vec![], vec![]), &short, &rates, "EUR").name,
            "Short"
        );
        assert_eq!(
            value_holding(&holding("N3", vec![], vec![]), &bare, &rates, "EUR").name,
            "N3"
        );
    }
}
