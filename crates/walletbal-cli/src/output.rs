use std::io::Write;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use walletbal_core::{BalanceReport, FetchError, Portfolio, ProviderId};

use crate::cli::OutputFormat;
use crate::error::CliError;

const SEPARATOR_WIDTH: usize = 42;
const BALANCE_COLUMN: usize = 13;

#[derive(Debug, Serialize)]
struct PortfolioView<'a> {
    generated_at: String,
    target_currency: &'a str,
    total_fiat_value: f64,
    reports: Vec<ReportView<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    symbol: &'a str,
    provider: Option<ProviderId>,
    balance: f64,
    exchange_rate: f64,
    fiat_value: f64,
    error: Option<&'a FetchError>,
}

impl<'a> From<&'a BalanceReport> for ReportView<'a> {
    fn from(report: &'a BalanceReport) -> Self {
        Self {
            symbol: &report.symbol,
            provider: report.provider,
            balance: report.balance,
            exchange_rate: report.exchange_rate,
            fiat_value: report.fiat_value(),
            error: report.error.as_ref(),
        }
    }
}

pub fn render<W: Write>(
    portfolio: &Portfolio,
    format: OutputFormat,
    pretty: bool,
    generated_at: OffsetDateTime,
    writer: &mut W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let view = PortfolioView {
                generated_at: generated_at.format(&Rfc3339)?,
                target_currency: portfolio.target_currency(),
                total_fiat_value: portfolio.total_fiat_value(),
                reports: portfolio.reports().iter().map(ReportView::from).collect(),
            };
            let payload = if pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            writeln!(writer, "{payload}")?;
        }
        OutputFormat::Table => render_table(portfolio, writer)?,
    }

    Ok(())
}

fn render_table<W: Write>(portfolio: &Portfolio, writer: &mut W) -> Result<(), CliError> {
    let fiat = portfolio.target_currency().to_uppercase();
    let symbol_width = portfolio
        .reports()
        .iter()
        .map(|report| report.symbol.len())
        .max()
        .unwrap_or(0);

    for report in portfolio.reports() {
        let symbol = report.symbol.as_str();
        if let Some(error) = &report.error {
            writeln!(writer, "{symbol}: {error}")?;
            continue;
        }

        let balance_width = BALANCE_COLUMN.saturating_sub(symbol.len());
        writeln!(
            writer,
            "{symbol} balance: {balance:>balance_width$.6} {symbol:<symbol_width$} \
             (in {fiat}: {fiat_value:>7.2}$, 1 {symbol:<symbol_width$} = {rate:.2}$)",
            balance = report.balance,
            fiat_value = report.fiat_value(),
            rate = report.exchange_rate,
        )?;
    }

    writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    writeln!(
        writer,
        "{fiat} balance: {:.2}$",
        portfolio.total_fiat_value()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use time::macros::datetime;
    use walletbal_core::FetchOutcome;

    use super::*;

    fn portfolio() -> Portfolio {
        Portfolio::rank(
            "usd",
            vec![
                BalanceReport::merge(
                    "LTC",
                    Some(ProviderId::Cryptoid),
                    FetchOutcome::success(2.0),
                    FetchOutcome::success(50.0),
                ),
                BalanceReport::merge(
                    "BTC",
                    Some(ProviderId::Blockchain),
                    FetchOutcome::success(1.5),
                    FetchOutcome::success(100.0),
                ),
                BalanceReport::unresolved("XYZ", FetchError::unknown_currency("XYZ")),
            ],
        )
    }

    fn render_to_string(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render(
            &portfolio(),
            format,
            false,
            datetime!(2024-03-01 12:00:00 UTC),
            &mut buffer,
        )
        .expect("render should succeed");
        String::from_utf8(buffer).expect("output should be utf-8")
    }

    #[test]
    fn table_lists_ranked_reports_and_total() {
        let output = render_to_string(OutputFormat::Table);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "BTC balance:   1.500000 BTC (in USD:  150.00$, 1 BTC = 100.00$)"
        );
        assert!(lines[1].starts_with("LTC balance:"));
        assert!(lines[1].contains("(in USD:  100.00$, 1 LTC = 50.00$)"));
        assert_eq!(lines[2], "XYZ: unknown crypto-currency XYZ");
        assert_eq!(lines[3], "-".repeat(42));
        assert_eq!(lines[4], "USD balance: 250.00$");
    }

    #[test]
    fn json_carries_every_report_and_total() {
        let output = render_to_string(OutputFormat::Json);
        let payload: Value = serde_json::from_str(&output).expect("output should be json");

        assert_eq!(payload["generated_at"], "2024-03-01T12:00:00Z");
        assert_eq!(payload["target_currency"], "usd");
        assert_eq!(payload["total_fiat_value"], 250.0);

        let reports = payload["reports"].as_array().expect("reports array");
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0]["symbol"], "BTC");
        assert_eq!(reports[0]["provider"], "blockchain");
        assert_eq!(reports[0]["fiat_value"], 150.0);
        assert!(reports[0]["error"].is_null());
        assert_eq!(reports[2]["error"]["code"], "fetch.unknown_currency");
        assert_eq!(
            reports[2]["error"]["message"],
            "unknown crypto-currency XYZ"
        );
    }
}
