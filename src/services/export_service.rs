use std::io::Write;

use csv::WriterBuilder;

use crate::errors::AppError;
use crate::models::Quote;

pub const EXPORT_HEADER: [&str; 11] = [
    "Symbol",
    "Name",
    "Price",
    "Currency",
    "Change %",
    "Volume",
    "MA(20)",
    "RSI (14)",
    "Volatility %",
    "Outlook",
    "Favorable",
];

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write `quotes` as a spreadsheet-friendly CSV document, header first.
pub fn write_quotes_csv<W: Write>(writer: W, quotes: &[Quote]) -> Result<(), AppError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;

    for q in quotes {
        wtr.write_record([
            q.symbol.clone(),
            q.name.clone(),
            format!("{:.2}", q.price),
            q.currency.clone(),
            format!("{:.2}", q.change_pct),
            opt_cell(q.volume),
            opt_cell(q.technicals.ma_20),
            opt_cell(q.technicals.rsi_14),
            opt_cell(q.technicals.volatility_pct),
            q.technicals.outlook.clone(),
            if q.is_favorable { "yes" } else { "no" }.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
