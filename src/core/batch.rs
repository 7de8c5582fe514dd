use crate::core::estimator::PriceEstimator;
use crate::domain::model::FormInput;
use crate::domain::ports::VariationSource;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Clone, Deserialize)]
struct BatchRow {
    brand: String,
    fuel_type: String,
    transmission: String,
    mileage: String,
    years_used: String,
    accident: String,
    clean_title: String,
}

impl BatchRow {
    fn form_input(&self) -> FormInput {
        FormInput {
            brand: self.brand.clone(),
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            mileage: self.mileage.clone(),
            years_used: self.years_used.clone(),
            accident: self.accident.clone(),
            clean_title: self.clean_title.clone(),
            ..FormInput::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct PricedRow<'a> {
    brand: &'a str,
    fuel_type: &'a str,
    transmission: &'a str,
    mileage: &'a str,
    years_used: &'a str,
    accident: &'a str,
    clean_title: &'a str,
    price: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub estimated: usize,
    pub skipped: usize,
}

/// Prices every row of a vehicle CSV and writes the rows back with a `price`
/// column. Rows that cannot be read or parsed are logged and skipped.
pub fn estimate_csv<R, W, V>(
    input: R,
    output: W,
    estimator: &mut PriceEstimator<V>,
) -> Result<BatchSummary>
where
    R: Read,
    W: Write,
    V: VariationSource,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut summary = BatchSummary::default();

    for (index, row) in reader.deserialize::<BatchRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };

        let vehicle = match row.form_input().parse() {
            Ok(vehicle) => vehicle,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };

        let estimate = estimator.estimate(&vehicle.to_attributes());
        writer.serialize(PricedRow {
            brand: &row.brand,
            fuel_type: &row.fuel_type,
            transmission: &row.transmission,
            mileage: &row.mileage,
            years_used: &row.years_used,
            accident: &row.accident,
            clean_title: &row.clean_title,
            price: estimate.formatted_price(),
        })?;
        summary.estimated += 1;
    }

    writer.flush()?;
    tracing::info!(
        "Batch finished: {} estimated, {} skipped",
        summary.estimated,
        summary.skipped
    );
    Ok(summary)
}
