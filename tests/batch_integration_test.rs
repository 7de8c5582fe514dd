use anyhow::Result;
use car_price_advisor::core::batch::estimate_csv;
use car_price_advisor::core::estimator::{MAX_VARIATION, MIN_VARIATION, PRICE_FLOOR};
use car_price_advisor::{PriceEstimator, RandomVariation};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tempfile::TempDir;

const INPUT: &str = "\
brand,fuel_type,transmission,mileage,years_used,accident,clean_title
Toyota,gasoline,automatic,0,0,0,yes
tesla,electric,automatic,30000,2,0,yes
kia,hybrid,cvt,210000,14,3,no
yugo,steam,sequential,90000,30,0,yes
ford,gasoline,manual,-100,5,0,yes
";

fn run(seed: u64, dir: &TempDir, name: &str) -> Result<(usize, usize, String)> {
    let input_path = dir.path().join("vehicles.csv");
    std::fs::write(&input_path, INPUT)?;
    let output_path = dir.path().join(name);

    let mut estimator = PriceEstimator::new(RandomVariation::seeded(seed));
    let summary = {
        let input = BufReader::new(File::open(&input_path)?);
        let output = BufWriter::new(File::create(&output_path)?);
        estimate_csv(input, output, &mut estimator)?
    };

    Ok((
        summary.estimated,
        summary.skipped,
        std::fs::read_to_string(&output_path)?,
    ))
}

#[test]
fn test_batch_prices_file() -> Result<()> {
    let dir = TempDir::new()?;
    let (estimated, skipped, written) = run(11, &dir, "priced.csv")?;

    assert_eq!(estimated, 4);
    assert_eq!(skipped, 1);

    let mut reader = csv::Reader::from_reader(written.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(7), Some("price"));

    let prices: Vec<f64> = reader
        .records()
        .map(|record| record.unwrap()[7].parse().unwrap())
        .collect();
    assert_eq!(prices.len(), 4);
    assert!(prices.iter().all(|price| *price >= PRICE_FLOOR));

    // Brand lookup ignores case: 25000 * 1.2 * 1.1 * 1.1 within the variation band.
    let toyota = prices[0];
    assert!(toyota >= 36_300.0 * MIN_VARIATION - 0.01);
    assert!(toyota <= 36_300.0 * MAX_VARIATION + 0.01);
    Ok(())
}

#[test]
fn test_same_seed_same_output() -> Result<()> {
    let dir = TempDir::new()?;
    let (_, _, first) = run(5, &dir, "first.csv")?;
    let (_, _, second) = run(5, &dir, "second.csv")?;
    assert_eq!(first, second);
    Ok(())
}
