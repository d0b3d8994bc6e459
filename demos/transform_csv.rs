//! Apply every transform to a CSV file of compositions.
//!
//! ```text
//! cargo run --example transform_csv -- data.csv
//! ```
//!
//! Without an argument a small built-in dataset is used.

use compositions::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = match std::env::args().nth(1) {
        Some(path) => Matrix::from_csv_path(path)?,
        None => Matrix::from_rows(vec![
            vec![0.2, 0.3, 0.5],
            vec![10.0, 20.0, 70.0],
            vec![2.0, 4.0, 8.0],
        ])?,
    };

    println!("=== Input ===\n");
    print!("{}", data);
    println!();

    let config = TransformConfig::default();
    for kind in Transform::ALL {
        let out = transform(kind, &data, &config)?;
        println!("=== {} ===\n", kind.name().to_uppercase());
        print!("{}", out.to_csv3_string());
        println!();
    }

    Ok(())
}
