use anyhow::Result;
use ip_cardinality::comparison;
use ip_cardinality::counters::estimator::relative_standard_error;
use ip_cardinality::counters::hashing::DefaultHasher;
use ip_cardinality::synthetic::{SyntheticAddresses, with_duplicates};
use ip_cardinality::{Counter, HLLCounter};
use plotters::prelude::*;
use rayon::prelude::*;
use tracing::info;

use crate::demo::access_log::print_report;

pub type SeedData = (u32, Vec<(f64, f64)>);

const PLOT_PRECISIONS: [u8; 3] = [8, 11, 14];
const MAX_LOG2_N: u32 = 20;

pub fn run(count: usize, duplicates: usize, seed: u32, precision: u8) -> Result<()> {
    let items = with_duplicates(seed, count, duplicates);
    info!(distinct = count, total = items.len(), "generated synthetic addresses");

    let report = comparison::compare(&items, precision)?;
    print_report(&report, false)?;
    println!(
        "{:>25} {:>15} {:>14.3}%",
        "Relative Error",
        "",
        100f64 * report.relative_error()
    );
    println!(
        "{:>25} {:>15} {:>14.3}%",
        "Expected Error (1 sd)",
        "",
        100f64 * report.expected_error()
    );
    Ok(())
}

fn process_seed(seed: u32, ns: &[u64]) -> Result<[SeedData; 3]> {
    let mut points: [Vec<(f64, f64)>; 3] = Default::default();
    let mut counters = PLOT_PRECISIONS
        .iter()
        .map(|&p| HLLCounter::<DefaultHasher>::new(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut addresses = SyntheticAddresses::new(seed);
    let mut last_n = 0;
    for &n in ns {
        for address in addresses.by_ref().take((n - last_n) as usize) {
            for counter in counters.iter_mut() {
                counter.add(address.as_bytes());
            }
        }
        last_n = n;

        for (series, counter) in points.iter_mut().zip(counters.iter()) {
            series.push((n as f64, counter.estimate()));
        }
    }

    let [a, b, c] = points;
    Ok([(seed, a), (seed, b), (seed, c)])
}

fn collect_test_data() -> Result<[Vec<SeedData>; 3]> {
    let seeds: Vec<u32> = (1..=9).collect();
    let ns: Vec<u64> = (0..=MAX_LOG2_N).map(|i| 1u64 << i).collect();

    let results = seeds
        .par_iter()
        .map(|&seed| process_seed(seed, &ns))
        .collect::<Result<Vec<_>>>()?;

    let mut data: [Vec<SeedData>; 3] = Default::default();
    for per_precision in results {
        for (column, seed_data) in data.iter_mut().zip(per_precision) {
            column.push(seed_data);
        }
    }
    Ok(data)
}

/// Draws one relative-error-vs-n panel per precision in `PLOT_PRECISIONS`,
/// with the expected standard error shaded around zero.
pub fn plot_accuracy(path: &str) -> Result<()> {
    println!("Collecting accuracy data...");
    let data = collect_test_data()?;

    let max_n = (1u64 << MAX_LOG2_N) as f64;

    let root = BitMapBackend::new(path, (2400, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, PLOT_PRECISIONS.len()));

    for ((panel, &precision), column) in panels
        .iter()
        .zip(PLOT_PRECISIONS.iter())
        .zip(data.iter())
    {
        let sigma = relative_standard_error(precision);
        let y_limit = 5.0 * sigma;

        let mut chart = ChartBuilder::on(panel)
            .caption(
                format!("p = {}, 1.04/sqrt(m) = {:.2}%", precision, 100.0 * sigma),
                ("sans-serif", 28),
            )
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d((1.0f64..max_n).log_scale(), -y_limit..y_limit)?;

        chart
            .configure_mesh()
            .x_desc("distinct addresses")
            .y_desc("relative error")
            .y_label_formatter(&|y| format!("{:+.1}%", 100.0 * y))
            .label_style(("sans-serif", 18))
            .draw()?;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(1.0, -sigma), (max_n, sigma)],
            BLACK.mix(0.08).filled(),
        )))?;

        for (i, (seed, points)) in column.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            let errors = points.iter().map(|&(n, estimate)| (n, (estimate - n) / n));
            chart
                .draw_series(LineSeries::new(errors, color.stroke_width(2)))?
                .label(format!("seed {}", seed))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    root.present()?;
    println!("Plot saved to {}", path);

    Ok(())
}
