mod bootstrap;

use anyhow::{bail, Result};
use dashboard_core::settings::Settings;
use dashboard_data::table::Table;
use dashboard_report::report::{render_dashboard, ReportOptions};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Sales dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let Some(csv) = settings.csv.clone() else {
        if settings.clear {
            println!("Saved configuration cleared.");
            return Ok(());
        }
        bail!("no CSV file given; pass the path to a sales export");
    };

    let table = match Table::load_file(&csv, settings.coercion_policy()) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!("Failed to load {}: {}", csv.display(), err);
            bail!("could not load data: {err}");
        }
    };

    tracing::info!("Loaded {} clean rows from {}", table.row_count(), csv.display());
    if table.coerced_values() > 0 {
        tracing::warn!(
            "{} numeric values were unparsable and defaulted to 0.0",
            table.coerced_values()
        );
    }

    let report = render_dashboard(
        &table,
        &ReportOptions {
            top_products: settings.top_products as usize,
        },
    );
    print!("{report}");

    Ok(())
}
