use anyhow::Context;

use shipping_dashboard::{run, DashboardConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let report = run(&config)
        .inspect_err(|err| log::error!("Dashboard {} stage failed: {err}", err.stage()))
        .with_context(|| {
            format!(
                "building dashboard from {} into {}",
                config.input_path.display(),
                config.output_dir.display()
            )
        })?;

    log::info!(
        "Wrote {} charts and {}",
        report.charts.len(),
        report.page.display()
    );
    Ok(())
}
