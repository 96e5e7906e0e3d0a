use plotters::prelude::*;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Nothing to chart")]
    Empty,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Draw a vertical bar chart of `(label, count)` pairs as a PNG.
pub fn render_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, usize)],
) -> Result<(), ChartError> {
    if bars.is_empty() {
        return Err(ChartError::Empty);
    }

    let width = (bars.len() as u32 * 40).clamp(640, 2400);
    let max = bars.iter().map(|(_, c)| *c).max().unwrap_or(0);

    let root = BitMapBackend::new(path, (width, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0..max + 1)
        .map_err(render_err)?;

    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => bars.get(*i).map(|(l, _)| l.clone()).unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(bars.len())
        .x_label_formatter(&label_of)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.6).filled())
                .margin(4)
                .data(bars.iter().enumerate().map(|(i, (_, c))| (i, *c))),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
