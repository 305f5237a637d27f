// Chart rendering for the dashboard
// Uses charts-rs: build an SVG, then rasterize to PNG

use charts_rs::{svg_to_png, BarChart, Box as ChartBox, Series, THEME_DARK};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Bar chart of PP earned per month
/// Returns PNG bytes
pub fn generate_monthly_chart(monthly_pp: &[u64; 12], year: i32) -> Result<Vec<u8>, String> {
    if monthly_pp.iter().all(|&pp| pp == 0) {
        return Err("No flights to chart".to_string());
    }

    let values: Vec<f32> = monthly_pp.iter().map(|&pp| pp as f32).collect();
    let series: Series = ("PP", values).into();

    let mut bar_chart = BarChart::new_with_theme(
        vec![series],
        MONTHS.iter().map(|m| m.to_string()).collect(),
        THEME_DARK,
    );

    bar_chart.width = 800.0;
    bar_chart.height = 450.0;
    bar_chart.title_text = format!("Premium Points by Month - {}", year);
    bar_chart.title_font_size = 24.0;
    bar_chart.legend_show = Some(false);
    bar_chart.legend_margin = Some(ChartBox {
        top: 50.0,
        bottom: 10.0,
        left: 10.0,
        right: 10.0,
    });

    let svg = bar_chart
        .svg()
        .map_err(|e| format!("SVG generation failed: {:?}", e))?;

    svg_to_png(&svg).map_err(|e| format!("PNG conversion failed: {:?}", e))
}
