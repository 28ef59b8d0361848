//! Plain-text rendering of an analysis for the terminal.

use crate::models::{AiAnalysis, Recommendation, StressPoint};

const FULL: char = '█';
const HALF: char = '▌';
const MAX_LEVEL: f64 = 10.0;

/// Bar for a stress level, one cell per point, half cells for .5 and up.
fn bar(level: f64) -> String {
    let level = level.clamp(0.0, MAX_LEVEL);
    let whole = level.floor() as usize;
    let mut out: String = std::iter::repeat(FULL).take(whole).collect();
    if level - level.floor() >= 0.5 {
        out.push(HALF);
    }
    out
}

fn format_level(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{}", level as i64)
    } else {
        format!("{:.1}", level)
    }
}

/// Render the forecast as one bar per day.
///
/// Example output:
/// ```text
/// Mon 06-10 █████      5
/// Tue 06-11 █████████  9
/// Wed 06-12 █          1
/// ```
pub fn render_forecast(points: &[StressPoint]) -> String {
    if points.is_empty() {
        return "No forecast available.\n".to_string();
    }

    let mut output = String::new();
    for point in points {
        output.push_str(&format!(
            "{} {:<10} {}\n",
            point.date.format("%a %m-%d"),
            bar(point.stress_level),
            format_level(point.stress_level)
        ));
    }
    output
}

pub fn render_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "No recommendations.\n".to_string();
    }

    let mut output = String::new();
    for rec in recommendations {
        output.push_str("• ");
        output.push_str(&rec.title);
        output.push('\n');
        output.push_str("  ");
        output.push_str(&rec.text);
        output.push('\n');
    }
    output
}

pub fn render_analysis(analysis: &AiAnalysis) -> String {
    format!(
        "Stress forecast\n{}\nRecommendations\n{}",
        render_forecast(&analysis.stress_forecast),
        render_recommendations(&analysis.recommendations)
    )
}
