//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use quizsmith_core::report::AttemptReport;
use quizsmith_core::statistics::PointTally;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a graded attempt.
pub fn generate_html(report: &AttemptReport) -> String {
    let result = &report.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizsmith report: {}</title>\n",
        html_escape(&report.assessment.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.assessment.title)));
    if !report.assessment.description.is_empty() {
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&report.assessment.description)
        ));
    }
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | time limit {} min | graded {}</p>\n",
        report.assessment.question_count,
        report.assessment.time_limit,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Score</th><th>Percentage</th><th>Time taken</th><th>Result</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}/{}</td><td>{:.1}%</td><td>{:.1} min</td><td>{}</td></tr></tbody>\n",
        result.score,
        result.total_points,
        result.percentage,
        result.time_taken,
        html_escape(report.tier.message())
    ));
    html.push_str("</table>\n");
    if report.over_time_limit() {
        html.push_str("<p class=\"warn\">Finished over the time limit.</p>\n");
    }

    if !report.breakdown.by_difficulty.is_empty() {
        html.push_str("<h3>By difficulty</h3>\n");
        let rows: Vec<(String, PointTally)> = report
            .breakdown
            .by_difficulty
            .iter()
            .map(|(d, t)| (d.to_string(), *t))
            .collect();
        html.push_str(&generate_bar_chart(&rows));
    }

    html.push_str("</section>\n");

    // Per-question feedback
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Feedback</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Result</th><th onclick=\"sortTable(3)\">Points</th><th>Explanation</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for (i, f) in result.feedback.iter().enumerate() {
        let class = if f.correct { "pass" } else { "fail" };
        let text = if f.correct { "Correct" } else { "Incorrect" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            i + 1,
            html_escape(&f.question_id),
            text,
            f.points_awarded,
            html_escape(&f.explanation)
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AttemptReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(rows: &[(String, PointTally)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 100,
        total_height
    );

    for (i, (label, tally)) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let share = tally.percentage() / 100.0;
        let width = (share * max_width as f64) as usize;

        let color = if share >= 0.8 {
            "#22c55e"
        } else if share >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}/{} pts</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            tally.earned,
            tally.possible
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.warn { color: #b45309; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
