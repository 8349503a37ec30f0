// Dashboard page - Self-contained HTML for the current dashboard state
use crate::application::controller::{DashboardState, DashboardView};
use crate::domain::dashboard::{ChartContent, ChartSlot, Delta, Sentiment, SummaryCard};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Render a self-contained page for the current dashboard state.
///
/// The template goes through `replace` rather than `format!()` so the CSS and JS
/// braces need no escaping.
pub fn render_page(state: &DashboardState) -> anyhow::Result<String> {
    let (title, body, charts) = match state {
        DashboardState::Loading => (
            "Attendance Dashboard".to_string(),
            r#"<div class="loading">Loading dashboard...</div>"#.to_string(),
            "[]".to_string(),
        ),
        DashboardState::Failed(_) => (
            "Attendance Dashboard".to_string(),
            r#"<div class="failed">The dashboard could not be loaded.</div>"#.to_string(),
            "[]".to_string(),
        ),
        DashboardState::Ready(view) => (
            view.tree.title.clone(),
            ready_body(view),
            script_json(&serde_json::to_string(&view.charts)?),
        ),
    };

    let refresh = if matches!(state, DashboardState::Loading) {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    Ok(TEMPLATE
        .replace("__REFRESH__", refresh)
        .replace("__TITLE__", &encode_text(&title))
        .replace("__BODY__", &body)
        .replace("__CHARTS__", &charts))
}

fn ready_body(view: &DashboardView) -> String {
    let mut html = String::new();
    html.push_str(&format!("<h1>{}</h1>", encode_text(&view.tree.title)));

    html.push_str(r#"<div class="summary-cards">"#);
    for card in &view.tree.summary {
        summary_card(&mut html, card);
    }
    html.push_str("</div>");

    for row in &view.tree.rows {
        html.push_str(r#"<div class="chart-row">"#);
        for slot in &row.slots {
            chart_slot(&mut html, slot);
        }
        html.push_str("</div>");
    }

    html
}

fn summary_card(html: &mut String, card: &SummaryCard) {
    let (class, text) = match &card.delta {
        Delta::Available { text, sentiment } => {
            let class = match sentiment {
                Sentiment::Positive => "positive",
                Sentiment::Negative => "negative",
                Sentiment::Neutral => "neutral",
            };
            (class, encode_text(text).into_owned())
        }
        Delta::Unavailable => ("unavailable", "No comparison available".to_string()),
    };

    html.push_str(&format!(
        r#"<div class="card" id="card-{}"><h3>{}</h3><p class="value">{}</p><p class="change {}">{}</p></div>"#,
        encode_double_quoted_attribute(card.id),
        encode_text(card.title),
        encode_text(&card.value),
        class,
        text
    ));
}

fn chart_slot(html: &mut String, slot: &ChartSlot) {
    let inner = match &slot.content {
        ChartContent::Ready { .. } => format!(r#"<canvas id="chart-{}"></canvas>"#, slot.key.as_str()),
        ChartContent::Unavailable { .. } => r#"<p class="unavailable">Chart unavailable</p>"#.to_string(),
    };

    html.push_str(&format!(
        r#"<div class="chart-container" style="flex: {}"><h3>{}</h3><div class="chart-wrapper">{}</div></div>"#,
        slot.flex,
        encode_text(slot.title),
        inner
    ));
}

/// Keep embedded JSON from closing the surrounding script element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
__REFRESH__
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; padding: 12px 16px; color: #222; }
  h1 { font-size: 20px; margin: 0 0 12px; }
  h3 { font-size: 13px; margin: 0 0 6px; color: #555; }
  .loading, .failed { padding: 48px; text-align: center; color: #666; }
  .summary-cards { display: flex; gap: 12px; margin-bottom: 12px; }
  .card { flex: 1; border: 1px solid #e3e3e3; border-radius: 8px; padding: 10px 12px; background: #fafafa; }
  .card .value { font-size: 22px; font-weight: 600; margin: 0; }
  .change { font-size: 12px; margin: 4px 0 0; }
  .change.positive { color: #2e7d32; }
  .change.negative { color: #c62828; }
  .change.neutral, .change.unavailable { color: #888; }
  .chart-row { display: flex; gap: 15px; flex-wrap: wrap; margin-bottom: 12px; }
  .chart-container { border: 1px solid #e3e3e3; border-radius: 8px; padding: 10px; min-width: 280px; }
  .chart-wrapper { position: relative; height: 220px; }
  .unavailable { color: #888; text-align: center; padding-top: 90px; margin: 0; }
</style>
</head>
<body>
__BODY__
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<script>
const CHARTS = __CHARTS__;
for (const chart of CHARTS) {
  const canvas = document.getElementById("chart-" + chart.key);
  if (canvas && window.Chart) {
    new Chart(canvas, chart.config);
  }
}
</script>
</body>
</html>
"#;
