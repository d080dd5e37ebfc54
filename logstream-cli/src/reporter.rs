//! Static HTML dashboard for a [`StatsSnapshot`].

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use logstream_analyzer::{ServiceStats, StatsSnapshot};
use logstream_common::{LogStreamError, Result};
use tracing::info;

use crate::config::{ERROR_RATE_OK, ERROR_RATE_WARN, P99_HIGH_MS, P99_MEDIUM_MS};

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        h1 {
            color: white;
            text-align: center;
            margin-bottom: 30px;
            font-size: 2.5em;
            text-shadow: 2px 2px 4px rgba(0,0,0,0.2);
        }
        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
            margin-bottom: 30px;
        }
        .stat-card {
            background: white;
            border-radius: 10px;
            padding: 25px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
        }
        .stat-label {
            font-size: 0.9em;
            color: #666;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin-bottom: 10px;
        }
        .stat-value { font-size: 2.5em; font-weight: bold; color: #333; }
        .services-section {
            background: white;
            border-radius: 10px;
            padding: 30px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
        }
        h2 { color: #333; margin-bottom: 20px; font-size: 1.5em; }
        table { width: 100%; border-collapse: collapse; margin-top: 15px; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #e0e0e0; }
        th {
            background-color: #667eea;
            color: white;
            font-weight: 600;
            text-transform: uppercase;
            font-size: 0.85em;
            letter-spacing: 0.5px;
        }
        tr:hover { background-color: #f5f5f5; }
        td { color: #555; }
        .latency-high { color: #f44336; font-weight: bold; }
        .latency-medium { color: #ff9800; }
        .latency-low { color: #4caf50; }
        .footer { text-align: center; color: white; margin-top: 30px; opacity: 0.8; font-size: 0.9em; }
"#;

/// Render the full HTML document.
pub fn render_html(stats: &StatsSnapshot) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("    <title>Log Stream Analyzer - Monitoring Dashboard</title>\n");
    html.push_str("    <style>");
    html.push_str(STYLE);
    let _ = writeln!(
        html,
        "        .stat-value.error-rate {{ color: {}; }}",
        error_rate_color(stats.error_rate)
    );
    html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
    html.push_str("        <h1>Log Stream Analyzer</h1>\n\n");

    html.push_str("        <div class=\"stats-grid\">\n");
    stat_card(&mut html, "Total Logs", "stat-value", &format_thousands(stats.total_logs));
    stat_card(&mut html, "Error Rate", "stat-value error-rate", &format!("{:.2}%", stats.error_rate));
    stat_card(&mut html, "Overall P99 Latency", "stat-value", &format!("{:.2}ms", stats.overall_p99()));
    html.push_str("        </div>\n\n");

    html.push_str("        <div class=\"services-section\">\n");
    html.push_str("            <h2>Services Performance</h2>\n");
    html.push_str("            <table>\n                <thead>\n                    <tr>\n");
    for header in [
        "Service Name",
        "Request Count",
        "P50 Latency (ms)",
        "P99 Latency (ms)",
        "Min (ms)",
        "Max (ms)",
    ] {
        let _ = writeln!(html, "                        <th>{header}</th>");
    }
    html.push_str("                    </tr>\n                </thead>\n                <tbody>\n");
    for (name, service) in &stats.services {
        service_row(&mut html, name, service);
    }
    html.push_str("                </tbody>\n            </table>\n        </div>\n\n");

    html.push_str("        <div class=\"footer\">\n            Generated by Log Stream Analyzer\n        </div>\n");
    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

/// Render `stats` and write it to `path`, replacing any existing file.
pub fn write_report(stats: &StatsSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_html(stats)).map_err(|e| LogStreamError::ReportWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("Report written to {}", path.display());
    Ok(())
}

pub fn error_rate_color(error_rate: f64) -> &'static str {
    if error_rate < ERROR_RATE_OK {
        "#4caf50"
    } else if error_rate < ERROR_RATE_WARN {
        "#ff9800"
    } else {
        "#f44336"
    }
}

pub fn p99_class(p99: f64) -> &'static str {
    if p99 > P99_HIGH_MS {
        "latency-high"
    } else if p99 > P99_MEDIUM_MS {
        "latency-medium"
    } else {
        "latency-low"
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn stat_card(html: &mut String, label: &str, value_class: &str, value: &str) {
    let _ = write!(
        html,
        "            <div class=\"stat-card\">\n\
         \x20               <div class=\"stat-label\">{label}</div>\n\
         \x20               <div class=\"{value_class}\">{value}</div>\n\
         \x20           </div>\n"
    );
}

fn service_row(html: &mut String, name: &str, service: &ServiceStats) {
    let _ = write!(
        html,
        "                    <tr>\n\
         \x20                       <td><strong>{name}</strong></td>\n\
         \x20                       <td>{count}</td>\n\
         \x20                       <td>{p50:.2}</td>\n\
         \x20                       <td class=\"{class}\">{p99:.2}</td>\n\
         \x20                       <td>{min:.2}</td>\n\
         \x20                       <td>{max:.2}</td>\n\
         \x20                   </tr>\n",
        name = escape_html(name),
        count = format_thousands(service.count),
        p50 = service.p50,
        class = p99_class(service.p99),
        p99 = service.p99,
        min = service.min,
        max = service.max,
    );
}
