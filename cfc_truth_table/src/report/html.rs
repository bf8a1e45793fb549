//! Self-contained HTML report
//!
//! Summary cards and strategy cards are rendered here. The truth table and
//! the file impact matrix are rendered in the browser from the embedded data
//! document, which also drives the filters. No external resources are loaded.

use super::data::TruthTableDocument;
use crate::config::constants::report::{SUBTITLE, TITLE};

const STYLE: &str = r#"
body { font-family: 'Segoe UI', sans-serif; margin: 20px; background: #f8f9fa; color: #212529; }
.container { max-width: 1400px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.header { text-align: center; margin-bottom: 30px; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
.stat-card { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px; text-align: center; }
.stat-number { font-size: 2em; font-weight: bold; }
.stat-label { font-size: 0.9em; opacity: 0.9; }
.distribution { display: flex; height: 14px; border-radius: 7px; overflow: hidden; margin: 10px 0 30px; }
.distribution .valid { background: #28a745; }
.distribution .invalid { background: #dc3545; }
.section { margin: 30px 0; }
.section h2 { border-bottom: 2px solid #667eea; padding-bottom: 6px; }
.strategies { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 15px; }
.strategy-card { border: 1px solid #dee2e6; border-radius: 8px; padding: 15px; }
.strategy-card h3 { margin: 0 0 6px; font-size: 1.05em; }
.strategy-count { color: #667eea; font-weight: bold; }
details summary { cursor: pointer; color: #495057; margin-top: 8px; }
details ul { font-family: monospace; font-size: 0.8em; padding-left: 18px; }
.filters { display: flex; gap: 10px; margin: 10px 0; flex-wrap: wrap; }
.filters input, .filters select { padding: 6px 10px; border: 1px solid #ced4da; border-radius: 4px; }
.filters input { flex: 1; min-width: 240px; }
table { width: 100%; border-collapse: collapse; font-size: 0.85em; }
th, td { border: 1px solid #dee2e6; padding: 6px 8px; text-align: left; vertical-align: top; }
th { background: #f1f3f5; position: sticky; top: 0; }
tr.invalid td { background: #fff5f5; color: #868e96; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 0.8em; color: white; }
.badge.valid { background: #28a745; }
.badge.invalid { background: #dc3545; }
.files { font-family: monospace; font-size: 0.85em; }
.muted { color: #868e96; }
.file-impact { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 10px; }
.file-impact-card { border-left: 4px solid #667eea; background: #f8f9fa; padding: 10px 12px; border-radius: 4px; }
.file-impact-card .file { font-family: monospace; font-weight: bold; }
"#;

const SCRIPT: &str = r#"
(function () {
  const data = JSON.parse(document.getElementById('truth-table-data').textContent);
  const rows = Object.entries(data.configurations);

  const text = document.getElementById('filter-text');
  const runtime = document.getElementById('filter-runtime');
  const validity = document.getElementById('filter-valid');
  const body = document.getElementById('truth-table-body');
  const shown = document.getElementById('shown-count');

  function cell(content, className) {
    const td = document.createElement('td');
    if (className) td.className = className;
    td.textContent = content;
    return td;
  }

  function render() {
    const needle = text.value.trim().toLowerCase();
    body.replaceChildren();
    let count = 0;

    for (const [key, entry] of rows) {
      const c = entry.configuration;
      if (runtime.value && c.runtime !== runtime.value) continue;
      if (validity.value && String(entry.valid) !== validity.value) continue;
      const haystack = [key].concat(entry.expected_resources, entry.files_involved).join(' ').toLowerCase();
      if (needle && !haystack.includes(needle)) continue;

      const tr = document.createElement('tr');
      if (!entry.valid) tr.className = 'invalid';
      tr.appendChild(cell(key, 'files'));
      tr.appendChild(cell(c.runtime));
      tr.appendChild(cell(c.topology));
      tr.appendChild(cell(c.security_profile));
      tr.appendChild(cell(c.domain_config));
      tr.appendChild(cell(c.ssl_config));
      tr.appendChild(cell(c.subdomain_config));

      const status = document.createElement('td');
      const badge = document.createElement('span');
      badge.className = 'badge ' + (entry.valid ? 'valid' : 'invalid');
      badge.textContent = entry.valid ? 'VALID' : 'INVALID';
      status.appendChild(badge);
      tr.appendChild(status);

      tr.appendChild(cell(String(entry.resource_count)));
      tr.appendChild(cell(entry.valid ? entry.files_involved.join(', ') : entry.reason, entry.valid ? 'files' : 'muted'));
      body.appendChild(tr);
      count += 1;
    }

    shown.textContent = count + ' of ' + rows.length + ' configurations shown';
  }

  function renderImpact() {
    const container = document.getElementById('file-impact');
    for (const [file, keys] of Object.entries(data.test_matrix)) {
      const card = document.createElement('div');
      card.className = 'file-impact-card';
      const name = document.createElement('div');
      name.className = 'file';
      name.textContent = file;
      const affected = document.createElement('div');
      affected.className = 'muted';
      affected.textContent = 'Affects ' + keys.length + ' configurations';
      card.appendChild(name);
      card.appendChild(affected);
      container.appendChild(card);
    }
  }

  text.addEventListener('input', render);
  runtime.addEventListener('change', render);
  validity.addEventListener('change', render);
  render();
  renderImpact();
})();
"#;

/// Escape text for element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON safe to place inside a `<script>` element
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn stat_card(value: impl std::fmt::Display, label: &str) -> String {
    format!(
        "<div class=\"stat-card\"><div class=\"stat-number\">{}</div><div class=\"stat-label\">{}</div></div>\n",
        value,
        escape_html(label)
    )
}

/// Render the report page around an already-serialised data document
pub fn render_report(document: &TruthTableDocument<'_>, data_json: &str) -> String {
    let metadata = &document.metadata;
    let mut html = String::with_capacity(data_json.len() + 16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(TITLE)));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    // Header
    html.push_str(&format!(
        "<div class=\"header\"><h1>{}</h1><p>{}</p><p class=\"muted\">Generated {} &middot; v{}</p></div>\n",
        escape_html(TITLE),
        escape_html(SUBTITLE),
        escape_html(&metadata.generated_at),
        escape_html(metadata.generator_version)
    ));

    // Summary
    html.push_str("<div class=\"stats\">\n");
    html.push_str(&stat_card(metadata.total_configurations, "Total Configurations"));
    html.push_str(&stat_card(metadata.valid_configurations, "Valid Configurations"));
    html.push_str(&stat_card(metadata.invalid_configurations, "Invalid Configurations"));
    html.push_str(&stat_card(metadata.mapped_artifacts, "Factory Files Mapped"));
    html.push_str("</div>\n");

    let valid_share = metadata.valid_percentage;
    html.push_str(&format!(
        "<div class=\"distribution\" title=\"{:.1}% valid\"><div class=\"valid\" style=\"width: {:.1}%\"></div><div class=\"invalid\" style=\"width: {:.1}%\"></div></div>\n",
        valid_share,
        valid_share,
        100.0 - valid_share
    ));

    // Strategies
    html.push_str("<div class=\"section\"><h2>Test Strategies</h2><div class=\"strategies\">\n");
    for strategy in document.strategies() {
        html.push_str(&format!(
            "<div class=\"strategy-card\"><h3>{}</h3><div>{}</div><div class=\"strategy-count\">{} configurations</div><details><summary>Show configurations</summary><ul>",
            escape_html(strategy.name),
            escape_html(strategy.description),
            strategy.len()
        ));
        for key in &strategy.configurations {
            html.push_str(&format!("<li>{}</li>", escape_html(key)));
        }
        html.push_str("</ul></details></div>\n");
    }
    html.push_str("</div></div>\n");

    // Truth table
    html.push_str(
        "<div class=\"section\"><h2>Truth Table</h2>\n\
         <div class=\"filters\">\
         <input id=\"filter-text\" type=\"search\" placeholder=\"Filter by key, resource or file\">\
         <select id=\"filter-runtime\"><option value=\"\">All runtimes</option><option value=\"EC2\">EC2</option><option value=\"FARGATE\">FARGATE</option></select>\
         <select id=\"filter-valid\"><option value=\"\">All</option><option value=\"true\">Valid only</option><option value=\"false\">Invalid only</option></select>\
         </div>\n<p id=\"shown-count\" class=\"muted\"></p>\n\
         <table><thead><tr><th>Configuration</th><th>Runtime</th><th>Topology</th><th>Security</th><th>Domain</th><th>SSL</th><th>Subdomain</th><th>Status</th><th>Resources</th><th>Files</th></tr></thead>\
         <tbody id=\"truth-table-body\"></tbody></table></div>\n",
    );

    // File impact
    html.push_str(
        "<div class=\"section\"><h2>File Impact Matrix</h2><div id=\"file-impact\" class=\"file-impact\"></div></div>\n",
    );

    html.push_str("</div>\n<script id=\"truth-table-data\" type=\"application/json\">");
    html.push_str(&embed_json(data_json));
    html.push_str("</script>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_index::{ImpactMatrix, ResourceFileIndex};
    use crate::strategies::StrategySelector;
    use crate::table::TruthTableBuilder;
    use chrono::Utc;

    fn rendered() -> String {
        let index = ResourceFileIndex::global();
        let table = TruthTableBuilder::new().build();
        let strategies = StrategySelector::new().select(&table);
        let impact = ImpactMatrix::from_table(&table, index);
        let document = TruthTableDocument::new(&table, &strategies, &impact, index, Utc::now());
        let json = document.to_json(false).unwrap();
        render_report(&document, &json)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_embed_json_cannot_close_script() {
        assert_eq!(embed_json(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }

    #[test]
    fn test_report_is_self_contained() {
        let html = rendered();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<script src"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
    }

    #[test]
    fn test_report_contains_summary_and_strategies() {
        let html = rendered();
        assert!(html.contains("<div class=\"stat-number\">96</div>"));
        assert!(html.contains("<div class=\"stat-number\">60</div>"));
        assert!(html.contains("<div class=\"stat-number\">36</div>"));
        assert!(html.contains("<div class=\"stat-number\">17</div>"));
        assert!(html.contains("<h3>smoke_test</h3>"));
        assert!(html.contains("<h3>full_matrix</h3>"));
        assert!(html.contains("id=\"truth-table-data\""));
        assert!(html.contains("id=\"filter-runtime\""));
    }

    #[test]
    fn test_distribution_bar_uses_table_share() {
        let html = rendered();
        assert!(html.contains("title=\"62.5% valid\""));
        assert!(html.contains("style=\"width: 37.5%\""));
    }
}
