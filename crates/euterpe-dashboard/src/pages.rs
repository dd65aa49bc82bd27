//! HTML shells for the dashboard views. Charts are drawn in the browser from
//! the `/api/*` endpoints.

use axum::response::Html;

const NAV: &str = r#"<nav>
  <a href="/">POS distribution</a>
  <a href="/top-verbs">Top verbs</a>
  <a href="/top-pronouns">Top pronouns</a>
  <a href="/temporal">Temporal evolution</a>
  <a href="/song-stats">Song statistics</a>
</nav>"#;

const STYLE: &str = r#"<style>
  body { font-family: sans-serif; margin: 0; background: #fafafa; }
  nav { background: #2c3e50; padding: 12px 20px; }
  nav a { color: #ecf0f1; margin-right: 18px; text-decoration: none; }
  nav a:hover { text-decoration: underline; }
  main { padding: 20px; }
  .controls { margin-bottom: 16px; }
  #chart { width: 100%; height: 560px; }
  .error { color: #c0392b; }
</style>"#;

const HELPERS: &str = r#"
async function getJson(url) {
  const res = await fetch(url);
  const body = await res.json();
  if (!res.ok) throw new Error(body.error || res.statusText);
  return body;
}
function showError(err) {
  document.getElementById('chart').innerHTML = '<p class="error">' + err.message + '</p>';
}
async function fillDecades(select, withAll) {
  const decades = await getJson('/api/decades');
  select.innerHTML = (withAll ? '<option value="">All</option>' : '') +
    decades.map(d => '<option value="' + d + '">' + d + 's</option>').join('');
}
"#;

fn page(title: &str, controls: &str, script: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
{STYLE}
</head>
<body>
{NAV}
<main>
<h1>{title}</h1>
<div class="controls">{controls}</div>
<div id="chart"></div>
</main>
<script>
{HELPERS}
{script}
</script>
</body>
</html>"#
    ))
}

pub async fn pos_distribution() -> Html<String> {
    page(
        "POS distribution by decade",
        r#"<label>Decade <select id="decade"></select></label>"#,
        r#"
const decade = document.getElementById('decade');
async function draw() {
  try {
    const rows = await getJson('/api/pos-distribution?decade=' + decade.value);
    Plotly.newPlot('chart', [{
      type: 'bar',
      x: rows.map(r => r.pos),
      y: rows.map(r => r.pct * 100),
      text: rows.map(r => r.count),
    }], { yaxis: { title: '% of tokens' } });
  } catch (e) { showError(e); }
}
decade.addEventListener('change', draw);
fillDecades(decade, true).then(draw).catch(showError);
"#,
    )
}

pub async fn top_verbs() -> Html<String> {
    page(
        "Top verbs",
        r#"<label>Decade <select id="decade"></select></label>"#,
        r#"
const decade = document.getElementById('decade');
async function draw() {
  try {
    const rows = await getJson('/api/top-verbs?decade=' + decade.value);
    Plotly.newPlot('chart', [{
      type: 'bar',
      orientation: 'h',
      x: rows.map(r => r.count).reverse(),
      y: rows.map(r => r.token).reverse(),
    }], { xaxis: { title: 'occurrences' } });
  } catch (e) { showError(e); }
}
decade.addEventListener('change', draw);
fillDecades(decade, true).then(draw).catch(showError);
"#,
    )
}

pub async fn top_pronouns() -> Html<String> {
    page(
        "Top pronouns",
        r#"<label>Decade <select id="decade"></select></label>
<label>Person <select id="person">
  <option value="all">All</option>
  <option value="first">First</option>
  <option value="second">Second</option>
  <option value="third">Third</option>
</select></label>"#,
        r#"
const decade = document.getElementById('decade');
const person = document.getElementById('person');
async function draw() {
  try {
    const rows = await getJson('/api/top-pronouns?decade=' + decade.value + '&person=' + person.value);
    Plotly.newPlot('chart', [{
      type: 'bar',
      x: rows.map(r => r.token),
      y: rows.map(r => r.count),
    }], { yaxis: { title: 'occurrences' } });
  } catch (e) { showError(e); }
}
decade.addEventListener('change', draw);
person.addEventListener('change', draw);
fillDecades(decade, true).then(draw).catch(showError);
"#,
    )
}

pub async fn temporal() -> Html<String> {
    page(
        "Temporal evolution of POS",
        r#"<label>Tags <select id="tags" multiple size="6"></select></label>"#,
        r#"
const tags = document.getElementById('tags');
async function draw() {
  try {
    const selected = Array.from(tags.selectedOptions).map(o => o.value);
    const rows = await getJson('/api/temporal?tags=' + selected.join(','));
    const byTag = {};
    rows.forEach(r => { (byTag[r.pos] = byTag[r.pos] || []).push(r); });
    Plotly.newPlot('chart', Object.entries(byTag).map(([pos, points]) => ({
      type: 'scatter',
      mode: 'lines+markers',
      name: pos,
      x: points.map(p => p.decade),
      y: points.map(p => p.pct * 100),
    })), { xaxis: { title: 'decade' }, yaxis: { title: '% of selected tags' } });
  } catch (e) { showError(e); }
}
tags.addEventListener('change', draw);
getJson('/api/tags').then(all => {
  tags.innerHTML = all.map(t => '<option value="' + t + '">' + t + '</option>').join('');
  draw();
}).catch(showError);
"#,
    )
}

pub async fn song_stats() -> Html<String> {
    page(
        "Song statistics by decade",
        r#"<label>Metric <select id="metric">
  <option value="tokens_count">Tokens per song</option>
  <option value="unique_words">Unique words</option>
  <option value="unique_pos">Unique POS tags</option>
  <option value="ttr">Type/token ratio</option>
</select></label>"#,
        r#"
const metric = document.getElementById('metric');
async function draw() {
  try {
    const rows = await getJson('/api/song-stats?metric=' + metric.value);
    Plotly.newPlot('chart', [{
      type: 'bar',
      x: rows.map(r => r.decade + 's'),
      y: rows.map(r => r.value),
    }], { yaxis: { title: metric.options[metric.selectedIndex].text } });
  } catch (e) { showError(e); }
}
metric.addEventListener('change', draw);
draw();
"#,
    )
}
