// Single-page dashboard with inline styling; polls /api/signal every minute.
pub const DASHBOARD_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>BTC Watch Dashboard</title>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 0; background: #0d1117; color: #e6edf3; }
    header { padding: 1rem 1.5rem; background: #161b22; border-bottom: 1px solid #21262d; }
    main { padding: 1.5rem; max-width: 900px; margin: 0 auto; }
    .card { background: #161b22; border: 1px solid #30363d; border-radius: 12px; padding: 1.25rem; box-shadow: 0 8px 24px rgba(0,0,0,0.25); }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-top: 1rem; }
    .metric { padding: 0.75rem; border-radius: 10px; background: #0d1117; border: 1px solid #30363d; }
    .metric h3 { margin: 0 0 0.35rem; font-size: 0.95rem; color: #8b949e; }
    .metric p { margin: 0; font-size: 1.15rem; font-weight: 600; }
    .sentiment { display: inline-block; padding: 0.35rem 0.65rem; border-radius: 8px; font-weight: 700; letter-spacing: 0.02em; }
    .sentiment.bull { background: rgba(46, 160, 67, 0.2); color: #3fb950; }
    .sentiment.bear { background: rgba(248, 81, 73, 0.2); color: #f85149; }
    .sentiment.neutral { background: rgba(201, 148, 0, 0.2); color: #e3b341; }
    .muted { color: #8b949e; }
    .error { color: #f85149; margin-top: 0.75rem; }
    footer { margin-top: 1.5rem; font-size: 0.9rem; color: #8b949e; }
    button { background: #238636; color: white; border: none; padding: 0.55rem 1rem; border-radius: 8px; cursor: pointer; font-weight: 600; }
    button:hover { background: #2ea043; }
  </style>
</head>
<body>
  <header>
    <h1>BTC Watch Dashboard</h1>
    <p class="muted">Reference signals from public data and simple indicators. Not investment advice.</p>
  </header>
  <main>
    <div class="card">
      <div id="status" class="muted">Loading data…</div>
      <div style="display:flex; align-items:center; gap:0.75rem; margin-top: 0.75rem; flex-wrap: wrap;">
        <span id="sentiment" class="sentiment neutral">—</span>
        <div id="headline"></div>
        <button id="refresh">Refresh</button>
      </div>
      <div class="grid">
        <div class="metric"><h3>Price</h3><p id="price">—</p></div>
        <div class="metric"><h3>Short MA</h3><p id="short_ma">—</p></div>
        <div class="metric"><h3>Long MA</h3><p id="long_ma">—</p></div>
        <div class="metric"><h3>Volatility</h3><p id="volatility">—</p></div>
        <div class="metric"><h3>Last change</h3><p id="change_pct">—</p></div>
        <div class="metric"><h3>Updated</h3><p id="timestamp">—</p></div>
      </div>
      <p id="caution" class="muted" style="margin-top:1rem;"></p>
      <div id="error" class="error" aria-live="polite"></div>
    </div>
    <footer>⚠️ Based on public data and simple indicators, for reference only and not investment advice.</footer>
  </main>
  <script>
    async function loadSignal() {
      const status = document.getElementById('status');
      const errorBox = document.getElementById('error');
      status.textContent = 'Updating…';
      errorBox.textContent = '';
      try {
        const res = await fetch('/api/signal');
        const data = await res.json();
        if (!res.ok) {
          throw new Error(data.error || 'Request failed');
        }
        updateView(data);
        status.textContent = 'Last refresh succeeded';
      } catch (err) {
        status.textContent = 'Refresh failed';
        errorBox.textContent = err.message;
      }
    }

    function updateView(data) {
      const sentimentEl = document.getElementById('sentiment');
      sentimentEl.textContent = data.sentiment;
      sentimentEl.className = 'sentiment ' + (data.sentiment === 'Bullish' ? 'bull' : data.sentiment === 'Bearish' ? 'bear' : 'neutral');
      document.getElementById('headline').textContent = data.headline;
      document.getElementById('price').textContent = '$' + data.price.toFixed(2);
      document.getElementById('short_ma').textContent = '$' + data.short_ma.toFixed(2);
      document.getElementById('long_ma').textContent = '$' + data.long_ma.toFixed(2);
      document.getElementById('volatility').textContent = data.volatility.toFixed(2);
      document.getElementById('change_pct').textContent = data.change_pct.toFixed(2) + '%';
      document.getElementById('timestamp').textContent = data.timestamp;
      document.getElementById('caution').textContent = data.caution;
    }

    document.getElementById('refresh').addEventListener('click', loadSignal);
    loadSignal();
    setInterval(loadSignal, 60000);
  </script>
</body>
</html>
"#;
