use axum::response::Html;

/// Landing page with a short usage summary of the API
#[tracing::instrument]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Periodic Task Timestamps</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f7fafc;
            color: #2d3748;
            max-width: 760px;
            margin: 48px auto;
            padding: 0 20px;
        }
        h1 {
            font-size: 28px;
            margin-bottom: 8px;
        }
        .subtitle {
            color: #718096;
            margin-bottom: 32px;
        }
        .endpoint-list {
            list-style: none;
            padding: 0;
        }
        .endpoint-list li {
            background: white;
            padding: 12px 16px;
            margin-bottom: 8px;
            border-radius: 8px;
            border-left: 4px solid #667eea;
        }
        code {
            color: #667eea;
            font-family: 'Courier New', monospace;
        }
        .desc {
            color: #718096;
            font-size: 13px;
            margin-top: 4px;
        }
        table {
            border-collapse: collapse;
            margin-top: 16px;
        }
        td {
            padding: 4px 12px 4px 0;
        }
    </style>
</head>
<body>
    <h1>Periodic Task Timestamps</h1>
    <p class="subtitle">Lists the UTC timestamps at which a periodic task runs between two points in time.</p>

    <h2>Endpoints</h2>
    <ul class="endpoint-list">
        <li>
            <code>GET /ptlist?period=1h&amp;tz=Europe/Athens&amp;t1=20210714T204603Z&amp;t2=20210715T123456Z</code>
            <div class="desc">Invocation timestamps of the task, formatted as YYYYMMDDTHHMMSSZ</div>
        </li>
        <li>
            <code>GET /health</code>
            <div class="desc">Health check endpoint</div>
        </li>
        <li>
            <code>GET /metrics</code>
            <div class="desc">Prometheus metrics</div>
        </li>
    </ul>

    <h2>Periods</h2>
    <table>
        <tr><td><code>1h</code></td><td>every hour, on the hour</td></tr>
        <tr><td><code>1d</code></td><td>every day, at local midnight</td></tr>
        <tr><td><code>1mo</code></td><td>every month, on the first day</td></tr>
        <tr><td><code>1y</code></td><td>every year, on January 1st</td></tr>
    </table>
</body>
</html>"#;
