//! HTML shell for the browser client.

use axum::http::Method;
use axum::response::Html;

use loggy_core::error::AppError;

/// Page that boots the client bundle.
pub const SHELL_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <title>Loggy</title>
    <meta name="viewport" content="width=device-width,initial-scale=1" />
    <link rel="manifest" href="/assets/manifest.json">
    <link rel="stylesheet" href="/static/index.css" />
  </head>
  <body>
    <div></div>
    <script src="/static/index.js"></script>
  </body>
</html>
"#;

/// Fallback for every path outside `/api`, `/static` and `/assets`.
///
/// Any `GET` gets the shell so that client-side routes survive a reload.
pub async fn index(method: Method) -> Result<Html<&'static str>, AppError> {
    if method == Method::GET || method == Method::HEAD {
        Ok(Html(SHELL_HTML))
    } else {
        Err(AppError::not_found(format!("No route for {method}")))
    }
}
