use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};

use crate::app::AppState;
use crate::utils::join_features;

const FEATURES_PLACEHOLDER: &str = "__ENABLED_FEATURES__";

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Kafka Console</title>
    <script>
      window.ENABLED_FEATURES = "__ENABLED_FEATURES__";
    </script>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

/// Renders the index page once, with the enabled features baked in.
pub fn render_index(features: &[String]) -> Arc<str> {
    let features = join_features(features).replace('"', "");
    INDEX_TEMPLATE.replace(FEATURES_PLACEHOLDER, &features).into()
}

/// Serves the bootstrap page for `/` and any path no other surface claims.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(state.index_html.to_string()),
    )
}
