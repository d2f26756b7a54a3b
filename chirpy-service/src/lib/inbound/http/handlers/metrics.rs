use axum::extract::State;
use axum::response::Html;

use crate::inbound::http::router::AppState;

/// Admin page reporting file server hits.
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.file_server_hits.get()
    ))
}
