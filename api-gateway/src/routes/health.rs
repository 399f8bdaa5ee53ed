use axum::{Json, http::StatusCode};

/// `GET /`
///
/// Liveness probe. Always answers with the JSON string `"OK"`, independent
/// of the metrics store.
pub async fn health() -> (StatusCode, Json<&'static str>) {
    (StatusCode::OK, Json("OK"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn health_returns_ok_json_string() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"\"OK\"");
    }
}
