use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::json;

/// Upload request body as sent by the browser client
pub fn create_upload_request(filename: &str, content_type: &str, email: &str) -> serde_json::Value {
    json!({
        "filename": filename,
        "contentType": content_type,
        "email": email
    })
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Asserts the permissive CORS headers every upload response carries
pub fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

/// PUTs bytes to a presigned URL the way the browser client does
pub async fn upload_to_s3(
    presigned_url: &str,
    data: &[u8],
    content_type: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    reqwest::Client::new()
        .put(presigned_url)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(data.to_vec())
        .send()
        .await
}
