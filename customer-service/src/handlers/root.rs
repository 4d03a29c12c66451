/// Static greeting
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "General"
)]
pub async fn hello() -> &'static str {
    "Hello World!"
}
