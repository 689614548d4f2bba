#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::PlainText };

use crate::utils::sample_utils::{self, RequestDebug};

// The fixed greeting.
pub const WELCOME_MESSAGE: &str = "Welcome to 2024";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetMessageApi;

struct ReqGetMessage;

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetMessage {
    type Req = ReqGetMessage;
    fn get_request_info(&self) -> String {
        "  Request body: none".to_string()
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetMessageApi {
    #[oai(path = "/getMessage", method = "get")]
    async fn get_message(&self, http_req: &Request) -> PlainText<String> {
        sample_utils::debug_request(http_req, &ReqGetMessage);
        PlainText(WELCOME_MESSAGE.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::{test::TestClient, Route};
    use poem_openapi::OpenApiService;

    use super::GetMessageApi;

    #[tokio::test]
    async fn get_message() {
        let api = OpenApiService::new(GetMessageApi, "test", "1.0");
        let cli = TestClient::new(Route::new().nest("/", api));

        // Nothing accumulates between calls.
        for _ in 0..3 {
            let resp = cli.get("/getMessage").send().await;
            resp.assert_status_is_ok();
            resp.assert_content_type("text/plain; charset=utf-8");
            resp.assert_text("Welcome to 2024").await;
        }
    }
}
