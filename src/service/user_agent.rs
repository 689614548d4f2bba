#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::{Html, Json}, ApiResponse };
use log::info;

use crate::utils::errors::{Errors, HttpResult};
use crate::utils::sample_utils::{self, RequestDebug};

// The one header these endpoints require.
pub const USER_AGENT: &str = "User-Agent";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetUserAgentApi;

/// Inputs read from the http request by the user agent endpoints.
pub struct ReqUserAgent
{
    pub user_agent: String,
    pub remote_ip: String,
    pub client_info: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqUserAgent {
    type Req = ReqUserAgent;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request inputs:");
        s.push_str("\n    user_agent: ");
        s.push_str(&self.user_agent);
        s.push_str("\n    remote_ip: ");
        s.push_str(&self.remote_ip);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
pub enum UserAgentResponse {
    #[oai(status = 200)]
    Http200(Html<String>),
    #[oai(status = 400)]
    Http400(Json<HttpResult>),
}

pub fn make_http_200(text: String) -> UserAgentResponse {
    UserAgentResponse::Http200(Html(text))
}
pub fn make_http_400(msg: String) -> UserAgentResponse {
    UserAgentResponse::Http400(Json(HttpResult::new(400.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetUserAgentApi {
    #[oai(path = "/getUserAgent", method = "get")]
    async fn get_user_agent(&self, http_req: &Request) -> UserAgentResponse {
        process(http_req, "")
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl ReqUserAgent {
    /// Collect the endpoint inputs, failing if the user agent header is absent.
    pub fn from_request(http_req: &Request) -> Result<Self, Errors> {
        Ok(Self {
            user_agent: sample_utils::required_header(http_req, USER_AGENT)?,
            remote_ip: sample_utils::remote_ip(http_req),
            client_info: sample_utils::client_info(http_req),
        })
    }

    /// Render the inputs as an html fragment.
    pub fn to_html(&self) -> String {
        format!("User Agent : {}<br> Browser : {}<br> User IP : {}<br><br> Client Info : {}",
                self.user_agent, self.user_agent, self.remote_ip, self.client_info)
    }
}

// ---------------------------------------------------------------------------
// process:
// ---------------------------------------------------------------------------
/** Build the user agent response with the prefix prepended.  A missing or
 * unreadable user agent header produces a 400 response.
 */
pub fn process(http_req: &Request, prefix: &str) -> UserAgentResponse {
    match ReqUserAgent::from_request(http_req) {
        Ok(req) => {
            sample_utils::debug_request(http_req, &req);
            make_http_200(prefix.to_owned() + req.to_html().as_str())
        },
        Err(e) => {
            let msg = "ERROR: ".to_owned() + e.to_string().as_str();
            info!("{} {}", http_req.uri().path(), msg);
            make_http_400(msg)
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::{http::StatusCode, test::TestClient, Route};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    use super::{process, GetUserAgentApi, ReqUserAgent, UserAgentResponse};
    use crate::utils::sample_utils::request_from_peer;

    fn test_req() -> ReqUserAgent {
        ReqUserAgent {
            user_agent: "TestAgent/1.0".to_string(),
            remote_ip: "127.0.0.1".to_string(),
            client_info: "Method : GET".to_string(),
        }
    }

    #[test]
    fn html_contains_inputs_in_order() {
        let html = test_req().to_html();
        assert_eq!(html.matches("TestAgent/1.0").count(), 2);
        assert_eq!(html.matches("127.0.0.1").count(), 1);

        let first = html.find("TestAgent/1.0").unwrap();
        let last = html.rfind("TestAgent/1.0").unwrap();
        let ip = html.find("127.0.0.1").unwrap();
        assert!(first < last && last < ip);
        assert!(html.ends_with("Client Info : Method : GET"));
    }

    #[test]
    fn from_request_reads_header_and_peer() {
        let http_req = poem::http::Request::builder()
            .uri("/getUserAgent")
            .header("User-Agent", "TestAgent/1.0")
            .body(())
            .unwrap();
        let req = ReqUserAgent::from_request(&request_from_peer(http_req, "127.0.0.1:54321")).unwrap();
        assert_eq!(req.user_agent, "TestAgent/1.0");
        assert_eq!(req.remote_ip, "127.0.0.1");

        let html = req.to_html();
        assert_eq!(html.matches("TestAgent/1.0").count(), 2);
        assert_eq!(html.matches("127.0.0.1").count(), 1);
        let last = html.rfind("TestAgent/1.0").unwrap();
        assert!(last < html.find("127.0.0.1").unwrap());
        assert!(!html.contains("54321"));
    }

    #[test]
    fn process_non_ascii_user_agent() {
        let http_req = poem::http::Request::builder()
            .header("User-Agent", poem::http::HeaderValue::from_bytes("Mozilla/5.0 Zoë".as_bytes()).unwrap())
            .body(())
            .unwrap();
        match process(&request_from_peer(http_req, "10.1.2.3:4000"), "") {
            UserAgentResponse::Http200(html) => {
                assert!(html.0.starts_with("User Agent : Mozilla/5.0 Zoë<br> Browser : Mozilla/5.0 Zoë<br> User IP : 10.1.2.3<br>"));
            },
            UserAgentResponse::Http400(e) => panic!("unexpected client error: {}", e.0.result_msg),
        }
    }

    #[test]
    fn html_is_stable() {
        assert_eq!(test_req().to_html(), test_req().to_html());
    }

    #[tokio::test]
    async fn get_user_agent() {
        let api = OpenApiService::new(GetUserAgentApi, "test", "1.0");
        let cli = TestClient::new(Route::new().nest("/", api));

        let resp = cli.get("/getUserAgent").header("User-Agent", "TestAgent/1.0").send().await;
        resp.assert_status_is_ok();
        resp.assert_content_type("text/html; charset=utf-8");
        let body = resp.0.into_body().into_string().await.unwrap();
        assert!(body.starts_with("User Agent : TestAgent/1.0<br> Browser : TestAgent/1.0<br> User IP : "));
        assert_eq!(body.matches("TestAgent/1.0").count(), 2);
        assert!(body.contains("Client Info : Method : GET"));
    }

    #[tokio::test]
    async fn get_user_agent_missing_header() {
        let api = OpenApiService::new(GetUserAgentApi, "test", "1.0");
        let cli = TestClient::new(Route::new().nest("/", api));

        let resp = cli.get("/getUserAgent").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({
            "result_code": "400",
            "result_msg": "ERROR: Missing required header: User-Agent",
        })).await;
    }
}
