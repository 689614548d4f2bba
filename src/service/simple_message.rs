#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object };

use crate::utils::sample_utils::{self, RequestDebug};

const SIMPLE_MESSAGE: &str = "Simple Message Bean";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetSimpleMessageApi;

struct ReqGetSimpleMessage;

/// Single field message body shared by the simple message endpoints.
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct SimpleMessage
{
    text: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetSimpleMessage {
    type Req = ReqGetSimpleMessage;
    fn get_request_info(&self) -> String {
        "  Request body: none".to_string()
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetSimpleMessageApi {
    #[oai(path = "/getSimpleMessage", method = "get")]
    async fn get_simple_message(&self, http_req: &Request) -> Json<SimpleMessage> {
        sample_utils::debug_request(http_req, &ReqGetSimpleMessage);
        Json(SimpleMessage::new(SIMPLE_MESSAGE))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl SimpleMessage {
    pub fn new(text: &str) -> Self {
        Self {text: text.to_string()}
    }
}
