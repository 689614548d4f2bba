#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path };

use crate::service::simple_message::SimpleMessage;
use crate::utils::sample_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetSimpleUserMessageApi;

struct ReqGetSimpleUserMessage
{
    name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetSimpleUserMessage {
    type Req = ReqGetSimpleUserMessage;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    name: ");
        s.push_str(&self.name);
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetSimpleUserMessageApi {
    #[oai(path = "/getSimpleUserMessage/:name", method = "get")]
    async fn get_simple_user_message(&self, http_req: &Request, name: Path<String>) -> Json<SimpleMessage> {
        let req = ReqGetSimpleUserMessage {name: name.0};
        sample_utils::debug_request(http_req, &req);
        Json(greeting(&req.name))
    }
}

// ***************************************************************************
//                          Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// greeting:
// ---------------------------------------------------------------------------
/** The name is used exactly as received; no validation or escaping. */
pub fn greeting(name: &str) -> SimpleMessage {
    SimpleMessage::new(&("Hello ".to_owned() + name))
}
