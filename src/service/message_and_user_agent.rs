#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::OpenApi;

use crate::service::user_agent::{self, UserAgentResponse};

const WELCOME_PREFIX: &str = "Welcome to 2022 <br><br> ";

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
pub struct GetMessageAndUserAgentApi;

#[OpenApi]
impl GetMessageAndUserAgentApi {
    #[oai(path = "/getMessageAndUserAgent", method = "get")]
    async fn get_message_and_user_agent(&self, http_req: &Request) -> UserAgentResponse {
        user_agent::process(http_req, WELCOME_PREFIX)
    }
}
