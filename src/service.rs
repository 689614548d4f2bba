pub mod message;
pub mod message_and_user_agent;
pub mod simple_message;
pub mod simple_user_message;
pub mod user_agent;
pub mod version;
