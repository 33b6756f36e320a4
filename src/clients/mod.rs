pub mod http;
pub mod quiz_client;
pub mod test_client;
pub mod user_client;

pub use http::build_http_client;
pub use quiz_client::QuizClient;
pub use test_client::TestClient;
pub use user_client::UserClient;
