mod fetch_request;
mod fetch_response;

pub use fetch_request::FetchRequest;
pub use fetch_response::FetchResponse;
