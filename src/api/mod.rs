// API module - Docmost HTTP client
// Request construction, response mapping, and cursor pagination

pub mod client; // HTTP gateway with auth, retry, and error mapping
pub mod pagination; // Lazy page-by-page iteration over list endpoints
pub mod request; // Request descriptions passed to the client
