pub mod error;
pub mod mock;
pub mod service;
pub mod types;

pub use error::QueryError;
pub use mock::{EXHAUSTED_NOTICE, MockQueryService, MockResponse};
pub use service::{HttpQueryService, QueryService, QueryServiceFactory};
pub use types::{NO_RESPONSE, QueryRequest, QueryResponse, QueryResult};
