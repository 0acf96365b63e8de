//! Typed HTTP resource client.

pub mod error;
pub mod query;
pub mod resource;
pub mod upload;

pub use error::{ClientError, ErrorKind};
pub use query::{QueryParams, QueryValue};
pub use resource::{Entity, Paginated, RequestOptions, RequestPolicy, ResourceClient};
pub use upload::UploadFile;
