//! Building blocks shared by the HTTP modules

mod api_response;
mod error;
pub mod params;
mod validated_json;

pub use api_response::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
