//! Request extractors.

mod api_path;
mod validated_json;

pub use api_path::ApiPath;
pub use validated_json::ValidatedJson;
