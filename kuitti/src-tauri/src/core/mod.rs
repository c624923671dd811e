//! Application core: state, paths, error codes and the command response
//! envelope.

pub mod error_codes;
pub mod paths;
pub mod response;
pub mod state;

pub use error_codes::ErrorCode;
pub use paths::AppPaths;
pub use response::ApiResponse;
pub use state::AppState;
