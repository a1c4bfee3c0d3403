pub mod access_guard;
pub mod cookies;
pub mod response;

pub use access_guard::access_guard_middleware;
pub use cookies::{clear_token_cookie, cookie_value};
pub use response::{ApiResponse, ApiResult};
