// handlers/mod.rs - endpoints served behind the access guard
//
// /health        liveness, plus front-end reachability when an upstream is set
// /api/session   who the current credential belongs to
// everything else  the page layer (forwarded to the front end, or a placeholder)

pub mod health;
pub mod page;
pub mod session;

pub use health::health;
pub use page::page;
pub use session::session;
