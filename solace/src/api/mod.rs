mod extractors;
mod middleware;
mod routes;
mod state;
pub mod v1;

pub use middleware::REQUEST_ID_HEADER;
pub use routes::{create_router, COMPANION_SUPPORT_PATH};
pub use state::AppState;
