mod auth;
mod state;

pub use auth::TokenManager;
pub use state::STATE_TYPE_DELIVERED;
pub use state::StateError;
pub use state::StateManager;
