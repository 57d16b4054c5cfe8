// =============================================================================
// Lumen Web - Page Components
// =============================================================================

pub mod auth_callback;
pub mod home;
pub mod login;
pub mod not_found;
pub mod signup;
