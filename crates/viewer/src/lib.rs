pub mod config;
pub mod error;
pub mod orchestrate;
pub mod session;
pub mod url_state;

// Viewer core: orchestration logic only, no browser types. The wasm app
// crate supplies the collaborator implementations.
pub use config::*;
pub use error::*;
pub use orchestrate::*;
pub use session::*;
pub use url_state::*;
