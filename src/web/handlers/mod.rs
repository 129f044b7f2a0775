pub mod assist_handlers;
pub mod resume_handlers;
pub mod suggestion_handlers;
pub mod system_handlers;

pub use assist_handlers::*;
pub use resume_handlers::*;
pub use suggestion_handlers::*;
pub use system_handlers::*;
