pub mod context;
pub mod dispatch;
pub mod reply;

pub use context::ErrorContext;
pub use dispatch::ErrorDispatcher;
