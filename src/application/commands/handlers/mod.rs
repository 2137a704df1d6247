//! Command Handlers 实现

mod answer_handlers;
mod speak_handlers;

pub use answer_handlers::*;
pub use speak_handlers::*;
