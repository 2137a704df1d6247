//! HTTP Handlers

mod answer;
mod ping;
mod speak;

pub use answer::*;
pub use ping::*;
pub use speak::*;
