pub mod draft;
pub mod send_message;

pub use draft::*;
pub use send_message::*;
