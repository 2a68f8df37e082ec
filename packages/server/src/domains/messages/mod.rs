pub mod actions;
pub mod models;

pub use actions::{send_message, MessageDraft, SendMessageError, SendStatus};
pub use models::{Message, NewMessage};
