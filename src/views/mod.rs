pub mod chat;
pub mod messages;
pub mod theme_toggle;

pub use chat::ChatView;
pub use messages::{MessageRow, current_time, format_message_timestamp};
pub use theme_toggle::ThemeToggle;
