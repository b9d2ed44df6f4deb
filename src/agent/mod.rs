pub mod conversation;

pub use conversation::{run_conversation, ConversationOutcome};
