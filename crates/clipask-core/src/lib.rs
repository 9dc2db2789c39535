//! clipask-core: conversation state, prompt directives, and request composition.

pub mod composer;
pub mod config;
pub mod conversation;
pub mod directive;
mod error;
pub mod intent;
pub mod message;
pub mod prompts;

pub use clipask_desktop::ContextSource;
pub use composer::RequestComposer;
pub use config::{Config, ConfigStore};
pub use conversation::{ConversationStore, MAX_CONV_LEN};
pub use directive::{parse_directives, Directives};
pub use error::ClipaskError;
pub use intent::UserIntent;
pub use message::{Message, Role};
