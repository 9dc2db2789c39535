//! clipask-provider: chat-completion transport abstraction and implementations.

mod error;
pub mod providers;
pub mod traits;
pub mod types;

pub use error::TransportError;
pub use providers::openai::{new_openai_transport, OPENAI_BASE_URL};
pub use providers::openai_compat::{OpenAiCompatConfig, OpenAiCompatTransport};
pub use traits::Transport;
pub use types::{ProviderMessage, Request, Response, StopReason, Usage};
