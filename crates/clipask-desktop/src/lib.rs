//! clipask-desktop: clipboard/selection capture, reply delivery, and
//! discovery of the external utilities both depend on.

mod error;
pub mod sink;
pub mod source;
pub mod utility;

pub use error::{CaptureError, DeliveryError, SetupError};
pub use sink::{DesktopSink, ReplySink, SinkConfig};
pub use source::{ContextReader, ContextSource, XclipReader};
pub use utility::require_utility;
