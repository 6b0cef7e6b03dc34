pub use crate::app::App;
pub use cfgportal_types::error::{ClResult, Error};
pub use cfgportal_types::types::{Env, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
