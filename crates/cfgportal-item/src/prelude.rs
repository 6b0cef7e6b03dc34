pub use cfgportal_core::prelude::*;

// vim: ts=4
