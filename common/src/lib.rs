pub mod logger;

pub use logger::{TraceId, cycle_span, init_logger, warn_if_slow};
