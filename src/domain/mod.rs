// Domain layer: money values, report shapes and ports. No I/O here.

pub mod money;
pub mod ports;
pub mod report;
pub mod selector;
