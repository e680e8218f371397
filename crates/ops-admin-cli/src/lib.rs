#![warn(unused_crate_dependencies)]

mod suppress_warnings {
    // Only used in binary and triggers unused warning
    use tokio as _;
}

#[cfg(test)] // Only used by the integration tests
mod warning_suppress {
    use httpmock as _;
}

pub mod cli;
pub mod commands;
pub mod configuration;
pub mod tracing;
