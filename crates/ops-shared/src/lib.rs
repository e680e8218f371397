//! Code shared between the Enterprise Ops clients

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod id;
mod macros;
pub mod navigation;
pub mod quotation;
pub mod req_args;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
