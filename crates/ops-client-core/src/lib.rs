//! HTTP client, session store and authorization gate shared by the clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;

pub use client::{api::ApiError, Client, SessionStatus, UiCallBack, NO_BODY};
