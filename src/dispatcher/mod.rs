//! # Dispatcher Module
//!
//! Coroutine-based handler dispatch.
//!
//! Each handler registered with [`Dispatcher::register_handler`] runs in its
//! own `may` coroutine and receives [`HandlerRequest`]s over a channel. The
//! handler answers on the per-request `reply_tx` channel; the dispatcher waits
//! for that reply and runs the middleware `after` hooks on it.
//!
//! ```rust,ignore
//! use pet_registry::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
//!
//! let mut dispatcher = Dispatcher::new();
//! unsafe {
//!     dispatcher.register_handler("ping", |req: HandlerRequest| {
//!         let _ = req.reply_tx.send(HandlerResponse::new(200, serde_json::json!("pong")));
//!     });
//! }
//! ```
//!
//! ## Error Handling
//!
//! - A handler name with no registration makes `dispatch` return `None`
//!   (the server answers 500)
//! - Handler panics are caught inside the coroutine and answered with a 500
//!   whose body carries no panic details

mod core;

pub use core::{
    Dispatcher, HandlerRequest, HandlerResponse, HandlerSender, HeaderVec,
    DEFAULT_HANDLER_STACK_SIZE, MAX_INLINE_HEADERS,
};
