//! External generation services: chat completion and text embedding.
//!
//! These are collaborator contracts. The engine only ever sees the traits;
//! the OpenAI-compatible HTTP implementations live alongside them. All
//! calls are blocking and sequential, per the resource model of the
//! rewrite loop (one in-flight request at a time, no rate limiting here).

pub mod chat;
pub mod embedder;
