//! Services: business logic invoked by the chat widget.

pub mod gateway;
pub mod sessions;
