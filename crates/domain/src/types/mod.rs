//! Common data types used throughout the application

pub mod booking;
pub mod conversation;
pub mod grounding;

pub use booking::*;
pub use conversation::*;
pub use grounding::*;
