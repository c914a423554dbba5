//! Notifications module
//!
//! In-process pub/sub for reservation workflow events. The hosting UI
//! subscribes to render banners and to perform the post-success redirect.
//!
//! # Usage
//! ```ignore
//! use stay_booking::notifications::create_event_bus;
//!
//! let bus = create_event_bus();
//! let mut events = bus.subscribe();
//! while let Some(msg) = events.recv().await {
//!     println!("{}", msg.event.event_type());
//! }
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
