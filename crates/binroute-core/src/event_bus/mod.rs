//! # Event Bus Module
//!
//! Change notifications for one editing session.
//!
//! ## Overview
//!
//! Every session controller owns its own `EventBus`. Commands publish an
//! [`EditEvent`] after the state change is complete; subscribers run
//! synchronously on the publishing call, so a map binding or host page sees
//! each notification before the command returns.
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by [`EventCategory`]
//! - Async hosts can poll a broadcast receiver instead
//!
//! ## Usage
//!
//! ```rust,ignore
//! use binroute_core::event_bus::{EditEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Route]),
//!     |event| {
//!         if let EditEvent::RouteChanged { distance_km, .. } = event {
//!             println!("route is now {distance_km} km");
//!         }
//!     },
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
