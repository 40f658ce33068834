//! Reusable chain-reaction assemblies: triggers, branches, logic gates, a
//! grade-separated crossing, and a fast relay run.
//!
//! Every mechanism is a plain constructor returning a [`Component`] with its
//! blocks as children and its attachment points as ports, so assemblies nest
//! and connect like any other component.
//!
//! [`Component`]: crate::composition::component::Component

pub mod branches;
pub mod crossing;
pub mod fast;
pub mod gates;
pub mod triggers;
