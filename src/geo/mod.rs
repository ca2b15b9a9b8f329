//! Small geometric helpers layered over the [`geo`] crate.

pub mod bearing;

#[doc(inline)]
pub use bearing::{
    arrival_bearing, clockwise_from, departure_bearing, reverse, signed_delta, wrap_degrees,
};
