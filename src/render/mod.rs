//! CPU rasterization of a [`crate::scene::Scene`] into a double-buffered
//! [`Surface`].

pub mod composite;
pub(crate) mod frame;
pub mod gradient;
pub mod surface;

pub use surface::{BackingSize, Frame, Surface, backing_size};
