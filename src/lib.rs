//! Procedural animated backgrounds rendered on the CPU.
//!
//! A [`Renderer`] is mounted into a [`Container`], sizes a double-buffered
//! [`Surface`] to it and, for every frame the host delivers, composes a
//! layered scene: gradient backdrop, drifting orbs, sine wave bands,
//! particles and a fixed chain of post effects ending in film grain.
//!
//! ```no_run
//! use backdrop::{BackdropOptions, HeadlessContainer, HeadlessHost, LogicalSize, Renderer, Theme};
//!
//! let container = HeadlessContainer::new(LogicalSize::new(800.0, 600.0)?, 2.0);
//! let mut renderer = Renderer::mount(container, Theme::Dark, BackdropOptions::default());
//! let mut host = HeadlessHost::default();
//! host.run(&mut renderer, 60);
//! let frame = renderer.frame();
//! renderer.unmount();
//! # Ok::<(), backdrop::BackdropError>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub(crate) mod foundation;
pub mod host;
pub mod overlay;
pub mod render;
pub mod renderer;
pub mod scene;
pub mod theme;

pub use config::{BackdropOptions, DEFAULT_RESIZE_DEBOUNCE, Quality, Variant, resize_debounce};
pub use foundation::core::{Affine, BezPath, LogicalSize, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{BackdropError, BackdropResult};
pub use foundation::rng::Rng64;
pub use host::{Container, HeadlessContainer, HeadlessHost, RunSummary};
pub use overlay::ScrollOverlay;
pub use render::composite::unpremultiply;
pub use render::{BackingSize, Frame, Surface, backing_size};
pub use renderer::{FrameStatus, FrameTick, FrameTicket, Renderer, RendererState};
pub use scene::{Clock, ElementCounts, Pass, Scene};
pub use theme::{Theme, ThemeSource, ThemeSwitch};
