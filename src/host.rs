use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::foundation::core::LogicalSize;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::renderer::{FrameStatus, FrameTick, Renderer};
use crate::theme::ThemeSource;

/// The element a renderer is mounted into.
pub trait Container {
    /// Current bounding box in logical pixels.
    fn measure(&self) -> BackdropResult<LogicalSize>;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Whether a 2D drawing context can be acquired at all.
    fn supports_2d(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug)]
struct ContainerState {
    size: LogicalSize,
    device_pixel_ratio: f64,
    attached: bool,
    supports_2d: bool,
}

/// In-memory container whose size the host can change while a renderer
/// holds a clone of it.
#[derive(Clone, Debug)]
pub struct HeadlessContainer {
    inner: Rc<RefCell<ContainerState>>,
}

impl HeadlessContainer {
    pub fn new(size: LogicalSize, device_pixel_ratio: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContainerState {
                size,
                device_pixel_ratio,
                attached: true,
                supports_2d: true,
            })),
        }
    }

    pub fn set_size(&self, size: LogicalSize) {
        self.inner.borrow_mut().size = size;
    }

    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        self.inner.borrow_mut().device_pixel_ratio = dpr;
    }

    /// Simulate the element being removed from the page: measuring fails
    /// until it is attached again.
    pub fn set_attached(&self, attached: bool) {
        self.inner.borrow_mut().attached = attached;
    }

    pub fn set_supports_2d(&self, supported: bool) {
        self.inner.borrow_mut().supports_2d = supported;
    }
}

impl Container for HeadlessContainer {
    fn measure(&self) -> BackdropResult<LogicalSize> {
        let s = self.inner.borrow();
        if !s.attached {
            return Err(BackdropError::measure("container is detached"));
        }
        Ok(s.size)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.inner.borrow().device_pixel_ratio
    }

    fn supports_2d(&self) -> bool {
        self.inner.borrow().supports_2d
    }
}

/// Counters returned by [`HeadlessHost::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: u64,
    pub halted: bool,
}

/// Stand-in for a display: a fixed refresh interval and a monotonic clock.
#[derive(Clone, Copy, Debug)]
pub struct HeadlessHost {
    now: Duration,
    refresh: Duration,
}

impl HeadlessHost {
    pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

    pub fn new(refresh_hz: f64) -> Self {
        let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
            refresh_hz
        } else {
            Self::DEFAULT_REFRESH_HZ
        };
        Self {
            now: Duration::ZERO,
            refresh: Duration::from_secs_f64(1.0 / hz),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Wait one refresh interval and deliver the renderer's pending frame.
    /// `None` when nothing was requested.
    pub fn present<C: Container, T: ThemeSource>(
        &mut self,
        renderer: &mut Renderer<C, T>,
    ) -> Option<FrameStatus> {
        let ticket = renderer.pending_frame()?;
        self.now += self.refresh;
        Some(renderer.on_frame(FrameTick {
            ticket,
            now: self.now,
        }))
    }

    /// Present up to `frames` refreshes, stopping early if the loop ends.
    pub fn run<C: Container, T: ThemeSource>(
        &mut self,
        renderer: &mut Renderer<C, T>,
        frames: u64,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..frames {
            match self.present(renderer) {
                Some(FrameStatus::Rendered { .. }) => summary.rendered += 1,
                Some(FrameStatus::Halted) => {
                    summary.halted = true;
                    break;
                }
                Some(FrameStatus::Ignored) | None => break,
            }
        }
        summary
    }

    /// Notify `renderer` of a resize at the current host time.
    pub fn resize<C: Container, T: ThemeSource>(&self, renderer: &mut Renderer<C, T>) {
        renderer.on_resize(self.now);
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REFRESH_HZ)
    }
}
