use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use crate::config::{BackdropOptions, resize_debounce};
use crate::foundation::core::{LogicalSize, Rgba8};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::rng::Rng64;
use crate::host::Container;
use crate::render::frame::{FrameContext, render_pass};
use crate::render::{BackingSize, Frame, Surface};
use crate::scene::profile::{FALLBACK_COLOR, Palette};
use crate::scene::{Clock, ElementCounts, Pass, Scene};
use crate::theme::ThemeSource;

/// Handle for one requested frame. Only the most recently issued ticket is
/// honoured; older ones are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

impl FrameTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Display refresh delivered to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    pub ticket: FrameTicket,
    /// Host clock at delivery, used for resize debouncing.
    pub now: Duration,
}

/// Outcome of [`Renderer::on_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was presented; deliver `next` on the next refresh.
    Rendered { next: FrameTicket },
    /// The frame failed. The loop is stopped and the previous frame stays
    /// visible.
    Halted,
    /// Stale ticket or inactive renderer: nothing drawn, nothing requested.
    Ignored,
}

/// Lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    Unmounted,
    Mounting,
    Running,
    /// A resize is pending and will be applied by the first frame at or after
    /// `deadline`.
    Resizing { deadline: Duration },
    /// A frame failed; no further frames are requested.
    Halted,
    /// No drawing context; a flat fallback color is shown instead.
    Degraded,
}

/// Animated backdrop bound to one container.
///
/// The host drives it cooperatively: deliver each issued [`FrameTicket`]
/// through [`Renderer::on_frame`], forward resize notifications to
/// [`Renderer::on_resize`] and call [`Renderer::unmount`] when done. None of
/// these calls ever fail; problems are logged and the renderer degrades.
pub struct Renderer<C, T> {
    container: C,
    theme: T,
    options: BackdropOptions,
    state: RendererState,
    surface: Option<Surface>,
    scene: Option<Scene>,
    clock: Clock,
    rng: Rng64,
    pending: Option<FrameTicket>,
    next_ticket: u64,
    frames_rendered: u64,
    debounce: Duration,
    #[cfg(test)]
    fail_at: Option<Pass>,
    #[cfg(test)]
    panic_at: Option<Pass>,
}

impl<C, T> std::fmt::Debug for Renderer<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("surface", &self.surface)
            .field("pending", &self.pending)
            .field("frames_rendered", &self.frames_rendered)
            .finish_non_exhaustive()
    }
}

impl<C: Container, T: ThemeSource> Renderer<C, T> {
    /// Attach to `container` and request the first frame.
    pub fn mount(container: C, theme: T, options: BackdropOptions) -> Self {
        Self::mount_with_rng(container, theme, options, Rng64::from_entropy())
    }

    #[cfg(test)]
    pub(crate) fn mount_seeded(
        container: C,
        theme: T,
        options: BackdropOptions,
        seed: u64,
    ) -> Self {
        Self::mount_with_rng(container, theme, options, Rng64::new(seed))
    }

    #[tracing::instrument(level = "debug", skip(container, theme, rng))]
    fn mount_with_rng(container: C, theme: T, options: BackdropOptions, rng: Rng64) -> Self {
        let options = options.sanitized();
        let mut r = Self {
            container,
            theme,
            options,
            state: RendererState::Mounting,
            surface: None,
            scene: None,
            clock: Clock::new(options.quality),
            rng,
            pending: None,
            next_ticket: 0,
            frames_rendered: 0,
            debounce: resize_debounce(),
            #[cfg(test)]
            fail_at: None,
            #[cfg(test)]
            panic_at: None,
        };

        match r.acquire() {
            Ok((surface, scene)) => {
                r.install(surface, scene);
                r.state = RendererState::Running;
                let ticket = r.issue_ticket();
                tracing::debug!(ticket = ticket.0, "backdrop mounted");
            }
            Err(e) => {
                tracing::warn!(error = %e, "backdrop unavailable, showing fallback color");
                r.degrade();
            }
        }
        r
    }

    /// Measure the container and build a fresh surface and scene for it.
    fn acquire(&mut self) -> BackdropResult<(Surface, Scene)> {
        if !self.container.supports_2d() {
            return Err(BackdropError::context_unavailable(
                "container has no 2d drawing support",
            ));
        }
        let (logical, dpr) = self.measure()?;
        let surface = Surface::allocate(logical, dpr, self.options.quality)?;
        let scene = Scene::build(
            self.options.variant,
            self.options.quality,
            logical,
            &mut self.rng,
        );
        Ok((surface, scene))
    }

    fn measure(&self) -> BackdropResult<(LogicalSize, f64)> {
        let logical = self.container.measure()?;
        Ok((logical, self.container.device_pixel_ratio()))
    }

    /// Swap in a new surface/scene pair, showing the base color until the
    /// first frame lands, and restart the clock.
    fn install(&mut self, mut surface: Surface, scene: Scene) {
        let palette = Palette::of(scene.variant(), self.theme.theme());
        surface.fill_front(palette.base_color());
        self.surface = Some(surface);
        self.scene = Some(scene);
        self.clock.reset();
    }

    fn degrade(&mut self) {
        self.state = RendererState::Degraded;
        self.pending = None;
        self.scene = None;
        self.surface = self.measure().ok().and_then(|(logical, dpr)| {
            let mut s = Surface::allocate(logical, dpr, self.options.quality).ok()?;
            s.fill_front(FALLBACK_COLOR);
            Some(s)
        });
    }

    fn issue_ticket(&mut self) -> FrameTicket {
        self.next_ticket += 1;
        let ticket = FrameTicket(self.next_ticket);
        self.pending = Some(ticket);
        ticket
    }

    /// Frame-presentation callback.
    pub fn on_frame(&mut self, tick: FrameTick) -> FrameStatus {
        if self.pending != Some(tick.ticket) {
            tracing::trace!(ticket = tick.ticket.0, "ignoring stale frame ticket");
            return FrameStatus::Ignored;
        }
        self.pending = None;

        match self.state {
            RendererState::Running => {}
            RendererState::Resizing { deadline } => {
                if tick.now >= deadline {
                    self.apply_resize();
                }
            }
            _ => return FrameStatus::Ignored,
        }

        match self.render_frame() {
            Ok(()) => FrameStatus::Rendered {
                next: self.issue_ticket(),
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    frames_rendered = self.frames_rendered,
                    "frame failed, stopping animation"
                );
                self.state = RendererState::Halted;
                FrameStatus::Halted
            }
        }
    }

    /// Resize notification. Restarts the debounce window; the reallocation
    /// happens on the first frame after it elapses.
    pub fn on_resize(&mut self, now: Duration) {
        if matches!(
            self.state,
            RendererState::Running | RendererState::Resizing { .. }
        ) {
            self.state = RendererState::Resizing {
                deadline: now + self.debounce,
            };
        }
    }

    /// Re-measure the container and rebuild the surface and element layout
    /// for it. A failed measurement or allocation keeps the current surface.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn apply_resize(&mut self) {
        if let RendererState::Resizing { .. } = self.state {
            self.state = RendererState::Running;
        }
        if self.state != RendererState::Running {
            return;
        }
        match self.acquire() {
            Ok((surface, scene)) => {
                tracing::debug!(backing = ?surface.backing(), "surface reallocated");
                self.install(surface, scene);
            }
            Err(e) => {
                tracing::warn!(error = %e, "resize aborted, keeping previous surface");
            }
        }
    }

    fn render_frame(&mut self) -> BackdropResult<()> {
        let theme = self.theme.theme();
        let time = self.clock.time();
        let (Some(surface), Some(scene)) = (self.surface.as_mut(), self.scene.as_mut()) else {
            return Err(BackdropError::draw("no surface to draw on"));
        };
        let palette = Palette::of(scene.variant(), theme);
        #[cfg(test)]
        let faults = (self.fail_at.take(), self.panic_at.take());

        let outcome = catch_unwind(AssertUnwindSafe(|| -> BackdropResult<()> {
            surface.begin_frame();
            let mut ctx = FrameContext {
                surface: &mut *surface,
                scene: &mut *scene,
                palette,
                time,
            };
            for pass in Pass::ORDER {
                if !ctx.scene.runs(pass) {
                    continue;
                }
                #[cfg(test)]
                {
                    if faults.0 == Some(pass) {
                        return Err(BackdropError::draw(format!(
                            "injected failure in {pass:?}"
                        )));
                    }
                    if faults.1 == Some(pass) {
                        panic!("injected panic in {pass:?}");
                    }
                }
                render_pass(pass, &mut ctx)?;
            }
            Ok(())
        }));

        match outcome {
            Ok(Ok(())) => {
                surface.present();
                self.clock.advance();
                self.frames_rendered += 1;
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(BackdropError::draw(format!(
                "panic while drawing: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    /// Stop the loop and release the surface. Any ticket delivered afterwards
    /// is ignored.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn unmount(&mut self) {
        self.pending = None;
        self.surface = None;
        self.scene = None;
        self.state = RendererState::Unmounted;
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn options(&self) -> BackdropOptions {
        self.options
    }

    /// Ticket the host should deliver on its next display refresh, if any.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.pending
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn clock_time(&self) -> f64 {
        self.clock.time()
    }

    pub fn logical_size(&self) -> Option<LogicalSize> {
        self.surface.as_ref().map(Surface::logical)
    }

    pub fn backing_size(&self) -> Option<BackingSize> {
        self.surface.as_ref().map(Surface::backing)
    }

    pub fn element_counts(&self) -> Option<ElementCounts> {
        self.scene.as_ref().map(Scene::counts)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Currently visible pixels.
    pub fn frame(&self) -> Option<Frame> {
        self.surface.as_ref().map(Surface::snapshot)
    }

    /// First backdrop color for the current theme, or the fallback color
    /// when degraded.
    pub fn background_color(&self) -> Rgba8 {
        match &self.scene {
            Some(scene) => Palette::of(scene.variant(), self.theme.theme()).base_color(),
            None => FALLBACK_COLOR,
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    #[cfg(test)]
    pub(crate) fn fail_next_frame_at(&mut self, pass: Pass) {
        self.fail_at = Some(pass);
    }

    #[cfg(test)]
    pub(crate) fn panic_next_frame_at(&mut self, pass: Pass) {
        self.panic_at = Some(pass);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "../tests/unit/renderer.rs"]
mod tests;
