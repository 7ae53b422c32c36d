//! The resize module: handle lifecycle, drag state machine and reflow.

use crate::config::ResizeConfig;
use crate::cursor::CursorManager;
use crate::debounce::{Debouncer, Instant};
use crate::events::{EventBus, SubscriptionId, Topic};
use crate::handles::{Corner, HandleSet};
use crate::host::ResizeHost;
use crate::input::{PointerEvent, PointerPhase, RawInput};
use crate::session::{DragSession, DragState, SessionListeners};

/// Where a raw input signal was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// One of the resize handles.
    Handle(Corner),
    /// Anywhere else in the document.
    Document,
}

/// A signal forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Input { target: InputTarget, input: RawInput },
    ViewportResized,
}

/// Resize handles around one target element.
///
/// The host drives the lifecycle: [`on_create`](Self::on_create) when the
/// element enters editing, [`handle_event`](Self::handle_event) for every
/// surface signal, [`tick`](Self::tick) when the reflow deadline passes, and
/// [`on_destroy`](Self::on_destroy) when editing ends.
///
/// A press on a handle while a drag is already running aborts that drag and
/// starts a new one.
#[derive(Debug)]
pub struct ResizeModule {
    config: ResizeConfig,
    handles: HandleSet,
    events: EventBus,
    reflow: Debouncer,
    cursor: CursorManager,
    session: Option<DragSession>,
    /// Press and viewport listeners installed at creation.
    listeners: Vec<SubscriptionId>,
    active: bool,
}

impl ResizeModule {
    pub fn new(config: ResizeConfig) -> Self {
        let reflow = Debouncer::new(config.debounce());
        Self {
            config,
            handles: HandleSet::default(),
            events: EventBus::new(),
            reflow,
            cursor: CursorManager::new(),
            session: None,
            listeners: Vec::new(),
            active: false,
        }
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn cursor(&self) -> &CursorManager {
        &self.cursor
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            Some(session) => DragState::Dragging(session.corner),
            None => DragState::Idle,
        }
    }

    /// When the host should next call [`tick`](Self::tick), if a reflow is
    /// pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reflow.deadline()
    }

    /// Create the handles, attach them to the overlay and position them.
    pub fn on_create<H: ResizeHost + ?Sized>(&mut self, host: &mut H) {
        if self.active {
            log::warn!("Resize module created twice; ignoring");
            return;
        }

        self.handles = HandleSet::create(&self.config.handle_styles);
        for handle in self.handles.iter() {
            host.append_handle(handle);
            self.listeners
                .push(self.events.subscribe(Topic::HandlePress(handle.corner)));
        }
        self.listeners
            .push(self.events.subscribe(Topic::ViewportResize));
        self.active = true;

        log::info!("Resize handles created");
        self.position_handles(host);
    }

    /// Tear down. Safe to call at any time, including mid-drag and twice.
    pub fn on_destroy<H: ResizeHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            self.remove_session_listeners(session.listeners);
        }
        self.cursor.clear(host);

        for id in self.listeners.drain(..) {
            self.events.unsubscribe(id);
        }
        self.reflow.cancel();
        self.handles.clear();

        if self.active {
            log::info!("Resize handles destroyed");
        }
        self.active = false;
    }

    /// Recompute every handle's position from the target's current box.
    pub fn position_handles<H: ResizeHost + ?Sized>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }

        let bounds = host.target().map(|t| t.bounds());
        self.handles.position(&self.config.handle_styles, bounds);
        for handle in self.handles.iter() {
            host.place_handle(handle);
        }
        log::debug!("Positioned resize handles around {:?}", bounds);
    }

    /// Run the pending reflow if its quiet period has elapsed.
    pub fn tick<H: ResizeHost + ?Sized>(&mut self, host: &mut H, now: Instant) {
        if self.active && self.reflow.poll(now) {
            self.position_handles(host);
        }
    }

    /// Process a surface signal.
    pub fn handle_event<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: SurfaceEvent,
        now: Instant,
    ) {
        match event {
            SurfaceEvent::ViewportResized => {
                if self.events.is_subscribed(Topic::ViewportResize) {
                    self.reflow.trigger(now);
                }
            }
            SurfaceEvent::Input { target, input } => {
                let Some(pointer) = PointerEvent::from_raw(&input) else {
                    return;
                };
                self.handle_pointer(host, target, pointer, now);
            }
        }
    }

    fn handle_pointer<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: InputTarget,
        pointer: PointerEvent,
        now: Instant,
    ) {
        match (pointer.phase, target) {
            (PointerPhase::Start, InputTarget::Handle(corner)) => {
                if self.events.is_subscribed(Topic::HandlePress(corner)) {
                    self.begin_drag(host, corner, pointer.position.x);
                }
            }
            (PointerPhase::Start, InputTarget::Document) => {}
            (PointerPhase::Move, _) => {
                if self.events.is_subscribed(Topic::PointerMove) {
                    self.drag_to(host, pointer.position.x, now);
                }
            }
            (PointerPhase::End, _) => {
                if self.events.is_subscribed(Topic::PointerRelease) {
                    self.end_drag(host);
                }
            }
        }
    }

    fn begin_drag<H: ResizeHost + ?Sized>(&mut self, host: &mut H, corner: Corner, x: f64) {
        if let Some(previous) = self.session.as_ref() {
            log::debug!(
                "Press on {:?} while dragging {:?}; restarting drag",
                corner,
                previous.corner
            );
            self.end_drag(host);
        }

        let Some(start_width) = host.target().map(|t| t.effective_width()) else {
            log::debug!("Press on {:?} with no target; ignoring", corner);
            return;
        };

        self.cursor.apply(host, corner.cursor());
        let listeners = SessionListeners {
            on_move: self.events.subscribe(Topic::PointerMove),
            on_release: self.events.subscribe(Topic::PointerRelease),
        };
        self.session = Some(DragSession::new(corner, x, start_width, listeners));
        log::debug!("Drag started on {:?} at x={} width={}", corner, x, start_width);
    }

    fn drag_to<H: ResizeHost + ?Sized>(&mut self, host: &mut H, x: f64, now: Instant) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let width = session.width_at(x);

        // The target may have been cleared mid-drag.
        let Some(target) = host.target() else {
            return;
        };
        target.set_width(width);
        log::trace!("Resized target to {}px", width);

        self.reflow.trigger(now);
    }

    fn end_drag<H: ResizeHost + ?Sized>(&mut self, host: &mut H) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.cursor.clear(host);
        self.remove_session_listeners(session.listeners);
        log::debug!("Drag ended on {:?}", session.corner);
    }

    fn remove_session_listeners(&mut self, listeners: SessionListeners) {
        self.events.unsubscribe(listeners.on_move);
        self.events.unsubscribe(listeners.on_release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandleStyle;
    use crate::input::{MouseKind, TouchKind};
    use crate::testing::MockHost;
    use kurbo::Rect;
    use std::time::Duration;

    fn config() -> ResizeConfig {
        ResizeConfig::default().with_handle_styles(HandleStyle::sized(10.0, 10.0))
    }

    fn created(host: &mut MockHost) -> ResizeModule {
        let mut module = ResizeModule::new(config());
        module.on_create(host);
        module
    }

    fn mouse(target: InputTarget, kind: MouseKind, x: f64) -> SurfaceEvent {
        SurfaceEvent::Input { target, input: RawInput::mouse(kind, x, 0.0) }
    }

    fn press(corner: Corner, x: f64) -> SurfaceEvent {
        mouse(InputTarget::Handle(corner), MouseKind::Down, x)
    }

    fn move_to(x: f64) -> SurfaceEvent {
        mouse(InputTarget::Document, MouseKind::Move, x)
    }

    fn release(x: f64) -> SurfaceEvent {
        mouse(InputTarget::Document, MouseKind::Up, x)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_create_appends_and_positions_four_handles() {
        let mut host = MockHost::with_target(200, 100);
        let module = created(&mut host);

        assert!(module.is_active());
        assert_eq!(module.handles().len(), 4);
        assert_eq!(host.appended, Corner::ALL.to_vec());
        assert_eq!(host.place_calls, 4);
        assert!(module.events().is_subscribed(Topic::ViewportResize));
        for corner in Corner::ALL {
            assert!(module.events().is_subscribed(Topic::HandlePress(corner)));
        }

        let tl = host.placed(Corner::TopLeft).unwrap();
        assert_eq!(tl.rect, Some(Rect::new(-5.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_create_twice_is_ignored() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        module.on_create(&mut host);

        assert_eq!(module.handles().len(), 4);
        assert_eq!(host.appended.len(), 4);
        assert_eq!(module.events().count(Topic::ViewportResize), 1);
    }

    #[test]
    fn test_right_edge_drag_scenario() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::TopRight, 50.0), t0);
        assert_eq!(module.state(), DragState::Dragging(Corner::TopRight));
        assert_eq!(host.body_cursor, "nesw-resize");
        assert_eq!(host.target_ref().cursor, "nesw-resize");

        module.handle_event(&mut host, move_to(80.0), t0);
        assert_eq!(host.target_ref().width, Some(230));

        module.handle_event(&mut host, release(80.0), t0);
        assert_eq!(module.state(), DragState::Idle);
        assert_eq!(host.target_ref().width, Some(230));
        assert_eq!(host.body_cursor, "");
        assert_eq!(host.target_ref().cursor, "");
        assert!(!module.events().is_subscribed(Topic::PointerMove));
        assert!(!module.events().is_subscribed(Topic::PointerRelease));
    }

    #[test]
    fn test_left_edge_drag_scenario() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::BottomLeft, 50.0), t0);
        module.handle_event(&mut host, move_to(30.0), t0);
        assert_eq!(host.target_ref().width, Some(220));
    }

    #[test]
    fn test_width_is_relative_to_press_not_previous_move() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::BottomRight, 10.0), t0);
        module.handle_event(&mut host, move_to(20.0), t0);
        module.handle_event(&mut host, move_to(40.5), t0);
        assert_eq!(host.target_ref().width, Some(231));
    }

    #[test]
    fn test_start_width_falls_back_to_natural_width() {
        let mut host = MockHost::with_target(0, 0);
        host.target.as_mut().unwrap().width = None;
        host.target.as_mut().unwrap().natural_width = 640;
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::TopRight, 0.0), t0);
        assert_eq!(module.session().unwrap().start_width, 640);
        module.handle_event(&mut host, move_to(-40.0), t0);
        assert_eq!(host.target_ref().width, Some(600));
    }

    #[test]
    fn test_touch_drag() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        let touch = |target, kind, x| SurfaceEvent::Input {
            target,
            input: RawInput::touch(kind, x, 0.0),
        };
        module.handle_event(&mut host, touch(InputTarget::Handle(Corner::TopLeft), TouchKind::Start, 100.0), t0);
        module.handle_event(&mut host, touch(InputTarget::Document, TouchKind::Move, 90.0), t0);
        assert_eq!(host.target_ref().width, Some(210));

        module.handle_event(&mut host, touch(InputTarget::Document, TouchKind::End, 90.0), t0);
        assert!(!module.is_dragging());
        assert_eq!(host.body_cursor, "");
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, move_to(500.0), t0);
        module.handle_event(&mut host, release(500.0), t0);
        assert_eq!(host.target_ref().width, Some(200));
        assert_eq!(host.target_ref().width_writes, 0);
    }

    #[test]
    fn test_move_with_cleared_target_is_noop() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::TopRight, 0.0), t0);
        let target = host.target.take();
        module.handle_event(&mut host, move_to(50.0), t0);
        host.target = target;

        assert_eq!(host.target_ref().width, Some(200));
        assert!(module.is_dragging());
    }

    #[test]
    fn test_press_without_target_is_ignored() {
        let mut host = MockHost::default();
        let mut module = created(&mut host);

        module.handle_event(&mut host, press(Corner::TopRight, 0.0), Instant::now());
        assert!(!module.is_dragging());
        assert_eq!(host.body_cursor, "");
    }

    #[test]
    fn test_document_press_does_not_start_drag() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);

        module.handle_event(&mut host, mouse(InputTarget::Document, MouseKind::Down, 0.0), Instant::now());
        assert!(!module.is_dragging());
    }

    #[test]
    fn test_press_while_dragging_restarts() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::TopRight, 0.0), t0);
        module.handle_event(&mut host, move_to(20.0), t0);
        module.handle_event(&mut host, press(Corner::TopLeft, 100.0), t0);

        let session = module.session().unwrap();
        assert_eq!(session.corner, Corner::TopLeft);
        assert_eq!(session.start_width, 220);
        assert_eq!(module.events().count(Topic::PointerMove), 1);
        assert_eq!(module.events().count(Topic::PointerRelease), 1);
        assert_eq!(host.body_cursor, "nwse-resize");

        module.handle_event(&mut host, release(100.0), t0);
        assert_eq!(module.events().count(Topic::PointerMove), 0);
        assert_eq!(module.events().count(Topic::PointerRelease), 0);
    }

    #[test]
    fn test_cursor_restored_after_each_session() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        for corner in Corner::ALL {
            let before = (host.body_cursor.clone(), host.target_ref().cursor.clone());
            module.handle_event(&mut host, press(corner, 0.0), t0);
            assert_eq!(host.body_cursor, corner.cursor().as_css());
            module.handle_event(&mut host, release(0.0), t0);
            let after = (host.body_cursor.clone(), host.target_ref().cursor.clone());
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_drag_schedules_debounced_reposition() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();
        host.place_calls = 0;

        module.handle_event(&mut host, press(Corner::BottomRight, 0.0), t0);
        module.handle_event(&mut host, move_to(50.0), t0);
        module.handle_event(&mut host, move_to(100.0), t0 + ms(4));
        assert_eq!(module.next_deadline(), Some(t0 + ms(14)));

        module.tick(&mut host, t0 + ms(13));
        assert_eq!(host.place_calls, 0);
        module.tick(&mut host, t0 + ms(14));
        assert_eq!(host.place_calls, 4);

        // Handles follow the new box (300px wide, 150px tall).
        let br = host.placed(Corner::BottomRight).unwrap();
        assert_eq!(br.rect, Some(Rect::new(295.0, 145.0, 305.0, 155.0)));
    }

    #[test]
    fn test_viewport_burst_collapses_to_one_reposition() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();
        host.place_calls = 0;

        for i in 0..5 {
            module.handle_event(&mut host, SurfaceEvent::ViewportResized, t0 + ms(i * 2));
            module.tick(&mut host, t0 + ms(i * 2));
        }
        assert_eq!(host.place_calls, 0);

        module.tick(&mut host, t0 + ms(18));
        module.tick(&mut host, t0 + ms(40));
        assert_eq!(host.place_calls, 4);
    }

    #[test]
    fn test_early_tick_keeps_reflow_pending() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();
        host.place_calls = 0;

        module.handle_event(&mut host, SurfaceEvent::ViewportResized, t0);
        let deadline = module.next_deadline().unwrap();

        module.tick(&mut host, deadline - Duration::from_micros(30));
        assert_eq!(host.place_calls, 0);
        assert_eq!(module.next_deadline(), Some(deadline));

        module.tick(&mut host, deadline);
        assert_eq!(host.place_calls, 4);
        assert_eq!(module.next_deadline(), None);
    }

    #[test]
    fn test_destroy_clears_everything() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, SurfaceEvent::ViewportResized, t0);
        module.on_destroy(&mut host);

        assert!(!module.is_active());
        assert!(module.handles().is_empty());
        assert!(module.events().is_empty());
        assert_eq!(module.next_deadline(), None);
        assert_eq!(host.body_cursor, "");

        host.place_calls = 0;
        module.handle_event(&mut host, SurfaceEvent::ViewportResized, t0);
        module.tick(&mut host, t0 + ms(100));
        assert_eq!(host.place_calls, 0);
    }

    #[test]
    fn test_destroy_while_dragging() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        let t0 = Instant::now();

        module.handle_event(&mut host, press(Corner::TopRight, 50.0), t0);
        module.handle_event(&mut host, move_to(60.0), t0);
        module.on_destroy(&mut host);
        assert_eq!(host.body_cursor, "");
        assert_eq!(host.target_ref().cursor, "");

        let writes = host.target_ref().width_writes;
        module.handle_event(&mut host, move_to(120.0), t0);
        module.handle_event(&mut host, release(120.0), t0);
        module.handle_event(&mut host, press(Corner::TopRight, 0.0), t0);
        assert_eq!(host.target_ref().width_writes, writes);
        assert_eq!(host.target_ref().width, Some(210));
        assert!(!module.is_dragging());

        // Destroying again is harmless.
        module.on_destroy(&mut host);
    }

    #[test]
    fn test_recreate_after_destroy() {
        let mut host = MockHost::with_target(200, 100);
        let mut module = created(&mut host);
        module.on_destroy(&mut host);
        module.on_create(&mut host);

        assert_eq!(module.handles().len(), 4);
        assert_eq!(module.events().len(), 5);
    }
}
