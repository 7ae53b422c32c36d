//! DOM host: binds a [`ResizeModule`] to an overlay element and an image.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kurbo::{Point, Rect};
use resizekit_core::{
    Corner, HandleStyle, HandleWidget, InputTarget, Instant, MouseKind, RawInput, ResizeConfig,
    ResizeHost, ResizeModule, SurfaceEvent, TargetElement, TouchInput, TouchKind,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlImageElement, MouseEvent, TouchEvent,
    TouchList, Window,
};

use crate::css;
use crate::error::BindError;
use crate::schedule::{self, ListenerChange};

/// Write declarations to an element's inline style, logging failures.
fn apply_style<K: AsRef<str>>(element: &HtmlElement, declarations: &[(K, String)]) {
    let style = element.style();
    for (name, value) in declarations {
        if let Err(e) = style.set_property(name.as_ref(), value) {
            log::warn!("Failed to set {}: {:?}", name.as_ref(), e);
        }
    }
}

/// An `<img>` as a resize target.
pub struct DomImage {
    element: HtmlImageElement,
}

impl DomImage {
    pub fn new(element: HtmlImageElement) -> Self {
        Self { element }
    }
}

impl TargetElement for DomImage {
    fn width(&self) -> Option<u32> {
        Some(self.element.width())
    }

    fn natural_width(&self) -> u32 {
        self.element.natural_width()
    }

    fn bounds(&self) -> Rect {
        let r = self.element.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn set_width(&mut self, width: u32) {
        self.element.set_width(width);
    }

    fn set_cursor(&mut self, cursor: &str) {
        if let Err(e) = self.element.style().set_property("cursor", cursor) {
            log::warn!("Failed to set image cursor: {:?}", e);
        }
    }
}

/// The document, overlay and image the handles live in.
pub struct DomHost {
    document: Document,
    body: HtmlElement,
    overlay: HtmlElement,
    image: Option<DomImage>,
    style: HandleStyle,
    /// Handle elements in creation order.
    handles: Vec<HtmlElement>,
}

impl DomHost {
    pub fn new(
        document: Document,
        overlay: HtmlElement,
        image: Option<HtmlImageElement>,
        style: HandleStyle,
    ) -> Result<Self, BindError> {
        let body = document.body().ok_or(BindError::NoBody)?;
        Ok(Self {
            document,
            body,
            overlay,
            image: image.map(DomImage::new),
            style,
            handles: Vec::new(),
        })
    }

    pub fn set_image(&mut self, image: Option<HtmlImageElement>) {
        self.image = image.map(DomImage::new);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle elements with their corners.
    pub fn handle_elements(&self) -> Vec<(Corner, HtmlElement)> {
        self.handles
            .iter()
            .enumerate()
            .filter_map(|(i, el)| Corner::from_index(i).map(|c| (c, el.clone())))
            .collect()
    }

    /// Detach all handle elements from the overlay.
    pub fn remove_handles(&mut self) {
        for handle in self.handles.drain(..) {
            handle.remove();
        }
    }

    fn create_handle(&self, handle: &HandleWidget) -> Result<HtmlElement, BindError> {
        let element: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into()
            .map_err(|e| BindError::Js(format!("{:?}", e)))?;
        apply_style(&element, &css::handle_declarations(&self.style, handle));
        self.overlay.append_child(&element)?;
        Ok(element)
    }
}

impl ResizeHost for DomHost {
    fn target(&mut self) -> Option<&mut dyn TargetElement> {
        self.image.as_mut().map(|i| i as &mut dyn TargetElement)
    }

    fn append_handle(&mut self, handle: &HandleWidget) {
        match self.create_handle(handle) {
            Ok(element) => self.handles.push(element),
            Err(e) => log::error!("Failed to create {:?} handle: {}", handle.corner, e),
        }
    }

    fn place_handle(&mut self, handle: &HandleWidget) {
        if let Some(element) = self.handles.get(handle.index()) {
            apply_style(element, &css::inset_declarations(&handle.insets));
        }
    }

    fn set_document_cursor(&mut self, cursor: &str) {
        if let Err(e) = self.body.style().set_property("cursor", cursor) {
            log::warn!("Failed to set body cursor: {:?}", e);
        }
    }
}

struct State {
    module: ResizeModule,
    host: DomHost,
    /// Document move/release listeners, present only while dragging.
    drag_listeners: Option<Vec<Listener>>,
}

/// A registered DOM listener, removed on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, BindError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

fn touch_points(list: TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

/// Translate a browser event into the core's raw input shape.
fn raw_input(event: &Event) -> Option<RawInput> {
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        let kind = match event.type_().as_str() {
            "touchstart" => TouchKind::Start,
            "touchmove" => TouchKind::Move,
            "touchend" => TouchKind::End,
            "touchcancel" => TouchKind::Cancel,
            _ => return None,
        };
        return Some(RawInput::Touch(TouchInput {
            kind,
            touches: touch_points(touch.touches()),
            changed_touches: touch_points(touch.changed_touches()),
        }));
    }

    let mouse = event.dyn_ref::<MouseEvent>()?;
    let kind = match event.type_().as_str() {
        "mousedown" => MouseKind::Down,
        "mousemove" => MouseKind::Move,
        "mouseup" => MouseKind::Up,
        _ => return None,
    };
    Some(RawInput::mouse(
        kind,
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    ))
}

/// Run a tick once the pending reflow deadline has passed.
///
/// The callback holds a weak reference, so a timer that fires after the
/// resizer is gone does nothing. A timer that fires before the deadline
/// schedules another one.
fn schedule_tick(window: &Window, state: &Rc<RefCell<State>>, deadline: Instant) {
    let delay = deadline.saturating_duration_since(Instant::now());
    let weak: Weak<RefCell<State>> = Rc::downgrade(state);
    let timer_window = window.clone();
    let callback = Closure::once_into_js(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let pending = {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return;
            };
            let State { module, host, .. } = &mut *guard;
            module.tick(host, Instant::now());
            module.next_deadline()
        };
        if let Some(deadline) = pending {
            schedule_tick(&timer_window, &state, deadline);
        }
    });

    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        schedule::timeout_millis(delay),
    ) {
        log::warn!("Failed to schedule handle reflow: {:?}", e);
    }
}

fn listen_input(
    window: &Window,
    state: &Rc<RefCell<State>>,
    target: &EventTarget,
    kind: &'static str,
    input_target: InputTarget,
) -> Result<Listener, BindError> {
    let window = window.clone();
    let weak = Rc::downgrade(state);
    Listener::new(target, kind, move |event| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if let Some(input) = raw_input(&event) {
            dispatch(
                &window,
                &state,
                SurfaceEvent::Input {
                    target: input_target,
                    input,
                },
            );
        }
    })
}

/// Move and release listeners on the document for one drag.
fn document_listeners(
    window: &Window,
    state: &Rc<RefCell<State>>,
    document: &Document,
) -> Result<Vec<Listener>, BindError> {
    ["mousemove", "touchmove", "mouseup", "touchend", "touchcancel"]
        .into_iter()
        .map(|kind| listen_input(window, state, document.as_ref(), kind, InputTarget::Document))
        .collect()
}

fn dispatch(window: &Window, state: &Rc<RefCell<State>>, event: SurfaceEvent) {
    let (change, document, deadline) = {
        let Ok(mut guard) = state.try_borrow_mut() else {
            return;
        };
        let State {
            module,
            host,
            drag_listeners,
        } = &mut *guard;
        module.handle_event(host, event, Instant::now());
        let change = schedule::listener_change(module.is_dragging(), drag_listeners.is_some());
        (change, host.document().clone(), module.next_deadline())
    };

    match change {
        ListenerChange::Attach => match document_listeners(window, state, &document) {
            Ok(listeners) => {
                if let Ok(mut guard) = state.try_borrow_mut() {
                    guard.drag_listeners = Some(listeners);
                }
            }
            Err(e) => log::error!("Failed to listen for drag input: {}", e),
        },
        ListenerChange::Detach => {
            // Drop outside the borrow.
            let detached = state
                .try_borrow_mut()
                .ok()
                .and_then(|mut guard| guard.drag_listeners.take());
            drop(detached);
        }
        ListenerChange::Keep => {}
    }

    if let Some(deadline) = deadline {
        schedule_tick(window, state, deadline);
    }
}

/// Resize handles mounted on a live document.
///
/// Dropping the resizer removes every listener, clears the drag cursor and
/// detaches the handle elements.
pub struct ImageResizer {
    state: Rc<RefCell<State>>,
    listeners: Vec<Listener>,
}

impl ImageResizer {
    /// Mount handles for `image` inside `overlay`.
    pub fn attach(
        overlay: HtmlElement,
        image: HtmlImageElement,
        config: ResizeConfig,
    ) -> Result<Self, BindError> {
        let window = web_sys::window().ok_or(BindError::NoWindow)?;
        let document = window.document().ok_or(BindError::NoDocument)?;

        let host = DomHost::new(
            document,
            overlay,
            Some(image),
            config.handle_styles.clone(),
        )?;
        let state = Rc::new(RefCell::new(State {
            module: ResizeModule::new(config),
            host,
            drag_listeners: None,
        }));

        let handle_elements = {
            let mut guard = state.borrow_mut();
            let State { module, host, .. } = &mut *guard;
            module.on_create(host);
            host.handle_elements()
        };

        let mut listeners = Vec::new();
        for (corner, element) in handle_elements {
            for kind in ["mousedown", "touchstart"] {
                listeners.push(listen_input(
                    &window,
                    &state,
                    element.as_ref(),
                    kind,
                    InputTarget::Handle(corner),
                )?);
            }
        }

        let resize_window = window.clone();
        let resize_state = Rc::downgrade(&state);
        listeners.push(Listener::new(window.as_ref(), "resize", move |_| {
            if let Some(state) = resize_state.upgrade() {
                dispatch(&resize_window, &state, SurfaceEvent::ViewportResized);
            }
        })?);

        log::info!("Image resizer attached");
        Ok(Self { state, listeners })
    }

    /// Point the handles at another image, or at none.
    pub fn set_image(&self, image: Option<HtmlImageElement>) {
        let mut guard = self.state.borrow_mut();
        let State { module, host, .. } = &mut *guard;
        host.set_image(image);
        module.position_handles(host);
    }

    /// Re-position the handles immediately.
    pub fn reposition(&self) {
        let mut guard = self.state.borrow_mut();
        let State { module, host, .. } = &mut *guard;
        module.position_handles(host);
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().module.is_dragging()
    }
}

impl Drop for ImageResizer {
    fn drop(&mut self) {
        self.listeners.clear();
        let detached = match self.state.try_borrow_mut() {
            Ok(mut guard) => {
                let State {
                    module,
                    host,
                    drag_listeners,
                } = &mut *guard;
                module.on_destroy(host);
                host.remove_handles();
                drag_listeners.take()
            }
            Err(_) => {
                log::warn!("Image resizer busy during teardown; drag cursor may remain");
                None
            }
        };
        drop(detached);
        log::info!("Image resizer detached");
    }
}

/// JavaScript-facing wrapper around [`ImageResizer`].
#[wasm_bindgen]
pub struct ResizeHandles {
    inner: Option<ImageResizer>,
}

#[wasm_bindgen]
impl ResizeHandles {
    /// Mount handles. `options` is a plain object shaped like
    /// `{ handleStyles: { width, height, ... }, debounceMs }`, or undefined.
    #[wasm_bindgen(constructor)]
    pub fn new(
        overlay: HtmlElement,
        image: HtmlImageElement,
        options: JsValue,
    ) -> Result<ResizeHandles, JsValue> {
        let config = if options.is_undefined() || options.is_null() {
            ResizeConfig::default()
        } else {
            let json: String = js_sys::JSON::stringify(&options)?.into();
            ResizeConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let inner = ImageResizer::attach(overlay, image, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(ResizeHandles { inner: Some(inner) })
    }

    /// Change the image the handles resize.
    #[wasm_bindgen(js_name = setImage)]
    pub fn set_image(&self, image: Option<HtmlImageElement>) {
        if let Some(inner) = &self.inner {
            inner.set_image(image);
        }
    }

    /// Re-position the handles immediately.
    pub fn update(&self) {
        if let Some(inner) = &self.inner {
            inner.reposition();
        }
    }

    /// Tear down the handles. Further calls are no-ops.
    pub fn destroy(&mut self) {
        self.inner = None;
    }
}
