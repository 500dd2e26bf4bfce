//! Web platform adapter for Touchline.
//!
//! Binds a [`TouchNormalizer`] to an `HtmlCanvasElement` and its owner
//! document. Handlers are `wasm_bindgen` closures kept alive by their
//! [`WebBinding`], so the exact same function reference is passed to
//! `removeEventListener` on teardown.

use std::rc::Rc;
use touchline_core::{
    ChangedTouches, InputGate, ListenerError, ListenerTarget, PointerLifecycle, RawTouchEvent,
    StartOutcome, TouchConfig, TouchHandler, TouchHost, TouchNormalizer,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlCanvasElement, Touch, TouchEvent};

/// Normalizer bound to a browser canvas.
pub type WebTouchNormalizer<P> = TouchNormalizer<WebTouchHost, P>;

type ListenerClosure = Closure<dyn FnMut(TouchEvent) -> Result<(), JsValue>>;

/// Native `TouchEvent` as seen by the normalizer.
#[derive(Clone, Debug)]
pub struct WebTouchEvent(TouchEvent);

impl WebTouchEvent {
    pub fn raw(&self) -> &TouchEvent {
        &self.0
    }
}

impl From<TouchEvent> for WebTouchEvent {
    fn from(event: TouchEvent) -> Self {
        Self(event)
    }
}

impl RawTouchEvent for WebTouchEvent {
    type Contact = Touch;

    fn changed_touches(&self) -> ChangedTouches<Touch> {
        let touches = self.0.changed_touches();
        (0..touches.length())
            .filter_map(|index| touches.get(index))
            .collect()
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Registered listener. Dropping it without [`TouchHost::unbind`] leaves a
/// dangling JS function behind, so the normalizer always hands it back.
pub struct WebBinding {
    target: EventTarget,
    event_name: &'static str,
    closure: ListenerClosure,
}

/// Canvas plus document root of a browser page.
pub struct WebTouchHost {
    canvas: HtmlCanvasElement,
    document: Document,
    touch_supported: bool,
}

impl WebTouchHost {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, ListenerError> {
        let document = canvas
            .owner_document()
            .ok_or_else(|| unavailable("canvas has no owner document"))?;
        Ok(Self {
            canvas,
            document,
            touch_supported: detect_touch_support(),
        })
    }

    /// Looks the canvas up by element id in the global document.
    pub fn from_canvas_id(canvas_id: &str) -> Result<Self, ListenerError> {
        let window = web_sys::window().ok_or_else(|| unavailable("no global window exists"))?;
        let document = window
            .document()
            .ok_or_else(|| unavailable("should have a document on window"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| unavailable(format!("canvas with id '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable(format!("element '{canvas_id}' is not a canvas")))?;
        Self::new(canvas)
    }

    /// Overrides the detected capability flag.
    pub fn with_touch_supported(mut self, supported: bool) -> Self {
        self.touch_supported = supported;
        self
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn event_target(&self, target: ListenerTarget) -> EventTarget {
        match target {
            ListenerTarget::Surface => self.canvas.clone().into(),
            ListenerTarget::Document => self.document.clone().into(),
        }
    }
}

impl TouchHost for WebTouchHost {
    type Event = WebTouchEvent;
    type Binding = WebBinding;

    fn touch_supported(&self) -> bool {
        self.touch_supported
    }

    fn bind(
        &self,
        target: ListenerTarget,
        event_name: &'static str,
        mut handler: TouchHandler<WebTouchEvent>,
    ) -> Result<WebBinding, ListenerError> {
        let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            // Collaborator failures surface as exceptions in the dispatching page.
            handler(&WebTouchEvent::from(event)).map_err(|err| {
                log::error!("touch dispatch failed: {err}");
                JsValue::from_str(&err.to_string())
            })
        }) as Box<dyn FnMut(TouchEvent) -> Result<(), JsValue>>);

        let event_target = self.event_target(target);
        event_target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(|err| ListenerError::BindFailed {
                target,
                event_name,
                reason: describe(&err),
            })?;

        Ok(WebBinding {
            target: event_target,
            event_name,
            closure,
        })
    }

    fn unbind(&self, binding: WebBinding) {
        let WebBinding {
            target,
            event_name,
            closure,
        } = binding;
        if let Err(err) =
            target.remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to unbind {event_name}: {}", describe(&err));
        }
    }
}

/// Reads `navigator.maxTouchPoints`.
pub fn detect_touch_support() -> bool {
    web_sys::window()
        .map(|window| window.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

/// Builds a normalizer for the canvas with id `canvas_id` and starts it.
///
/// Returns the normalizer even when the page has no touch capability; it then
/// simply holds no listeners.
pub fn attach<P>(
    canvas_id: &str,
    pointers: P,
    gate: InputGate,
    config: TouchConfig,
) -> Result<Rc<WebTouchNormalizer<P>>, ListenerError>
where
    P: PointerLifecycle<Touch> + 'static,
{
    let host = WebTouchHost::from_canvas_id(canvas_id)?;
    let normalizer = TouchNormalizer::with_config(host, pointers, gate, config);
    if normalizer.start()? == StartOutcome::Unsupported {
        log::info!("canvas '{canvas_id}' attached without touch support");
    }
    Ok(normalizer)
}

fn unavailable(reason: impl Into<String>) -> ListenerError {
    ListenerError::SurfaceUnavailable {
        reason: reason.into(),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
