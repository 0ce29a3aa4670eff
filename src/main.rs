//! Process Trail entry point
//!
//! Mounts the collector on a page canvas in the browser; runs a headless
//! autoplay natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent,
        Window,
    };

    use process_trail::consts::*;
    use process_trail::cursor::{CursorOverlay, ElementHints};
    use process_trail::hud::HudView;
    use process_trail::renderer::{Canvas2dSurface, Surface, render_cursor};
    use process_trail::{ResizePolicy, Settings, StageCollector, Tuning};

    const COLLECTOR_CANVAS_ID: &str = "collector-canvas";
    const CURSOR_CANVAS_ID: &str = "cursor-canvas";
    const COMPLETE_EVENT: &str = "collector-complete";
    /// Body class that hides the native cursor while the overlay is live
    const CURSOR_BODY_CLASS: &str = "custom-cursor";

    type Listener = Closure<dyn FnMut(web_sys::Event)>;
    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    thread_local! {
        static MOUNT: RefCell<Option<Mount>> = const { RefCell::new(None) };
    }

    /// Everything one mounted page owns
    struct Host {
        window: Window,
        collector: StageCollector,
        surface: Canvas2dSurface,
        cursor: Option<(CursorOverlay, Canvas2dSurface)>,
        /// Carries the class that hides the native cursor
        body: Option<HtmlElement>,
        /// Set by the completion sink, drained after the frame
        completed: Rc<Cell<bool>>,
        last_hud: Option<HudView>,
        last_time: f64,
    }

    impl Host {
        /// One animation frame: exactly one collector tick
        fn frame(&mut self, time: f64, document: &Document) -> bool {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, 100.0)
            } else {
                FRAME_MS
            };
            self.last_time = time;

            self.collector.on_tick(&mut self.surface);

            if let Some((overlay, surface)) = &mut self.cursor {
                overlay.update(dt);
                render_cursor(overlay, surface);
            }

            self.update_hud(document);
            self.completed.replace(false)
        }

        fn resize(&mut self) {
            let size = self.surface.fit_to_client();
            self.collector.on_resize(size);
            if let Some((_, surface)) = &self.cursor {
                surface.fit_to_client();
            }
            self.check_viewport();
        }

        /// Narrow or touch viewports hand the pointer back to the native cursor
        fn check_viewport(&mut self) {
            let Some((overlay, surface)) = &mut self.cursor else {
                return;
            };
            let width = self
                .window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0) as f32;
            let touch = self.window.navigator().max_touch_points() > 0;

            let was_active = !overlay.suppressed;
            let active = overlay.on_viewport(width, touch);
            if !active {
                surface.clear();
            }
            if active != was_active {
                let state = if active { "on" } else { "off" };
                log::info!("Custom cursor {} ({}px wide, touch: {})", state, width, touch);
            }
            if let Some(body) = &self.body {
                let _ = body.class_list().toggle_with_force(CURSOR_BODY_CLASS, active);
            }
        }

        fn local_point(&self, client: Vec2) -> Vec2 {
            let rect = self.surface.canvas().get_bounding_client_rect();
            client - Vec2::new(rect.left() as f32, rect.top() as f32)
        }

        /// Touch the DOM only when the view changed
        fn update_hud(&mut self, document: &Document) {
            let hud = self.collector.hud();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            set_text(document, "process-counter", &hud.counter);
            set_text(document, "process-hint", &hud.hint);

            if let Some(el) = document.get_element_by_id("process-pips") {
                let html: String = hud
                    .pips
                    .iter()
                    .map(|&filled| {
                        if filled {
                            "<span class=\"pip filled\"></span>"
                        } else {
                            "<span class=\"pip\"></span>"
                        }
                    })
                    .collect();
                el.set_inner_html(&html);
            }

            set_hidden(document, "start-watermark", !hud.show_start);
            set_hidden(document, "ready-overlay", !hud.show_ready);

            self.last_hud = Some(hud);
        }
    }

    /// Registered listeners plus the pending frame; dropping it unmounts
    struct Mount {
        window: Window,
        host: Rc<RefCell<Host>>,
        listeners: Vec<(EventTarget, &'static str, Listener)>,
        frame: FrameCallback,
        frame_id: Rc<Cell<Option<i32>>>,
        body: Option<HtmlElement>,
    }

    impl Mount {
        fn listen(
            &mut self,
            target: &EventTarget,
            kind: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) {
            let closure = Listener::new(handler);
            match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push((target.clone(), kind, closure)),
                Err(e) => log::warn!("Could not listen for {}: {:?}", kind, e),
            }
        }
    }

    impl Drop for Mount {
        fn drop(&mut self) {
            if let Some(id) = self.frame_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            self.frame.borrow_mut().take();

            for (target, kind, closure) in self.listeners.drain(..) {
                let _ = target
                    .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }

            if let Some(body) = &self.body {
                let _ = body.class_list().remove_1(CURSOR_BODY_CLASS);
            }
            log::info!("Collector unmounted");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        // Err when a previous mount already installed it
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let Some(canvas) = document
            .get_element_by_id(COLLECTOR_CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #{} canvas, collector not mounted", COLLECTOR_CANVAS_ID);
            return;
        };
        let Some(surface) = Canvas2dSurface::new(canvas.clone()) else {
            log::warn!("Canvas has no 2D context, collector not mounted");
            return;
        };
        let size = surface.fit_to_client();

        let settings = Settings::load();
        let tuning = settings.apply_to(&read_tuning(&canvas));
        let stages = read_stages(&canvas);
        let seed = js_sys::Date::now() as u64;

        let completed = Rc::new(Cell::new(false));
        let sink = completed.clone();
        let policy = canvas
            .get_attribute("data-resize")
            .and_then(|name| ResizePolicy::from_str(&name))
            .unwrap_or(settings.resize_policy);
        let collector = StageCollector::new(stages, size, seed, tuning, move || sink.set(true))
            .with_resize_policy(policy);

        let cursor = mount_cursor(&document, &settings, seed);
        let has_cursor = cursor.is_some();
        let body = document.body();

        let host = Rc::new(RefCell::new(Host {
            window: window.clone(),
            collector,
            surface,
            cursor,
            body: body.clone(),
            completed,
            last_hud: None,
            last_time: 0.0,
        }));
        host.borrow_mut().check_viewport();

        let mut mount = Mount {
            window: window.clone(),
            host: host.clone(),
            listeners: Vec::new(),
            frame: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(None)),
            body,
        };

        setup_pointer_handlers(&mut mount, &canvas, host.clone());
        {
            let host = host.clone();
            mount.listen(&window, "resize", move |_event| {
                if let Ok(mut h) = host.try_borrow_mut() {
                    h.resize();
                }
            });
        }
        if has_cursor {
            setup_cursor_handlers(&mut mount, &window, &document, host.clone());
        }

        start_frames(&mount, &window, &document, &canvas, host);

        MOUNT.with(|slot| {
            // Replacing an earlier mount drops (and tears down) it
            slot.borrow_mut().replace(mount);
        });
        log::info!("Process Trail running (seed {})", seed);
    }

    /// Remove every listener and stop the frame loop
    pub fn unmount() {
        let mount = MOUNT.with(|slot| slot.borrow_mut().take());
        drop(mount);
    }

    fn with_host(f: impl FnOnce(&mut Host)) {
        MOUNT.with(|slot| {
            if let Some(mount) = slot.borrow().as_ref() {
                if let Ok(mut h) = mount.host.try_borrow_mut() {
                    f(&mut h);
                }
            }
        });
    }

    pub fn set_cursor_loading(loading: bool) {
        with_host(|h| {
            if let Some((overlay, _)) = &mut h.cursor {
                overlay.set_loading(loading);
            }
        });
    }

    /// Persist a resize policy and apply it to the running collector
    pub fn set_resize_policy(name: &str) -> bool {
        let Some(policy) = ResizePolicy::from_str(name) else {
            log::warn!("Unknown resize policy: {}", name);
            return false;
        };
        let mut settings = Settings::load();
        if settings.update(|s| s.resize_policy = policy) {
            log::info!("Resize policy set to {}", policy.as_str());
        }
        with_host(|h| h.collector.set_resize_policy(policy));
        true
    }

    fn start_frames(
        mount: &Mount,
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        host: Rc<RefCell<Host>>,
    ) {
        let frame = mount.frame.clone();
        let frame_id = mount.frame_id.clone();
        let window_clone = window.clone();
        let document = document.clone();
        let canvas = canvas.clone();

        *mount.frame.borrow_mut() = Some(Closure::new(move |time: f64| {
            let finished = match host.try_borrow_mut() {
                Ok(mut h) => h.frame(time, &document),
                Err(_) => false,
            };

            if let Some(callback) = frame.borrow().as_ref() {
                frame_id.set(
                    window_clone
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                );
            }

            // Dispatched outside the host borrow so listeners may call back in
            if finished {
                dispatch_complete(&canvas);
            }
        }));

        if let Some(callback) = mount.frame.borrow().as_ref() {
            mount.frame_id.set(
                window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .ok(),
            );
        }
    }

    fn setup_pointer_handlers(
        mount: &mut Mount,
        canvas: &HtmlCanvasElement,
        host: Rc<RefCell<Host>>,
    ) {
        // Mouse move: bound to the canvas, off-surface samples are dropped
        {
            let host = host.clone();
            mount.listen(canvas, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if let Ok(mut h) = host.try_borrow_mut() {
                    let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    let local = h.local_point(client);
                    h.collector.on_surface_pointer(local);
                }
            });
        }

        // Touch move
        {
            mount.listen(canvas, "touchmove", move |event| {
                let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                let Some(touch) = touch_event.touches().get(0) else {
                    return;
                };
                if let Ok(mut h) = host.try_borrow_mut() {
                    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    let local = h.local_point(client);
                    h.collector.on_surface_pointer(local);
                }
            });
        }
    }

    fn setup_cursor_handlers(
        mount: &mut Mount,
        window: &Window,
        document: &Document,
        host: Rc<RefCell<Host>>,
    ) {
        fn with_overlay(host: &Rc<RefCell<Host>>, f: impl FnOnce(&mut CursorOverlay)) {
            if let Ok(mut h) = host.try_borrow_mut() {
                if let Some((overlay, _)) = &mut h.cursor {
                    f(overlay);
                }
            }
        }

        // Page-wide so the overlay follows the pointer over every section
        {
            let host = host.clone();
            let window_clone = window.clone();
            mount.listen(window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let hints = element_hints(event.target(), &window_clone);
                let selected = has_selection(&window_clone);
                with_overlay(&host, |o| o.on_pointer_move(client, hints.as_ref(), selected));
            });
        }
        {
            let host = host.clone();
            mount.listen(window, "mousedown", move |_event| {
                with_overlay(&host, |o| o.on_pointer_down());
            });
        }
        {
            let host = host.clone();
            mount.listen(window, "mouseup", move |_event| {
                with_overlay(&host, |o| o.on_pointer_up());
            });
        }
        if let Some(root) = document.document_element() {
            {
                let host = host.clone();
                mount.listen(&root, "mouseleave", move |_event| {
                    with_overlay(&host, |o| o.on_leave());
                });
            }
            {
                let host = host.clone();
                mount.listen(&root, "mouseenter", move |_event| {
                    with_overlay(&host, |o| o.on_enter());
                });
            }
        }
        {
            let window_clone = window.clone();
            mount.listen(document, "selectionchange", move |_event| {
                let selected = has_selection(&window_clone);
                with_overlay(&host, |o| o.on_selection_change(selected));
            });
        }
    }

    /// Viewport support is checked later, on mount and on every resize
    fn mount_cursor(
        document: &Document,
        settings: &Settings,
        seed: u64,
    ) -> Option<(CursorOverlay, Canvas2dSurface)> {
        if !settings.effective_custom_cursor() {
            return None;
        }

        let canvas = document
            .get_element_by_id(CURSOR_CANVAS_ID)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let surface = Canvas2dSurface::new(canvas)?;
        surface.fit_to_client();

        let mut overlay = CursorOverlay::new(seed.rotate_left(17));
        overlay.trail_enabled = settings.effective_cursor_trail();
        Some((overlay, surface))
    }

    /// `data-stages="A,B,C"` on the canvas, else the default sequence
    fn read_stages(canvas: &HtmlCanvasElement) -> Vec<String> {
        match canvas.get_attribute("data-stages") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `data-tuning` JSON on the canvas; invalid tuning falls back to defaults
    fn read_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring data-tuning: {}", e);
                Tuning::default()
            }
        }
    }

    fn element_hints(target: Option<EventTarget>, window: &Window) -> Option<ElementHints> {
        let el = target?.dyn_into::<Element>().ok()?;
        let css_cursor = window
            .get_computed_style(&el)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("cursor").ok())
            .unwrap_or_default();
        Some(ElementHints {
            tag: el.tag_name(),
            css_cursor,
            content_editable: el
                .dyn_ref::<HtmlElement>()
                .is_some_and(|h| h.is_content_editable()),
            role: el.get_attribute("role"),
            in_link_or_button: el.closest("a, button").ok().flatten().is_some(),
        })
    }

    fn has_selection(window: &Window) -> bool {
        window
            .get_selection()
            .ok()
            .flatten()
            .is_some_and(|s| !s.is_collapsed())
    }

    fn dispatch_complete(target: &HtmlCanvasElement) {
        log::info!("All stages collected");
        match web_sys::CustomEvent::new(COMPLETE_EVENT) {
            Ok(event) => {
                let _ = target.dispatch_event(&event);
            }
            Err(e) => log::warn!("Could not create {} event: {:?}", COMPLETE_EVENT, e),
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

/// Tear the collector down (listeners and frame loop)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount_collector() {
    wasm_host::unmount();
}

/// Switch the cursor swarm into (or out of) its loading orbit
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_cursor_loading(loading: bool) {
    wasm_host::set_cursor_loading(loading);
}

/// `"reset"` or `"rescale"`; false for an unknown name
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_resize_policy(name: &str) -> bool {
    wasm_host::set_resize_policy(name)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Process Trail (native) starting...");
    log::info!("Browser host needs wasm32 - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    autoplay(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Steer the pointer onto each target until the sequence completes
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) {
    use glam::Vec2;
    use process_trail::consts::DEFAULT_STAGES;
    use process_trail::renderer::RecordingSurface;
    use process_trail::sim::SessionEvent;
    use process_trail::{StageCollector, Tuning};

    const MAX_FRAMES: u32 = 60 * 120;

    let size = Vec2::new(1280.0, 720.0);
    let stages = DEFAULT_STAGES.iter().map(|s| s.to_string()).collect();
    let mut collector = StageCollector::new(stages, size, seed, Tuning::default(), || {
        log::info!("Completion callback fired");
    });
    let mut surface = RecordingSurface::new(size.x, size.y);

    for frame in 1..=MAX_FRAMES {
        if let Some(target) = &collector.session().target {
            let pos = target.pos;
            collector.on_pointer_move(pos);
        }

        for event in collector.on_tick(&mut surface) {
            if let SessionEvent::StageCollected { stage, label } = event {
                log::info!("frame {}: collected {} ({})", frame, label, stage + 1);
            }
        }
        surface.take_commands();

        if collector.is_complete() {
            let hud = collector.hud();
            log::info!("{} after {} frames", hud.counter, frame);
            println!("{} - {}", hud.counter, hud.hint);
            return;
        }
    }
    log::warn!(
        "Autoplay stopped after {} frames at {}/{}",
        MAX_FRAMES,
        collector.progress(),
        collector.stage_count()
    );
}
