//! Browser side of the roast widget.
//!
//! Builds the DOM under the mount element, wires each button to a roaster
//! [`Action`](crate::roaster::Action), and runs a `requestAnimationFrame` loop
//! for the roast line fade-in and the chart (including its hover tooltip).
//! Roaster observers re-render the DOM text synchronously; the frame loop
//! never mutates roast state.

mod anim;
mod render;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, instrument, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::config::RoasterConfig;
use crate::error::{Error, Result};
use crate::logging;
use crate::roaster::Roaster;
use crate::storage::{KeyValueStore, LocalStore, MemoryStore, Persistence};
use anim::FadeIn;
use render::Ui;

type Store = Box<dyn KeyValueStore>;

/// Runtime widget state.
struct WidgetState {
    roaster: Roaster<Store>,
    root: Element,
    ui: Ui,
    fade: FadeIn,
    fade_settled: bool,
    // set by the roaster observer when the roast line text changes
    restart_fade: Rc<Cell<bool>>,
    animation_ms: f64,
    // canvas-local pointer position
    hover: Option<(f64, f64)>,
}

thread_local! {
    static WIDGET_STATE: RefCell<Option<WidgetState>> = const { RefCell::new(None) };
    static LOOP_RUNNING: Cell<bool> = const { Cell::new(false) };
}

#[instrument(skip_all, fields(mount_id = %config.mount_id))]
pub(crate) fn mount(config: RoasterConfig) -> Result<()> {
    config.validate()?;
    logging::init_tracing(&config.log_filter)?;

    let win = window().ok_or(Error::NoWindow)?;
    let doc = win.document().ok_or(Error::NoDocument)?;
    unmount_previous()?;
    let root = mount_root(&doc, &config.mount_id)?;
    let ui = Ui::build(&doc, &root, config.chart_size)?;

    let store: Store = match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = %err, "falling back to in-memory storage");
            Box::new(MemoryStore::new())
        }
    };
    let mut roaster = Roaster::mount(Persistence::with_keys(store, config.storage_keys()));

    let restart_fade = Rc::new(Cell::new(false));
    {
        let ui = ui.clone();
        let restart = Rc::clone(&restart_fade);
        let mut shown = roaster.display_text().to_owned();
        roaster.subscribe(move |view| {
            if view.display_text != shown {
                shown = view.display_text.to_owned();
                restart.set(true);
            }
            if let Err(err) = ui.render(view) {
                warn!(error = %err, "render failed");
            }
        });
    }
    ui.render(&roaster.view())?;

    // Buttons
    for (action, button) in ui.buttons().iter().cloned() {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            WIDGET_STATE.with(|state_cell| {
                if let Some(state) = state_cell.borrow_mut().as_mut() {
                    let outcome = state.roaster.dispatch(action);
                    debug!(?action, ?outcome, "button");
                }
            });
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Chart hover for the tooltip
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let point = (evt.offset_x() as f64, evt.offset_y() as f64);
            WIDGET_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.hover = Some(point);
                }
            });
        }) as Box<dyn FnMut(_)>);
        ui.canvas()
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            WIDGET_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.hover = None;
                }
            });
        }) as Box<dyn FnMut(_)>);
        ui.canvas()
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let animation_ms = f64::from(config.animation_ms);
    let state = WidgetState {
        roaster,
        root,
        ui,
        fade: FadeIn::start(now(), animation_ms),
        fade_settled: false,
        restart_fade,
        animation_ms,
        hover: None,
    };
    WIDGET_STATE.with(|cell| cell.replace(Some(state)));

    start_frame_loop();
    info!("roaster mounted");
    Ok(())
}

/// Tears down an earlier widget so its buttons and listeners go with its DOM.
fn unmount_previous() -> Result<()> {
    let Some(previous) = WIDGET_STATE.with(|cell| cell.borrow_mut().take()) else {
        return Ok(());
    };
    debug!(mount_id = %previous.root.id(), "replacing mounted roaster");
    previous.root.set_text_content(None);
    previous.root.remove_attribute("style")?;
    Ok(())
}

/// Reuses (and empties) the element with `id`, or appends a new div to `<body>`.
fn mount_root(doc: &Document, id: &str) -> Result<Element> {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(None);
        return Ok(el);
    }
    let body = doc.body().ok_or(Error::NoDocument)?;
    let el = doc.create_element("div")?;
    el.set_id(id);
    body.append_child(&el)?;
    Ok(el)
}

fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// Remounting swaps WIDGET_STATE; the one loop keeps serving whatever is there.
fn start_frame_loop() {
    if LOOP_RUNNING.with(|running| running.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        WIDGET_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                tick(state, ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(cb) = callback.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn tick(state: &mut WidgetState, now: f64) {
    if state.restart_fade.replace(false) {
        state.fade = FadeIn::start(now, state.animation_ms);
        state.fade_settled = false;
    }
    if !state.fade_settled {
        let frame = state.fade.sample(now);
        if let Err(err) = state.ui.apply_fade(&frame) {
            debug!(error = %err, "fade frame skipped");
        }
        state.fade_settled = frame.done;
    }
    if let Err(err) = state
        .ui
        .draw_chart(&state.roaster.chart_slices(), state.hover)
    {
        debug!(error = %err, "chart frame skipped");
    }
}
