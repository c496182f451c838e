//! WebAssembly bindings for the browser.
//!
//! [`Wheel`] wraps a [`WheelDriver`] behind `Rc<RefCell<..>>` so that
//! animation-frame callbacks can reach it. Frames are driven by
//! `requestAnimationFrame`, sound by [`WebAudio`], and randomness by a
//! `SmallRng` seeded from the page clock.
//!
//! JavaScript callbacks are never invoked while the driver is borrowed: each
//! entry point collects [`WheelEvent`]s, drops the borrow, then dispatches.

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use js_sys::Function;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::driver::{WheelDriver, WheelEvent};
use crate::error::WheelError;
use crate::frame::{FrameScheduler, FrameTicket};
use crate::roster::Roster;
use crate::settings::SpinSettings;

type BrowserDriver = WheelDriver<RafScheduler, WebAudio, SmallRng>;

impl From<WheelError> for JsValue {
    fn from(err: WheelError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Install the console logger and panic hook. Call once at startup.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {err}")));
    }
}

fn now_ms() -> f64 {
    web_sys::window().and_then(|w| w.performance()).map_or_else(js_sys::Date::now, |p| p.now())
}

// =============================================================
// Frame scheduling
// =============================================================

/// Schedules frames with `window.requestAnimationFrame`.
pub struct RafScheduler {
    host: Weak<RefCell<Host>>,
    pending: Option<i32>,
}

impl RafScheduler {
    fn detached() -> Self {
        Self { host: Weak::new(), pending: None }
    }

    fn attach(&mut self, host: Weak<RefCell<Host>>) {
        self.host = host;
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule_next_frame(&mut self, ticket: FrameTicket) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; spin {} cannot animate", ticket.spin());
            return;
        };
        let host = self.host.clone();
        let callback = Closure::once_into_js(move |_timestamp: f64| run_frame(&host, ticket));
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => log::warn!("requestAnimationFrame failed: {err:?}"),
        }
    }

    fn cancel_pending(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };
        if let Some(window) = web_sys::window()
            && let Err(err) = window.cancel_animation_frame(handle)
        {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
    }
}

fn run_frame(host: &Weak<RefCell<Host>>, ticket: FrameTicket) {
    let Some(host) = host.upgrade() else {
        return;
    };
    let (events, callbacks) = {
        let Ok(mut guard) = host.try_borrow_mut() else {
            log::warn!("frame for spin {} arrived while the wheel was busy", ticket.spin());
            return;
        };
        guard.driver.scheduler_mut().pending = None;
        let events = guard.driver.on_frame(ticket, now_ms());
        (events, guard.callbacks.clone())
    };
    callbacks.dispatch(&events);
}

// =============================================================
// Host state
// =============================================================

#[derive(Clone, Default)]
struct Callbacks {
    on_rotate: Option<Function>,
    on_tick: Option<Function>,
    on_spin_complete: Option<Function>,
}

impl Callbacks {
    fn dispatch(&self, events: &[WheelEvent]) {
        for event in events {
            let result = match event {
                WheelEvent::Rotated { rotation } => {
                    self.on_rotate.as_ref().map(|f| f.call1(&JsValue::NULL, &JsValue::from_f64(*rotation)))
                }
                WheelEvent::Tick { segment } => {
                    self.on_tick.as_ref().map(|f| f.call1(&JsValue::NULL, &JsValue::from(*segment)))
                }
                WheelEvent::SpinCompleted { winner, index, .. } => self
                    .on_spin_complete
                    .as_ref()
                    .map(|f| f.call2(&JsValue::NULL, &JsValue::from_str(winner), &JsValue::from(*index))),
                WheelEvent::SpinStarted { .. } | WheelEvent::SpinCancelled { .. } => None,
            };
            if let Some(Err(err)) = result {
                log::error!("wheel callback threw: {err:?}");
            }
        }
    }
}

struct Host {
    driver: BrowserDriver,
    callbacks: Callbacks,
}

// =============================================================
// Exported wheel
// =============================================================

#[wasm_bindgen]
pub struct Wheel {
    inner: Rc<RefCell<Host>>,
}

impl Wheel {
    fn host(&self) -> Result<RefMut<'_, Host>, JsValue> {
        self.inner.try_borrow_mut().map_err(|_| JsValue::from_str("wheel is busy"))
    }

    fn dispatch(&self, events: &[WheelEvent]) -> Result<(), JsValue> {
        let callbacks = self.host()?.callbacks.clone();
        callbacks.dispatch(events);
        Ok(())
    }
}

#[wasm_bindgen]
impl Wheel {
    /// Create a wheel with the default participants. `settings_json` may be
    /// empty for default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<Wheel, JsValue> {
        let settings =
            if settings_json.trim().is_empty() { SpinSettings::default() } else { SpinSettings::from_json(settings_json)? };
        let seed = js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits();
        let mut driver = WheelDriver::new(
            Roster::with_defaults(),
            settings,
            RafScheduler::detached(),
            WebAudio::new(),
            SmallRng::seed_from_u64(seed),
        )?;

        let inner = Rc::new_cyclic(|weak| {
            driver.scheduler_mut().attach(weak.clone());
            RefCell::new(Host { driver, callbacks: Callbacks::default() })
        });
        log::info!("wheel created");
        Ok(Wheel { inner })
    }

    // --- Entries ---

    /// Replace entries from newline-separated text. Returns how many entries
    /// the size cap dropped.
    pub fn set_entries_text(&self, text: &str) -> Result<usize, JsValue> {
        let parsed = Roster::parse(text);
        self.host()?.driver.set_roster(parsed.roster)?;
        Ok(parsed.dropped)
    }

    /// Replace entries from a JSON string array.
    pub fn set_entries_json(&self, json: &str) -> Result<usize, JsValue> {
        let parsed = Roster::from_json(json)?;
        self.host()?.driver.set_roster(parsed.roster)?;
        Ok(parsed.dropped)
    }

    pub fn entries_text(&self) -> Result<String, JsValue> {
        Ok(self.host()?.driver.roster().to_text())
    }

    pub fn remove_duplicates(&self) -> Result<usize, JsValue> {
        Ok(self.host()?.driver.dedupe()?)
    }

    /// Dismiss the last winner, removing it when configured.
    pub fn acknowledge_winner(&self) -> Result<Option<String>, JsValue> {
        Ok(self.host()?.driver.acknowledge_winner()?)
    }

    // --- Settings ---

    pub fn set_settings_json(&self, json: &str) -> Result<(), JsValue> {
        let settings = SpinSettings::from_json(json)?;
        self.host()?.driver.set_settings(settings);
        Ok(())
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        let settings = self.host()?.driver.settings();
        serde_json::to_string(&settings).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    // --- Spinning ---

    pub fn start_spin(&self) -> Result<(), JsValue> {
        let events = self.host()?.driver.start_spin(now_ms())?;
        self.dispatch(&events)
    }

    pub fn cancel(&self) -> Result<(), JsValue> {
        let events = self.host()?.driver.cancel();
        self.dispatch(&events)
    }

    pub fn rotation(&self) -> Result<f64, JsValue> {
        Ok(self.host()?.driver.rotation())
    }

    pub fn is_spinning(&self) -> Result<bool, JsValue> {
        Ok(self.host()?.driver.is_spinning())
    }

    /// Segment geometry for the current entries, as JSON.
    pub fn layout_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.host()?.driver.layout()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    // --- Callbacks ---

    /// `callback(rotationDegrees)` on every animated frame.
    pub fn on_rotate(&self, callback: Function) -> Result<(), JsValue> {
        self.host()?.callbacks.on_rotate = Some(callback);
        Ok(())
    }

    /// `callback(segmentIndex)` each time the pointer enters a segment.
    pub fn on_tick(&self, callback: Function) -> Result<(), JsValue> {
        self.host()?.callbacks.on_tick = Some(callback);
        Ok(())
    }

    /// `callback(winner, index)` once per completed spin.
    pub fn on_spin_complete(&self, callback: Function) -> Result<(), JsValue> {
        self.host()?.callbacks.on_spin_complete = Some(callback);
        Ok(())
    }
}
