//! Browser bindings: the exported `Terminal`, fetch-backed collaborators,
//! `localStorage` and the timers behind loading and movie playback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::assets::AssetSource;
use crate::autocomplete::Completion;
use crate::config::TerminalConfig;
use crate::content;
use crate::context::TerminalContext;
use crate::error::{CollaboratorError, StorageError};
use crate::market::{self, MarketData, Quote};
use crate::session::{PendingCommand, Session, Submission};
use crate::storage::Storage;
use crate::takeover::{ActiveTakeover, TakeoverState, Transition};

// better errors in browser console
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: JsValue) -> CollaboratorError {
    CollaboratorError::Network(format!("{:?}", e))
}

/// GET `url` and return the body. With `accept_error_status` a non-2xx
/// body is still returned (the price endpoint reports failures as JSON).
async fn fetch_body(url: &str, accept_error_status: bool) -> Result<String, CollaboratorError> {
    let window = web_sys::window().ok_or_else(|| CollaboratorError::Network("no window object available".to_string()))?;

    let mut opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    let headers = Headers::new().map_err(js_error)?;
    headers.set("Accept", "application/json, text/plain").ok();
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_error)?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| CollaboratorError::Malformed("fetch did not return a Response".to_string()))?;
    if !response.ok() && !accept_error_status {
        return Err(CollaboratorError::Network(format!("{}: status {}", url, response.status())));
    }

    let body = JsFuture::from(response.text().map_err(js_error)?).await.map_err(js_error)?;
    body.as_string().ok_or_else(|| CollaboratorError::Malformed("response body is not text".to_string()))
}

/// `tracing` has no subscriber in the browser; failures at this boundary
/// go to the console as well.
fn report<T, E: std::fmt::Display>(what: &str, result: Result<T, E>) -> Result<T, E> {
    if let Err(e) = &result {
        web_sys::console::warn_1(&format!("[terminal] {}: {}", what, e).into());
    }
    result
}

struct FetchMarket {
    endpoint: String,
}

impl MarketData for FetchMarket {
    fn fetch_quotes(&self) -> LocalBoxFuture<'static, Result<Vec<Quote>, CollaboratorError>> {
        let url = self.endpoint.clone();
        Box::pin(async move {
            let quotes = fetch_body(&url, true).await.and_then(|body| market::parse_response(&body));
            report("failed to fetch crypto prices", quotes)
        })
    }
}

struct FetchAssets;

impl AssetSource for FetchAssets {
    fn fetch_text(&self, path: &str) -> LocalBoxFuture<'static, Result<String, CollaboratorError>> {
        let url = path.to_string();
        Box::pin(async move { report(&format!("failed to load {}", url), fetch_body(&url, false).await) })
    }
}

/// `window.localStorage`; `None` when the browser refuses access.
struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    fn open() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { inner }
    }

    fn slot(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .slot()
            .and_then(|s| s.get_item(key).map_err(|e| StorageError::Unavailable(format!("{:?}", e))));
        report(&format!("failed to read {}", key), value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let written = self
            .slot()
            .and_then(|s| s.set_item(key, value).map_err(|e| StorageError::Unavailable(format!("{:?}", e))));
        report(&format!("failed to write {}", key), written)
    }
}

struct Shared {
    session: RefCell<Session>,
    on_update: RefCell<Option<js_sys::Function>>,
    timers: RefCell<Vec<AbortHandle>>,
    // epoch the running timer belongs to
    timer_epoch: Cell<Option<u64>>,
}

impl Shared {
    fn view(&self) -> JsValue {
        let view = self.session.borrow().view();
        serde_wasm_bindgen::to_value(&view).unwrap_or_else(|e| {
            web_sys::console::error_1(&format!("[terminal] failed to encode view: {}", e).into());
            JsValue::NULL
        })
    }

    fn notify(&self) {
        let callback = self.on_update.borrow().clone();
        if let Some(cb) = callback {
            if let Err(e) = cb.call1(&JsValue::NULL, &self.view()) {
                web_sys::console::error_2(&"[terminal] update callback failed:".into(), &e);
            }
        }
    }

    fn cancel_timers(&self) {
        for handle in self.timers.borrow_mut().drain(..) {
            handle.abort();
        }
        self.timer_epoch.set(None);
    }
}

/// Start (or stop) whatever timer the current takeover state needs. A timer
/// already running for the current epoch is left alone.
fn schedule(shared: &Rc<Shared>) {
    let job: Option<(u64, LocalBoxFuture<'static, ()>)> = {
        let session = shared.session.borrow();
        let epoch = session.epoch();
        if shared.timer_epoch.get() == Some(epoch) {
            return;
        }
        match session.takeover().state() {
            TakeoverState::Loading(_) => {
                let tick_ms = session.context().config.loading_tick_ms.max(1);
                Some((epoch, Box::pin(loading_loop(Rc::clone(shared), epoch, tick_ms))))
            }
            TakeoverState::Active(ActiveTakeover::Movie(_)) => {
                Some((epoch, Box::pin(frame_loop(Rc::clone(shared), epoch))))
            }
            _ => None,
        }
    };

    shared.cancel_timers();
    if let Some((epoch, job)) = job {
        let (handle, registration) = AbortHandle::new_pair();
        shared.timers.borrow_mut().push(handle);
        shared.timer_epoch.set(Some(epoch));
        spawn_local(async move {
            let _ = Abortable::new(job, registration).await;
        });
    }
}

async fn loading_loop(shared: Rc<Shared>, epoch: u64, tick_ms: u32) {
    loop {
        TimeoutFuture::new(tick_ms).await;
        let transition = shared.session.borrow_mut().tick(epoch, tick_ms);
        if transition == Transition::Stale {
            break;
        }
        shared.notify();
        if transition != Transition::Waiting {
            break;
        }
    }
    schedule(&shared);
}

async fn frame_loop(shared: Rc<Shared>, epoch: u64) {
    loop {
        let delay = match shared.session.borrow().takeover().frame_delay_ms() {
            Some(delay) => delay,
            None => break,
        };
        TimeoutFuture::new(delay).await;
        let transition = shared.session.borrow_mut().advance_frame(epoch);
        if transition == Transition::Stale {
            break;
        }
        shared.notify();
        if transition != Transition::Waiting {
            break;
        }
    }
}

#[derive(Serialize)]
struct CompletionResponse {
    input: Option<String>,
    candidates: Vec<String>,
}

/// The terminal widget. Every method returns the fresh view; state changes
/// that happen later (command results, timers) arrive through the
/// `onUpdate` callback.
#[wasm_bindgen]
pub struct Terminal {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Terminal {
    /// `config` is an optional JSON object; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Terminal {
        let config = match config.as_deref().map(TerminalConfig::from_json) {
            Some(Ok(cfg)) => cfg,
            Some(Err(e)) => {
                web_sys::console::warn_1(&format!("[terminal] {}; using defaults", e).into());
                TerminalConfig::default()
            }
            None => TerminalConfig::default(),
        };

        let market = Rc::new(FetchMarket { endpoint: config.market_endpoint.clone() });
        let ctx = TerminalContext::new(Rc::new(content::portfolio()), config)
            .with_market(market)
            .with_assets(Rc::new(FetchAssets));
        let session = Session::new(ctx, Box::new(LocalStorage::open()));
        web_sys::console::log_1(&"[terminal] session ready".into());

        Terminal {
            shared: Rc::new(Shared {
                session: RefCell::new(session),
                on_update: RefCell::new(None),
                timers: RefCell::new(Vec::new()),
                timer_epoch: Cell::new(None),
            }),
        }
    }

    #[wasm_bindgen(js_name = onUpdate)]
    pub fn on_update(&self, callback: js_sys::Function) {
        *self.shared.on_update.borrow_mut() = Some(callback);
    }

    pub fn view(&self) -> JsValue {
        self.shared.view()
    }

    /// Enter pressed. Pending commands resolve in the background.
    pub fn submit(&self, input: &str) -> JsValue {
        let submission = self.shared.session.borrow_mut().submit(input);
        if let Submission::Pending(PendingCommand { ticket, future }) = submission {
            let shared = Rc::clone(&self.shared);
            spawn_local(async move {
                let output = future.await;
                let delivered = shared.session.borrow_mut().resolve(ticket, output);
                if delivered {
                    schedule(&shared);
                    shared.notify();
                }
            });
        }
        schedule(&self.shared);
        self.view()
    }

    /// Ctrl+C while a takeover mode is up.
    #[wasm_bindgen(js_name = exitTakeover)]
    pub fn exit_takeover(&self) -> JsValue {
        self.shared.cancel_timers();
        self.shared.session.borrow_mut().exit_takeover();
        self.view()
    }

    #[wasm_bindgen(js_name = historyUp)]
    pub fn history_up(&self) -> Option<String> {
        self.shared.session.borrow_mut().history_older()
    }

    #[wasm_bindgen(js_name = historyDown)]
    pub fn history_down(&self) -> Option<String> {
        self.shared.session.borrow_mut().history_newer()
    }

    /// Tab pressed. `input` is set when the line should be replaced.
    pub fn complete(&self, input: &str) -> JsValue {
        let response = match self.shared.session.borrow().complete(input) {
            Completion::None => CompletionResponse { input: None, candidates: Vec::new() },
            Completion::Replaced(line) => CompletionResponse { input: Some(line), candidates: Vec::new() },
            Completion::Candidates(candidates) => CompletionResponse { input: None, candidates },
        };
        serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = commandNames)]
    pub fn command_names(&self) -> JsValue {
        let names = self.shared.session.borrow().context().get_command_registry().map(|r| r.get_command_names());
        serde_wasm_bindgen::to_value(&names.unwrap_or_default()).unwrap_or(JsValue::NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn report_passes_results_through() {
        assert_eq!(report("ok", Ok::<u8, CollaboratorError>(1)), Ok(1));
        let err = CollaboratorError::Network("offline".to_string());
        assert_eq!(report("failed", Err::<u8, _>(err.clone())), Err(err));
    }

    #[wasm_bindgen_test]
    async fn missing_asset_is_reported_as_error() {
        let got = FetchAssets.fetch_text("/no-such-movie.txt").await;
        assert!(matches!(got, Err(CollaboratorError::Network(_))));
    }
}
