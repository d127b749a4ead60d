//! Bindings smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use portfolio_terminal::market::NETWORK_ERROR;
use portfolio_terminal::web::Terminal;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(view: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(view, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn submit_returns_fresh_view() {
    let terminal = Terminal::new(None);
    let view = terminal.submit("cd projects");
    assert_eq!(field(&view, "prompt").as_string().as_deref(), Some("user@portfolio.dev projects $"));
    assert_eq!(field(&view, "mode").as_string().as_deref(), Some("normal"));
}

#[wasm_bindgen_test]
fn bad_config_falls_back_to_defaults() {
    let terminal = Terminal::new(Some("{not json".to_string()));
    let view = terminal.view();
    assert_eq!(field(&view, "theme").as_string().as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn snake_enters_and_exits() {
    let terminal = Terminal::new(Some(r#"{"user": "guest"}"#.to_string()));
    assert_eq!(field(&terminal.submit("snake"), "mode").as_string().as_deref(), Some("snake"));
    let view = terminal.exit_takeover();
    assert_eq!(field(&view, "mode").as_string().as_deref(), Some("normal"));
    assert_eq!(field(&view, "prompt").as_string().as_deref(), Some("guest@portfolio.dev ~ $"));
}

#[wasm_bindgen_test]
async fn unreachable_market_ends_in_network_error() {
    let terminal = Terminal::new(Some(r#"{"market_endpoint": "/no-such-endpoint"}"#.to_string()));
    terminal.submit("crypto");
    TimeoutFuture::new(500).await;
    let entries: js_sys::Array = field(&terminal.view(), "entries").into();
    let last = entries.get(entries.length() - 1).as_string().unwrap_or_default();
    assert_eq!(last, NETWORK_ERROR);
}
