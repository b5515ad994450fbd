use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

pub(crate) const COPY_ACK: &str = "JSON copied to clipboard!";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ClipboardError {
    #[error("clipboard api unavailable")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

fn write_text_promise(text: &str) -> Result<Promise, ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| ClipboardError::Unavailable)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(ClipboardError::Unavailable);
    }
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|_| ClipboardError::Unavailable)?
        .dyn_into::<Function>()
        .map_err(|_| ClipboardError::Unavailable)?;
    write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|err| ClipboardError::Rejected(js_err(err)))?
        .dyn_into::<Promise>()
        .map_err(|err| ClipboardError::Rejected(js_err(err)))
}

pub(crate) async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let promise = write_text_promise(text)?;
    JsFuture::from(promise)
        .await
        .map_err(|err| ClipboardError::Rejected(js_err(err)))?;
    Ok(())
}

/// Fire-and-forget copy. Failures only reach the console.
pub(crate) fn copy_with_ack(text: String) {
    spawn_local(async move {
        match write_text(&text).await {
            Ok(()) => gloo::dialogs::alert(COPY_ACK),
            Err(err) => {
                gloo::console::warn!("copy to clipboard failed", err.to_string());
            }
        }
    });
}
