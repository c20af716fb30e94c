/// Browser host surface: window/tab enumeration and creation, file I/O, storage
use wasm_bindgen::prelude::*;
use web_sys::File;

use crate::codec::JsonPayload;
use crate::error::{Result, TabPorterError};
use crate::tab_data::{TabRecord, WindowId};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getCurrentWindowId() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs(window_id: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createWindow(urls: JsValue, focused: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(window_id: i32, url: &str, active: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn readFileAsText(file: &File) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn downloadFile(data: &str, filename: &str, mime_type: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// Window and tab primitives the export/import logic runs against.
///
/// Every call suspends until the host answers. No timeout, no retry.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn current_window_id(&self) -> Result<WindowId>;

    /// All tabs when `window_id` is `None`, otherwise the tabs of that window.
    async fn query_tabs(&self, window_id: Option<WindowId>) -> Result<Vec<TabRecord>>;

    /// Open one window holding one tab per url.
    async fn create_window(&self, focused: bool, urls: &[String]) -> Result<()>;

    async fn create_tab(&self, window_id: WindowId, url: &str, active: bool) -> Result<()>;
}

/// `TabHost` backed by the `chrome.windows` / `chrome.tabs` extension APIs
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeHost;

impl TabHost for ChromeHost {
    async fn current_window_id(&self) -> Result<WindowId> {
        let id_js = getCurrentWindowId()
            .await
            .map_err(|e| TabPorterError::HostQuery(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(id_js)
            .map_err(|e| TabPorterError::HostQuery(format!("Failed to parse window id: {:?}", e)))
    }

    async fn query_tabs(&self, window_id: Option<WindowId>) -> Result<Vec<TabRecord>> {
        let window_js = match window_id {
            Some(id) => JsValue::from(id),
            None => JsValue::UNDEFINED,
        };

        let tabs_js = queryTabs(window_js)
            .await
            .map_err(|e| TabPorterError::HostQuery(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| TabPorterError::HostQuery(format!("Failed to parse tabs: {:?}", e)))
    }

    async fn create_window(&self, focused: bool, urls: &[String]) -> Result<()> {
        let create_error = |reason: String| TabPorterError::HostCreate {
            url: urls.join(", "),
            reason,
        };

        let urls_js = serde_wasm_bindgen::to_value(urls)
            .map_err(|e| create_error(format!("Failed to serialize urls: {:?}", e)))?;

        createWindow(urls_js, focused)
            .await
            .map_err(|e| create_error(format!("{:?}", e)))
    }

    async fn create_tab(&self, window_id: WindowId, url: &str, active: bool) -> Result<()> {
        createTab(window_id, url, active)
            .await
            .map_err(|e| TabPorterError::HostCreate {
                url: url.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

pub async fn read_file_as_text(file: &File) -> Result<String> {
    let text_js = readFileAsText(file)
        .await
        .map_err(|e| TabPorterError::FileRead(format!("{:?}", e)))?;

    text_js
        .as_string()
        .ok_or_else(|| TabPorterError::FileRead(format!("{} did not contain text", file.name())))
}

/// Hand the payload to the browser as a file download
pub fn trigger_download(filename: &str, payload: &JsonPayload) -> Result<()> {
    downloadFile(payload.as_str(), filename, payload.mime_type)
        .map_err(|e| TabPorterError::Download {
            filename: filename.to_string(),
            reason: format!("{:?}", e),
        })
}

/// Read a key from `chrome.storage.local`; `None` when the key is unset.
pub async fn load_storage(key: &str) -> Result<Option<JsValue>> {
    let value = getStorage(key)
        .await
        .map_err(|e| TabPorterError::Storage(format!("Failed to get storage: {:?}", e)))?;

    if value.is_null() || value.is_undefined() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

pub async fn save_storage(key: &str, value: JsValue) -> Result<()> {
    setStorage(key, value)
        .await
        .map_err(|e| TabPorterError::Storage(format!("Failed to save storage: {:?}", e)))
}

/// In-memory `TabHost` recording every call, for tests
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use super::TabHost;
    use crate::error::{Result, TabPorterError};
    use crate::tab_data::{TabRecord, WindowId};

    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        CurrentWindow,
        QueryTabs(Option<WindowId>),
        CreateWindow { focused: bool, urls: Vec<String> },
        CreateTabStarted { window_id: WindowId, url: String, active: bool },
        CreateTabFinished(String),
    }

    /// Returns `Pending` once before completing, like a real host round trip.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[derive(Default)]
    pub struct FakeHost {
        pub current_window: WindowId,
        pub tabs: Vec<TabRecord>,
        pub fail_query: bool,
        pub fail_current_window: bool,
        pub fail_create_window: bool,
        pub fail_on_url: Option<String>,
        pub calls: RefCell<Vec<HostCall>>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    impl FakeHost {
        pub fn new(current_window: WindowId, tabs: Vec<TabRecord>) -> FakeHost {
            FakeHost {
                current_window,
                tabs,
                ..FakeHost::default()
            }
        }

        pub fn calls(&self) -> Vec<HostCall> {
            self.calls.borrow().clone()
        }

        pub fn creation_calls(&self) -> Vec<HostCall> {
            self.calls()
                .into_iter()
                .filter(|c| {
                    matches!(
                        c,
                        HostCall::CreateWindow { .. } | HostCall::CreateTabStarted { .. }
                    )
                })
                .collect()
        }

        /// Highest number of `create_tab` calls that were running at once
        pub fn max_tabs_in_flight(&self) -> usize {
            self.max_in_flight.get()
        }

        fn record(&self, call: HostCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl TabHost for FakeHost {
        async fn current_window_id(&self) -> Result<WindowId> {
            self.record(HostCall::CurrentWindow);
            if self.fail_current_window {
                return Err(TabPorterError::HostQuery("no focused window".to_string()));
            }
            Ok(self.current_window)
        }

        async fn query_tabs(&self, window_id: Option<WindowId>) -> Result<Vec<TabRecord>> {
            self.record(HostCall::QueryTabs(window_id));
            if self.fail_query {
                return Err(TabPorterError::HostQuery("permission denied".to_string()));
            }
            Ok(self
                .tabs
                .iter()
                .filter(|t| window_id.is_none_or(|id| t.window_id == id))
                .cloned()
                .collect())
        }

        async fn create_window(&self, focused: bool, urls: &[String]) -> Result<()> {
            self.record(HostCall::CreateWindow {
                focused,
                urls: urls.to_vec(),
            });
            if self.fail_create_window {
                return Err(TabPorterError::HostCreate {
                    url: urls.join(", "),
                    reason: "window limit reached".to_string(),
                });
            }
            Ok(())
        }

        async fn create_tab(&self, window_id: WindowId, url: &str, active: bool) -> Result<()> {
            self.record(HostCall::CreateTabStarted {
                window_id,
                url: url.to_string(),
                active,
            });
            let running = self.in_flight.get() + 1;
            self.in_flight.set(running);
            self.max_in_flight.set(self.max_in_flight.get().max(running));

            YieldOnce(false).await;
            self.in_flight.set(self.in_flight.get() - 1);

            if self.fail_on_url.as_deref() == Some(url) {
                return Err(TabPorterError::HostCreate {
                    url: url.to_string(),
                    reason: "tab limit reached".to_string(),
                });
            }
            self.record(HostCall::CreateTabFinished(url.to_string()));
            Ok(())
        }
    }

    mod tests {
        use super::*;
        use futures::executor::block_on;
        use futures::future::join_all;

        #[test]
        fn test_concurrent_creates_are_counted() {
            let host = FakeHost::new(1, vec![]);

            let results = block_on(join_all(
                ["https://a.example", "https://b.example", "https://c.example"]
                    .iter()
                    .map(|url| host.create_tab(1, url, false)),
            ));

            assert!(results.iter().all(|r| r.is_ok()));
            assert_eq!(host.max_tabs_in_flight(), 3);
        }

        #[test]
        fn test_awaited_creates_stay_single() {
            let host = FakeHost::new(1, vec![]);

            block_on(async {
                host.create_tab(1, "https://a.example", false).await.unwrap();
                host.create_tab(1, "https://b.example", false).await.unwrap();
            });

            assert_eq!(host.max_tabs_in_flight(), 1);
        }
    }
}
