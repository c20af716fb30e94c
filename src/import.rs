/// Import: parse an exported JSON file and reopen its tabs
use log::{debug, info, warn};
use serde::Deserialize;

use crate::codec;
use crate::error::{Result, TabPorterError};
use crate::host::TabHost;
use crate::tab_data::{ExportedTabEntry, PlacementMode, WindowId, is_usable_url};

/// Entry as found on disk. `title` may be absent or null in hand-edited files.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    title: Option<String>,
    url: String,
}

/// Decode an export file into its entries, in file order.
///
/// The top level must be an array of objects, each with a string `url`.
/// Extra keys are ignored. A blank `url` is rejected.
pub fn parse(payload: &[u8]) -> Result<Vec<ExportedTabEntry>> {
    let stored: Vec<StoredEntry> = codec::decode(payload)?;

    stored
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !is_usable_url(&entry.url) {
                Err(TabPorterError::MalformedEntry {
                    index,
                    reason: "url is blank".to_string(),
                })
            } else {
                Ok(ExportedTabEntry::new(entry.title.unwrap_or_default(), entry.url))
            }
        })
        .collect()
}

pub fn extract_urls(entries: &[ExportedTabEntry]) -> Vec<String> {
    entries.iter().map(|e| e.url.clone()).collect()
}

/// Reopen `urls` according to `mode`.
///
/// `NewWindow` issues a single focused window creation holding every url.
/// `SameWindow` creates one inactive tab per url in `current_window_id`
/// (resolved from the host when `None`), awaiting each before the next.
/// The first failed creation aborts the rest; tabs already opened stay open.
/// An empty `urls` issues no host calls.
pub async fn restore<H: TabHost>(
    host: &H,
    urls: &[String],
    mode: PlacementMode,
    current_window_id: Option<WindowId>,
) -> Result<()> {
    if urls.is_empty() {
        debug!("Nothing to restore");
        return Ok(());
    }

    match mode {
        PlacementMode::NewWindow => {
            debug!("Opening {} tabs in a new window", urls.len());
            host.create_window(true, urls).await
        }
        PlacementMode::SameWindow => {
            let window_id = match current_window_id {
                Some(id) => id,
                None => host.current_window_id().await?,
            };

            for (opened, url) in urls.iter().enumerate() {
                debug!("Opening {} in window {}", url, window_id);
                if let Err(e) = host.create_tab(window_id, url, false).await {
                    warn!("Restore aborted after {} of {} tabs: {}", opened, urls.len(), e);
                    return Err(e);
                }
            }
            Ok(())
        }
    }
}

/// Run a whole import: parse, project, restore. Returns the number of urls opened.
pub async fn import_tabs<H: TabHost>(host: &H, text: &str, mode: PlacementMode) -> Result<usize> {
    let entries = parse(text.as_bytes())?;
    let urls = extract_urls(&entries);

    restore(host, &urls, mode, None).await?;

    info!("Imported {} tabs ({:?})", urls.len(), mode);
    Ok(urls.len())
}
