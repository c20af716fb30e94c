/// Export: collect live tabs and turn them into a downloadable JSON document
use log::{debug, info};

use crate::codec::{self, JsonPayload};
use crate::error::{Result, TabPorterError};
use crate::host::TabHost;
use crate::tab_data::{ExportDocument, ExportScope, ExportedTabEntry, TabRecord, is_usable_url};

const FILENAME_PREFIX: &str = "chromeTabs";
const SINGLE_WINDOW_INFIX: &str = "_singleWindow";

/// Date stamped into an export filename.
///
/// `year` is the local calendar year, `month` (1-12) and `day` are UTC.
/// The parts are kept apart because around New Year they can disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilenameDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl FilenameDate {
    pub fn new(year: i32, month: u32, day: u32) -> FilenameDate {
        FilenameDate { year, month, day }
    }
}

/// Query the tabs covered by `scope`, in the order the host returns them
pub async fn collect_tabs<H: TabHost>(host: &H, scope: ExportScope) -> Result<Vec<TabRecord>> {
    let window_id = match scope {
        ExportScope::CurrentWindow => Some(host.current_window_id().await?),
        ExportScope::AllWindows => None,
    };

    let tabs = host.query_tabs(window_id).await?;
    debug!("Collected {} tabs for {:?} (window {:?})", tabs.len(), scope, window_id);
    Ok(tabs)
}

/// Project each tab onto `{title, url}`, one entry per tab, same order.
///
/// A tab with a missing or blank url is rejected; a missing title becomes `""`.
pub fn build_export_document(tabs: &[TabRecord]) -> Result<ExportDocument> {
    tabs.iter()
        .enumerate()
        .map(|(index, tab)| match tab.url.as_deref() {
            Some(url) if is_usable_url(url) => Ok(ExportedTabEntry::new(
                tab.title.clone().unwrap_or_default(),
                url,
            )),
            _ => Err(TabPorterError::MalformedEntry {
                index,
                reason: format!("tab {:?} has no url", tab.id),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(ExportDocument)
}

pub fn serialize(document: &ExportDocument) -> Result<JsonPayload> {
    codec::encode(document)
}

/// `chromeTabs[_singleWindow]_#{YY}{M}{D}.json`, month and day unpadded
pub fn build_filename(scope: ExportScope, date: FilenameDate) -> String {
    let infix = match scope {
        ExportScope::CurrentWindow => SINGLE_WINDOW_INFIX,
        ExportScope::AllWindows => "",
    };

    format!(
        "{}{}_#{:02}{}{}.json",
        FILENAME_PREFIX,
        infix,
        date.year.rem_euclid(100),
        date.month,
        date.day
    )
}

/// Run a whole export: collect, project, encode, name.
pub async fn export_tabs<H: TabHost>(
    host: &H,
    scope: ExportScope,
    date: FilenameDate,
) -> Result<(String, JsonPayload)> {
    let tabs = collect_tabs(host, scope).await?;
    let document = build_export_document(&tabs)?;
    let payload = serialize(&document)?;
    let filename = build_filename(scope, date);

    info!("Exported {} tabs to {}", document.len(), filename);
    Ok((filename, payload))
}
