/// Popup UI for Tab Porter extension

use log::error;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::error::Result;
use crate::export::{FilenameDate, export_tabs};
use crate::host::{ChromeHost, read_file_as_text, trigger_download};
use crate::import::import_tabs;
use crate::preferences::Preferences;
use crate::tab_data::{ExportScope, PlacementMode};
use crate::ui::components::{Status, StatusBanner};

#[function_component(App)]
pub fn app() -> Html {
    let status = use_state(|| Status::Idle);
    let mode = use_state(PlacementMode::default);
    let file_input = use_node_ref();

    // Load the saved placement preference on mount
    {
        let mode = mode.clone();
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match Preferences::load().await {
                    Ok(prefs) => mode.set(prefs.placement_mode),
                    Err(e) => status.set(Status::Error(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_export = {
        let status = status.clone();
        move |scope: ExportScope| {
            let status = status.clone();
            Callback::from(move |_: MouseEvent| {
                let status = status.clone();
                status.set(Status::Busy("Saving tabs...".to_string()));

                spawn_local(async move {
                    match save_tabs(scope).await {
                        Ok(filename) => status.set(Status::Done(format!("Saved {}", filename))),
                        Err(e) => {
                            error!("Export failed: {}", e);
                            status.set(Status::Error(format!("Export failed: {}", e)));
                        }
                    }
                });
            })
        }
    };

    // Flipping the switch also clears the file picker, so re-selecting the
    // same file afterwards fires a fresh change event.
    let on_toggle = {
        let mode = mode.clone();
        let status = status.clone();
        let file_input = file_input.clone();
        Callback::from(move |checked: bool| {
            let new_mode = PlacementMode::from_toggle(checked);
            mode.set(new_mode);

            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.set_value("");
            }

            let status = status.clone();
            spawn_local(async move {
                if let Err(e) = Preferences::new(new_mode).save().await {
                    status.set(Status::Error(e.to_string()));
                }
            });
        })
    };

    let on_file_selected = {
        let status = status.clone();
        let mode = mode.clone();
        Callback::from(move |e: Event| {
            let Some(file) = selected_file(&e) else {
                return;
            };

            let status = status.clone();
            let mode = *mode;
            status.set(Status::Busy(format!("Opening tabs from {}...", file.name())));

            spawn_local(async move {
                match open_tabs(&file, mode).await {
                    Ok(count) => status.set(Status::Done(format!("Opened {} tabs", count))),
                    Err(e) => {
                        error!("Import failed: {}", e);
                        status.set(Status::Error(format!("Import failed: {}", e)));
                    }
                }
            });
        })
    };

    let is_busy = status.is_busy();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Porter"}</h1>

            <StatusBanner status={(*status).clone()} />

            <div class="flex-column-gap">
                <Button
                    onclick={on_export(ExportScope::CurrentWindow)}
                    disabled={is_busy}
                    variant={ButtonVariant::Secondary}
                    block={true}
                >
                    {"💾 Save Window Tabs"}
                </Button>
                <Button
                    onclick={on_export(ExportScope::AllWindows)}
                    disabled={is_busy}
                    variant={ButtonVariant::Secondary}
                    block={true}
                >
                    {"💾 Save All Tabs"}
                </Button>

                <Switch
                    checked={mode.is_new_window()}
                    onchange={on_toggle}
                    label={"Open in new window"}
                    disabled={is_busy}
                />

                <input
                    ref={file_input}
                    type="file"
                    accept=".json,application/json"
                    onchange={on_file_selected}
                    disabled={is_busy}
                    class="file-input"
                />
            </div>

            <p class="footer-popup">
                {"Tab Porter v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn save_tabs(scope: ExportScope) -> Result<String> {
    let (filename, payload) = export_tabs(&ChromeHost, scope, filename_date()).await?;
    trigger_download(&filename, &payload)?;
    Ok(filename)
}

async fn open_tabs(file: &File, mode: PlacementMode) -> Result<usize> {
    let text = read_file_as_text(file).await?;
    import_tabs(&ChromeHost, &text, mode).await
}

fn selected_file(e: &Event) -> Option<File> {
    e.target_dyn_into::<HtmlInputElement>()?.files()?.get(0)
}

/// Local year, UTC month and day
fn filename_date() -> FilenameDate {
    let date = js_sys::Date::new_0();
    FilenameDate::new(
        date.get_full_year() as i32,
        date.get_utc_month() + 1,
        date.get_utc_date(),
    )
}
