/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

/// What the popup is currently doing
#[derive(Clone, PartialEq)]
pub enum Status {
    Idle,
    Busy(String),
    Done(String),
    Error(String),
}

impl Status {
    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Busy(_))
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub status: Status,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    match &props.status {
        Status::Busy(msg) => html! {
            <div class="loading-text-center">
                <Spinner />
                <p class="loading-text">{msg}</p>
            </div>
        },
        Status::Done(msg) => html! {
            <div class="message-top-margin">
                <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                </Alert>
            </div>
        },
        Status::Error(err) => html! {
            <div class="message-top-margin">
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err.clone()}
                </Alert>
            </div>
        },
        Status::Idle => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_busy_blocks_actions() {
        assert!(Status::Busy("Saving tabs...".to_string()).is_busy());
        assert!(!Status::Idle.is_busy());
        assert!(!Status::Done("ok".to_string()).is_busy());
        assert!(!Status::Error("boom".to_string()).is_busy());
    }
}
