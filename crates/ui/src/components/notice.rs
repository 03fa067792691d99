//! Toast for the current notice

use dioxus::prelude::*;

use crate::state::{Intent, SESSION};

/// How long a notice stays up before dismissing itself
const NOTICE_TIMEOUT_MS: u64 = 3000;

/// Shows the current notice; clicking it or waiting dismisses it
#[component]
pub fn NoticeToast() -> Element {
    let notice = SESSION.read().state().notice.clone();

    // Auto-dismiss, unless a newer notice has replaced this one
    use_effect(use_reactive((&notice,), |(notice,)| {
        if let Some(shown) = notice {
            spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(NOTICE_TIMEOUT_MS)).await;
                let still_current = SESSION.read().state().notice.as_ref() == Some(&shown);
                if still_current {
                    SESSION.write().dispatch(Intent::DismissNotice);
                }
            });
        }
    }));

    let Some(notice) = notice else {
        return rsx! {};
    };

    let level_class = notice.level.css_class();

    rsx! {
        div {
            class: "notice {level_class}",
            role: "status",
            onclick: move |_| SESSION.write().dispatch(Intent::DismissNotice),
            "{notice.text}"
        }
    }
}
