use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_VISIBLE_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast--success",
            ToastLevel::Warning => "toast toast--warning",
            ToastLevel::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    level: ToastLevel,
    text: String,
    // dismissal ticket; a newer toast keeps its own timer from clearing it
    seq: u64,
}

/// Transient notification service, provided once in app context.
#[derive(Clone, Copy)]
pub struct ToastService {
    current: RwSignal<Option<Toast>>,
    seq: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            seq: RwSignal::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastLevel::Success, text.into());
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.show(ToastLevel::Warning, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastLevel::Error, text.into());
    }

    /// Show a toast and schedule its auto-dismiss. Showing another toast
    /// before the timeout replaces the current one and restarts the clock.
    pub fn show(&self, level: ToastLevel, text: String) {
        let seq = self.seq.get_untracked() + 1;
        self.seq.set(seq);
        self.current.set(Some(Toast { level, text, seq }));

        let current = self.current;
        let latest = self.seq;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_VISIBLE_MS).await;
            if latest.get_untracked() == seq {
                current.set(None);
            }
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

/// Renders the active toast, if any. Mounted once in the shell.
#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_toast();

    view! {
        {move || {
            service.current.get().map(|toast| {
                view! {
                    <div class=toast.level.class()>{toast.text.clone()}</div>
                }
            })
        }}
    }
}
