use maud::{Markup, Render, html};

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn render_nav() -> Markup {
    html! {
        nav class="w-full bg-gray-800 shadow-md mb-8" {
            div class="container mx-auto flex flex-row items-center justify-between py-3 px-4" {
                a href="/" class="text-xl font-bold" {"Rollbook"}
                a href="/students" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Students"}
            }
        }
    }
}

pub fn form_element(id: &str, label: &str, error: Option<&str>, inner: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (inner)
            @if let Some(error) = error {
                p class="text-red-400 text-sm mt-1" {(error)}
            }
        }
    }
}

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    input_type: Option<&str>,
    value: &str,
    error: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        error,
        html! {
            input required[required] type=(input_type.unwrap_or("text")) id=(id) name=(id) value=(value) class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        },
    )
}

/// Fire-and-forget feedback for the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Renders a toast into the `#notifications` region via an out-of-band swap.
pub fn toast(notification: &Notification) -> Markup {
    let colours = match notification.severity {
        Severity::Success => "bg-green-100 border-green-400 text-green-800",
        Severity::Error => "bg-red-100 border-red-400 text-red-800",
    };

    html! {
        div hx-swap-oob="beforeend:#notifications" {
            div class={"border px-4 py-3 rounded shadow-md " (colours)} role="alert" {
                strong class="font-bold block" {(notification.title)}
                span class="text-sm" {(notification.description)}
            }
        }
    }
}
