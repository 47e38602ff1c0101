#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::widget_core::Sender;

#[derive(PartialEq, Props)]
pub struct ContentProps {
    sender: Sender,
    content: String,
}

pub fn ChatMessage(cx: Scope<ContentProps>) -> Element {
    let (entry, bubble) = match cx.props.sender {
        Sender::User => ("chat-entry user-entry", "chat-message user-message"),
        Sender::Bot => ("chat-entry bot-entry", "chat-message bot-message"),
    };
    let label = cx.props.sender.label();
    cx.render(rsx!(
        div {
            class: "{entry}",
            span { class: "sender-label", "{label}" }
            div {
                class: "{bubble}",
                "{cx.props.content}"
            }
        }
    ))
}

#[derive(PartialEq, Props)]
pub struct EmptyStateProps {
    prompt: String,
}

/// Shown instead of the list until the first user message.
pub fn EmptyState(cx: Scope<EmptyStateProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "empty-state",
            div { class: "empty-icon", "🤖" }
            p { "{cx.props.prompt}" }
        }
    ))
}

#[derive(Props)]
pub struct LauncherProps<'a> {
    on_toggle: EventHandler<'a, Event<MouseData>>,
}

pub fn Launcher<'a>(cx: Scope<'a, LauncherProps<'a>>) -> Element<'a> {
    cx.render(rsx!(
        button {
            id: "chat-launcher",
            onclick: move |evt| cx.props.on_toggle.call(evt),
            "💬"
        }
    ))
}

#[derive(Props)]
pub struct HeaderProps<'a> {
    title: String,
    on_close: EventHandler<'a, Event<MouseData>>,
}

pub fn PanelHeader<'a>(cx: Scope<'a, HeaderProps<'a>>) -> Element<'a> {
    cx.render(rsx!(
        div {
            class: "panel-header",
            span { class: "panel-title", "{cx.props.title}" }
            button {
                class: "close-button",
                "aria-label": "Close chat",
                onclick: move |evt| cx.props.on_close.call(evt),
                "×"
            }
        }
    ))
}

#[derive(Props)]
pub struct DraftProps<'a> {
    draft: String,
    placeholder: String,
    on_input: EventHandler<'a, Event<FormData>>,
    on_key: EventHandler<'a, Event<KeyboardData>>,
    on_send: EventHandler<'a, Event<MouseData>>,
}

pub fn UserInput<'a>(cx: Scope<'a, DraftProps<'a>>) -> Element<'a> {
    cx.render(rsx!(
        div {
            id: "input-area",
            input {
                id: "user-input",
                r#type: "text",
                placeholder: "{cx.props.placeholder}",
                value: "{cx.props.draft}",
                oninput: move |evt| cx.props.on_input.call(evt),
                onkeydown: move |evt| cx.props.on_key.call(evt),
            }
            button {
                id: "send-button",
                onclick: move |evt| cx.props.on_send.call(evt),
                "Send"
            }
        }
    ))
}
