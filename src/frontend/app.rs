#![allow(non_snake_case)]

use dioxus::prelude::*;
use tokio::sync::mpsc;

use super::components::*;
use crate::config::WidgetConfig;
use crate::widget_core::{ChatWidget, ConversationState, PanelMode, PendingReply};

const REPLY_QUEUE: usize = 32;

pub fn app(cx: Scope) -> Element {
    let config: &WidgetConfig = cx.use_hook(WidgetConfig::default);
    let channel = cx.use_hook(|| {
        let (tx, rx) = mpsc::channel::<PendingReply>(REPLY_QUEUE);
        (tx, Some(rx))
    });
    let rx = channel.1.take();
    let tx = &channel.0;

    // The widget drives re-renders itself through its observer, so every
    // mutation below goes through `write_silent`.
    let widget = use_ref(cx, || {
        let mut widget = ChatWidget::new(config, tx.clone());
        let update = cx.schedule_update();
        widget.subscribe(move |state, change| {
            tracing::trace!(?change, messages = state.messages.len(), "widget changed");
            update();
        });
        widget
    });

    use_future(cx, (), move |_| {
        to_owned![widget];
        async move {
            let Some(mut rx) = rx else { return };
            while let Some(reply) = rx.recv().await {
                widget.write_silent().deliver(reply);
            }
        }
    });

    let (state, panel_mode, scroll_seq) = widget.with(|widget| {
        let conversation = widget.conversation();
        (
            conversation.state().clone(),
            conversation.panel_mode(),
            conversation.scroll_seq(),
        )
    });

    cx.render(rsx!(
        style { include_str!("./style.css") }
        WidgetView {
            state: state,
            panel_mode: panel_mode,
            scroll_seq: scroll_seq,
            config: config,
            on_toggle: move |_| widget.write_silent().toggle(),
            on_input: move |evt: Event<FormData>| {
                widget.write_silent().update_draft(evt.value.clone())
            },
            on_key: move |evt: Event<KeyboardData>| {
                widget.write_silent().on_key_event(&evt.data.key().to_string());
            },
            on_send: move |_| {
                widget.write_silent().submit();
            },
        }
    ))
}

#[derive(Props)]
pub struct WidgetViewProps<'a> {
    state: ConversationState,
    panel_mode: PanelMode,
    scroll_seq: u64,
    config: &'a WidgetConfig,
    on_toggle: EventHandler<'a, Event<MouseData>>,
    on_input: EventHandler<'a, Event<FormData>>,
    on_key: EventHandler<'a, Event<KeyboardData>>,
    on_send: EventHandler<'a, Event<MouseData>>,
}

/// Launcher plus, while open, the panel. Renders from a snapshot of the
/// conversation and reports every DOM event back through the handlers.
pub fn WidgetView<'a>(cx: Scope<'a, WidgetViewProps<'a>>) -> Element<'a> {
    let state = &cx.props.state;
    let config = cx.props.config;
    let scroll_seq = cx.props.scroll_seq;

    cx.render(rsx!(
        div {
            id: "chat-widget",
            Launcher { on_toggle: move |evt| cx.props.on_toggle.call(evt) }
            if state.is_open {
                rsx!(div {
                    class: "chat-panel",
                    PanelHeader {
                        title: config.title.clone(),
                        on_close: move |evt| cx.props.on_toggle.call(evt),
                    }
                    match cx.props.panel_mode {
                        PanelMode::Empty => rsx!(EmptyState { prompt: config.empty_prompt.clone() }),
                        PanelMode::List => rsx!(div {
                            id: "message-list",
                            "data-scroll-seq": "{scroll_seq}",
                            for (i, msg) in state.messages.iter().enumerate() {
                                ChatMessage {
                                    key: "{i}",
                                    sender: msg.sender,
                                    content: msg.text.clone(),
                                }
                            }
                        }),
                    }
                    UserInput {
                        draft: state.draft.clone(),
                        placeholder: config.placeholder.clone(),
                        on_input: move |evt| cx.props.on_input.call(evt),
                        on_key: move |evt| cx.props.on_key.call(evt),
                        on_send: move |evt| cx.props.on_send.call(evt),
                    }
                })
            }
        }
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget_core::{Conversation, ReplySelector};

    struct Fixture {
        conversation: Conversation,
        config: WidgetConfig,
    }

    fn fixture_root(cx: Scope<Fixture>) -> Element {
        let conversation = &cx.props.conversation;
        cx.render(rsx!(WidgetView {
            state: conversation.state().clone(),
            panel_mode: conversation.panel_mode(),
            scroll_seq: conversation.scroll_seq(),
            config: &cx.props.config,
            on_toggle: move |_| {},
            on_input: move |_| {},
            on_key: move |_| {},
            on_send: move |_| {},
        }))
    }

    fn render(conversation: Conversation) -> String {
        let config = WidgetConfig::default();
        let mut dom = VirtualDom::new_with_props(fixture_root, Fixture { conversation, config });
        let _ = dom.rebuild();
        dioxus_ssr::render(&dom)
    }

    fn conversation() -> Conversation {
        Conversation::with_selector(WidgetConfig::default().greeting, ReplySelector::with_seed(5))
    }

    #[test]
    fn test_closed_shows_only_launcher() {
        let html = render(conversation());
        assert!(html.contains("chat-launcher"));
        assert!(!html.contains("chat-panel"));
        assert!(!html.contains("empty-state"));
        assert!(!html.contains("message-list"));
    }

    #[test]
    fn test_open_with_greeting_shows_empty_state() {
        let mut conv = conversation();
        conv.toggle();
        let html = render(conv);
        assert!(html.contains("chat-panel"));
        assert!(html.contains("empty-state"));
        assert!(html.contains("How can I help you today?"));
        assert!(!html.contains("message-list"));
    }

    #[test]
    fn test_toggled_back_hides_panel() {
        let mut conv = conversation();
        conv.toggle();
        conv.toggle();
        let html = render(conv);
        assert!(!html.contains("chat-panel"));
    }

    #[test]
    fn test_submit_switches_to_list() {
        let mut conv = conversation();
        conv.toggle();
        conv.update_draft("what about weather today");
        conv.submit();
        let html = render(conv);
        assert!(html.contains("message-list"));
        assert!(!html.contains("empty-state"));
        assert!(html.contains("what about weather today"));
        assert!(html.contains("You"));
    }

    #[test]
    fn test_list_stays_after_reply() {
        let mut conv = conversation();
        conv.toggle();
        conv.update_draft("help");
        let text = conv.submit().unwrap();
        conv.on_reply_timer(&text);
        conv.toggle();
        conv.toggle();
        let html = render(conv);
        assert!(html.contains("message-list"));
        assert!(!html.contains("empty-state"));
        assert!(html.contains("What do you need help with?"));
    }
}
