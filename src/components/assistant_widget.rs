use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use web_sys::{Element, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{admin_key_modal::AdminKeyModal, chat_bubble::ChatBubble};
use crate::assistant::{
    Answer, Assistant, BrowserStorage, ChatAction, ChatCompletionClient, Conversation, Credential,
    CredentialStore, LocalFallback, RuleSet,
};
use crate::board::MathRandom;
use crate::config::AssistantConfig;
use crate::util::{clog, mask_secret, now_ms};

pub const DEFAULT_GREETING: &str =
    "Hi, I'm LYRA, your assistant! I'm here to guide you through Dhananjay's portfolio. How can I assist you today?";

const BOUNCE_MS: u32 = 5000;

type LiveAssistant = Assistant<ChatCompletionClient, BrowserStorage>;

#[derive(Properties, PartialEq, Clone)]
pub struct AssistantWidgetProps {
    #[prop_or(AttrValue::Static(DEFAULT_GREETING))]
    pub greeting: AttrValue,
    pub config: Rc<AssistantConfig>,
}

#[function_component(AssistantWidget)]
pub fn assistant_widget(props: &AssistantWidgetProps) -> Html {
    let assistant: Rc<LiveAssistant> = use_memo(props.config.clone(), |cfg| {
        let rules = RuleSet::default();
        clog(&format!("assistant: {} rules loaded", rules.len()));
        Assistant::new(
            rules,
            LocalFallback::new(&cfg.generic_replies),
            ChatCompletionClient::new((**cfg).clone()),
            CredentialStore::new(BrowserStorage),
            Box::new(MathRandom),
        )
    });
    let conversation = {
        let greeting = props.greeting.clone();
        use_reducer(move || Conversation::with_greeting(&greeting, now_ms()))
    };
    let is_open = use_state(|| false);
    let bouncing = use_state(|| true);
    let input = use_state(String::new);
    let show_admin = use_state(|| false);
    let key_version = use_state(|| 0u32);
    let alive = use_mut_ref(|| true);
    let in_flight = use_mut_ref(|| false);
    let end_ref = use_node_ref();

    // Mount: stop bouncing after a while; mark unmount so late replies are dropped
    {
        let bouncing = bouncing.clone();
        let alive = alive.clone();
        use_effect_with((), move |_| {
            *alive.borrow_mut() = true;
            let timer = Timeout::new(BOUNCE_MS, move || bouncing.set(false));
            move || {
                *alive.borrow_mut() = false;
                drop(timer);
            }
        });
    }
    // Keep the newest message in view
    {
        let end_ref = end_ref.clone();
        use_effect_with(conversation.messages().len(), move |_| {
            if let Some(el) = end_ref.cast::<Element>() {
                el.scroll_into_view();
            }
            || ()
        });
    }

    let toggle = {
        let is_open = is_open.clone();
        let bouncing = bouncing.clone();
        Callback::from(move |_| {
            if !*is_open {
                bouncing.set(false);
            }
            is_open.set(!*is_open);
        })
    };
    let oninput = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let el: HtmlInputElement = e.target_unchecked_into();
            input.set(el.value());
        })
    };
    let onsubmit = {
        let input = input.clone();
        let conversation = conversation.clone();
        let assistant = assistant.clone();
        let alive = alive.clone();
        let in_flight = in_flight.clone();
        let delay_ms = props.config.reply_delay_ms;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = (*input).trim().to_string();
            if *in_flight.borrow() || !conversation.accepts(&text) {
                return;
            }
            let ticket = conversation.next_ticket();
            conversation.dispatch(ChatAction::Submit {
                text: text.clone(),
                at: now_ms(),
            });
            input.set(String::new());
            *in_flight.borrow_mut() = true;

            let conversation = conversation.clone();
            let assistant = assistant.clone();
            let alive = alive.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                if matches!(assistant.answer(&text), Answer::Canned(_)) && delay_ms > 0 {
                    TimeoutFuture::new(delay_ms).await;
                }
                let reply = assistant.respond(&text).await;
                *in_flight.borrow_mut() = false;
                if !*alive.borrow() {
                    clog("assistant: widget unmounted, reply discarded");
                    return;
                }
                conversation.dispatch(ChatAction::Resolve {
                    ticket,
                    text: reply,
                    at: now_ms(),
                });
            });
        })
    };

    // Hidden admin control: double-click the header
    let open_admin = {
        let show_admin = show_admin.clone();
        Callback::from(move |_: MouseEvent| show_admin.set(true))
    };
    let close_admin = {
        let show_admin = show_admin.clone();
        Callback::from(move |_| show_admin.set(false))
    };
    let save_key = {
        let assistant = assistant.clone();
        let key_version = key_version.clone();
        Callback::from(move |key: String| {
            assistant.credentials().set(&key);
            key_version.set(*key_version + 1);
        })
    };
    let clear_key = {
        let assistant = assistant.clone();
        let key_version = key_version.clone();
        Callback::from(move |_| {
            assistant.credentials().clear();
            key_version.set(*key_version + 1);
        })
    };
    let current_key = match assistant.credentials().get() {
        Credential::Configured(k) => Some(mask_secret(&k)),
        Credential::Unconfigured => None,
    };

    let awaiting = conversation.is_awaiting();
    let launcher_anim = if *bouncing { " animation:lyra-bounce 1.2s ease-in-out infinite;" } else { "" };
    let window_style = if *is_open {
        "opacity:1; transform:scale(1); pointer-events:auto;"
    } else {
        "opacity:0; transform:scale(0.95); pointer-events:none;"
    };

    html! {
        <>
            <button onclick={toggle}
                aria-label={if *is_open { "Close chat" } else { "Open chat with LYRA" }}
                style={format!("position:fixed; bottom:20px; right:20px; z-index:50; background:#8b5cf6; color:#fff; border:none; border-radius:999px; width:56px; height:56px; font-size:20px; cursor:pointer; box-shadow:0 6px 18px rgba(0,0,0,0.5);{}", launcher_anim)}>
                { if *is_open { "✕" } else { "💬" } }
            </button>
            <div style={format!("position:fixed; bottom:88px; right:20px; width:min(24rem, 90vw); z-index:50; background:#0e1116; border:1px solid rgba(139,92,246,0.3); border-radius:8px; box-shadow:0 10px 30px rgba(139,92,246,0.2); transition:all 0.3s; {}", window_style)}>
                <div ondblclick={open_admin} style="background:#8b5cf6; color:#fff; padding:12px 16px; border-radius:8px 8px 0 0; display:flex; align-items:center; gap:12px; user-select:none;">
                    <div style="width:32px; height:32px; background:#ec4899; border-radius:999px; display:flex; align-items:center; justify-content:center; font-weight:700;">{"L"}</div>
                    <div>
                        <div style="font-weight:700;">{"LYRA"}</div>
                        <div style="font-size:12px; opacity:0.8;">{"AI Assistant"}</div>
                    </div>
                </div>
                <div style="height:20rem; overflow-y:auto; padding:16px; background:rgba(30,41,59,0.3);">
                    { for conversation.messages().iter().map(|m| html! {
                        <ChatBubble key={m.id} sender={m.sender} text={AttrValue::from(m.text.clone())} timestamp={m.timestamp} />
                    }) }
                    if awaiting {
                        <div style="font-size:13px; color:#9ca3af; font-style:italic; margin-bottom:8px;">{"LYRA is thinking…"}</div>
                    }
                    <div ref={end_ref} />
                </div>
                <form {onsubmit} style="padding:12px; border-top:1px solid rgba(139,92,246,0.3); display:flex;">
                    <input type="text" value={(*input).clone()} {oninput} placeholder="Ask LYRA something..."
                        style="flex:1; padding:8px 12px; background:#1e293b; color:#fff; border:1px solid rgba(139,92,246,0.3); border-radius:6px 0 0 6px;" />
                    <button type="submit" disabled={awaiting || input.trim().is_empty()}
                        style="background:#8b5cf6; color:#fff; border:none; padding:8px 16px; border-radius:0 6px 6px 0;">{"Send"}</button>
                </form>
                <AdminKeyModal show={*show_admin} current={current_key} on_save={save_key} on_clear={clear_key} on_close={close_admin} />
            </div>
        </>
    }
}
