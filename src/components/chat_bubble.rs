use yew::prelude::*;

use crate::assistant::Sender;
use crate::util::format_clock;

#[derive(Properties, PartialEq, Clone)]
pub struct ChatBubbleProps {
    pub sender: Sender,
    pub text: AttrValue,
    pub timestamp: f64,
}

#[function_component(ChatBubble)]
pub fn chat_bubble(props: &ChatBubbleProps) -> Html {
    let mine = props.sender == Sender::User;
    let (align, bubble) = if mine {
        (
            "margin-left:auto; text-align:right;",
            "background:rgba(139,92,246,0.2); border-bottom-right-radius:0;",
        )
    } else {
        (
            "margin-right:auto; text-align:left;",
            "background:rgba(236,72,153,0.2); border-bottom-left-radius:0;",
        )
    };
    html! {
        <div style={format!("max-width:75%; margin-bottom:14px; {}", align)}>
            <div style={format!("padding:10px 12px; border-radius:8px; color:#fff; text-align:left; {}", bubble)}>
                { props.text.clone() }
            </div>
            <div style="font-size:11px; color:#9ca3af; margin-top:4px;">{ format_clock(props.timestamp) }</div>
        </div>
    }
}
