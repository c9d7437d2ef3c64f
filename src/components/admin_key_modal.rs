use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminKeyModalProps {
    pub show: bool,
    /// Masked form of the stored key, if any.
    pub current: Option<String>,
    pub on_save: Callback<String>,
    pub on_clear: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn AdminKeyModal(props: &AdminKeyModalProps) -> Html {
    let draft = use_state(String::new);
    if !props.show {
        return html! {};
    }

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };
    let save_cb = {
        let cb = props.on_save.clone();
        let draft = draft.clone();
        Callback::from(move |_| {
            cb.emit((*draft).clone());
            draft.set(String::new());
        })
    };
    let clear_cb = {
        let cb = props.on_clear.clone();
        let draft = draft.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if !win
                    .confirm_with_message("Remove the stored API key? LYRA will use local answers only.")
                    .unwrap_or(false)
                {
                    return;
                }
            }
            draft.set(String::new());
            cb.emit(());
        })
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let status = match &props.current {
        Some(masked) => format!("Stored key: {masked}"),
        None => "No key stored. LYRA answers from local replies only.".to_string(),
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:60; border-radius:8px;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:14px 16px; width:90%; display:flex; flex-direction:column; gap:12px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:16px;">{"Assistant API key"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="font-size:12px; opacity:0.8;">{ status }</div>
            <input type="password" placeholder="sk-..." value={(*draft).clone()} {oninput}
                style="padding:6px 8px; background:#0e1116; color:#fff; border:1px solid #30363d; border-radius:6px;" />
            <div style="display:flex; gap:8px;">
                <button onclick={save_cb} disabled={draft.trim().is_empty()} style="flex:1;">{"Save"}</button>
                <button onclick={clear_cb} disabled={props.current.is_none()} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Clear"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"The key stays in this browser's local storage and is only sent to the completion endpoint."}</div>
        </div>
    </div>}
}
