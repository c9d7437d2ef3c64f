use std::rc::Rc;

use super::{assistant_widget::AssistantWidget, circuit_background::CircuitBackground};
use crate::config::AppConfig;
use crate::util::cwarn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Projects,
    Resume,
    Contact,
    NotFound,
}

impl Page {
    pub const NAV: [Page; 5] = [Page::Home, Page::About, Page::Projects, Page::Resume, Page::Contact];

    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Page::Home,
            "/about" => Page::About,
            "/projects" => Page::Projects,
            "/resume" => Page::Resume,
            "/contact" => Page::Contact,
            _ => Page::NotFound,
        }
    }

    /// Canonical path; `NotFound` has none of its own.
    pub fn path(self) -> Option<&'static str> {
        match self {
            Page::Home => Some("/"),
            Page::About => Some("/about"),
            Page::Projects => Some("/projects"),
            Page::Resume => Some("/resume"),
            Page::Contact => Some("/contact"),
            Page::NotFound => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Projects => "Projects",
            Page::Resume => "Resume",
            Page::Contact => "Contact",
            Page::NotFound => "404",
        }
    }

    /// What LYRA says when she appears on this page.
    pub fn greeting(self) -> &'static str {
        match self {
            Page::Home => super::assistant_widget::DEFAULT_GREETING,
            Page::About => "This is Dhananjay's About section. Would you like to know more about his education or skills? Feel free to ask me anything!",
            Page::Projects => "Here are Dhananjay's projects! Feel free to ask me about any specific project or technology he has worked with.",
            Page::Resume => "This is Dhananjay's resume section! You can explore his education, skills, certifications, and experience.",
            Page::Contact => "This is the contact section. Feel free to send Dhananjay a message, and I'll make sure he receives it promptly!",
            Page::NotFound => "Oops! It seems like you've reached a page that doesn't exist. Let me help you navigate back to the main sections of Dhananjay's portfolio.",
        }
    }

    fn headline(self) -> &'static str {
        match self {
            Page::Home => "Hello, I'm Dhananjay Kumar Seth",
            Page::About => "About Me",
            Page::Projects => "Projects",
            Page::Resume => "Resume",
            Page::Contact => "Get in Touch",
            Page::NotFound => "404: Page not found",
        }
    }
}

fn initial_page() -> Page {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Page::from_path(&p))
        .unwrap_or(Page::Home)
}

fn push_path(page: Page) {
    let (Some(path), Some(window)) = (page.path(), web_sys::window()) else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
        cwarn(&format!("nav: push_state failed: {e:?}"));
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::load());
    let page = use_state(initial_page);

    // Back/forward buttons
    {
        let page = page.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let Some(window) = web_sys::window() else {
                return Box::new(|| ());
            };
            let on_pop = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                page.set(initial_page());
            }) as Box<dyn FnMut(_)>);
            let _ = window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref());
            Box::new(move || {
                let _ = window.remove_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref());
            })
        });
    }

    let board = Rc::new(config.board.clone());
    let assistant = Rc::new(config.assistant.clone());

    let nav = Page::NAV.iter().map(|&p| {
        let page = page.clone();
        let active = *page == p;
        let onclick = Callback::from(move |_| {
            if *page != p {
                push_path(p);
                page.set(p);
            }
        });
        html! {
            <button {onclick} style={format!("background:none; border:none; cursor:pointer; font-size:14px; color:{};", if active { "#a78bfa" } else { "#d1d5db" })}>
                { p.label() }
            </button>
        }
    });

    html! {
        <div style="display:flex; flex-direction:column; min-height:100vh; background:#0b1020; color:#e5e7eb; font-family:system-ui, sans-serif;">
            <CircuitBackground config={board} show_glyphs={*page == Page::NotFound} />
            <nav id="top-bar" style="position:relative; z-index:10; display:flex; gap:16px; padding:16px 24px; border-bottom:1px solid rgba(139,92,246,0.2);">
                <span style="font-weight:700; margin-right:auto; color:#8b5cf6;">{"DKS"}</span>
                { for nav }
            </nav>
            <main style="position:relative; z-index:1; flex-grow:1; display:flex; align-items:center; justify-content:center; padding:48px 24px;">
                <h1 style="font-size:40px; margin:0;">{ page.headline() }</h1>
            </main>
            <footer style="position:relative; z-index:1; padding:16px 24px; font-size:12px; opacity:0.6; text-align:center;">
                {"© Dhananjay Kumar Seth"}
            </footer>
            <AssistantWidget key={page.label()} greeting={page.greeting()} config={assistant} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_map_to_pages() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/projects/"), Page::Projects);
        assert_eq!(Page::from_path("/contact"), Page::Contact);
        assert_eq!(Page::from_path("/nope"), Page::NotFound);
    }

    #[test]
    fn nav_paths_round_trip() {
        for p in Page::NAV {
            let path = p.path().unwrap();
            assert_eq!(Page::from_path(path), p);
        }
        assert_eq!(Page::NotFound.path(), None);
    }

    #[test]
    fn every_page_greets() {
        for p in Page::NAV.iter().copied().chain([Page::NotFound]) {
            assert!(!p.greeting().is_empty());
        }
    }
}
