use regex::Regex;

use super::rules::normalize;
use crate::board::rng::RandomSource;
use crate::util::cwarn;

pub const GENERIC_REPLIES: &[&str] = &[
    "I'm here to help you learn more about Dhananjay and his work. Feel free to ask about his projects, education, skills, or how to contact him!",
    "That's a great question! I'm best at answering things about Dhananjay's projects, skills, education and resume.",
    "I'm not sure I understood that. Try asking about his projects, his experience, or how to get in touch.",
    "Hmm, I don't have an answer for that yet. You can explore the About, Projects and Resume sections for more details.",
];

const CUES: &[(&str, &str)] = &[
    (
        r"\b(who|what)\b",
        "Dhananjay is an Electronics and Communication Engineering student who builds games and electronics projects. The About section has the full story.",
    ),
    (
        r"project",
        "Head over to the Projects section to see his game development and electronics work.",
    ),
    (
        r"contact",
        "The Contact section has a form and his details. I'll make sure your message reaches him.",
    ),
    (
        r"\b(how|why)\b",
        "I can only answer questions about this portfolio: Dhananjay's projects, skills, education and how to reach him.",
    ),
];

/// Local reply path used when no rule matched and the remote model is
/// unavailable or failed.
#[derive(Clone, Debug)]
pub struct LocalFallback {
    cues: Vec<(Regex, String)>,
    generic: Vec<String>,
}

impl LocalFallback {
    pub fn new(generic: &[String]) -> Self {
        let cues = CUES
            .iter()
            .filter_map(|(p, reply)| match Regex::new(p) {
                Ok(re) => Some((re, (*reply).to_string())),
                Err(e) => {
                    cwarn(&format!("skipping cue {p:?}: {e}"));
                    None
                }
            })
            .collect();
        let generic: Vec<String> = generic
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let generic = if generic.is_empty() {
            GENERIC_REPLIES.iter().map(|s| s.to_string()).collect()
        } else {
            generic
        };
        Self { cues, generic }
    }

    /// Heuristic reply keyed on coarse cues, else a uniformly chosen generic one.
    pub fn reply<R: RandomSource + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let text = normalize(text);
        if let Some((_, reply)) = self.cues.iter().find(|(re, _)| re.is_match(&text)) {
            return reply.clone();
        }
        self.generic[rng.index(self.generic.len())].clone()
    }
}

impl Default for LocalFallback {
    fn default() -> Self {
        Self::new(&[])
    }
}
