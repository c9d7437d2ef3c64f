//! Ordered keyword rules with canned replies. The first matching rule wins,
//! so broader topics must come after the specific ones they would shadow.

use anyhow::{Context, Result};
use regex::Regex;

use crate::util::cwarn;

pub const PROJECTS_REPLY: &str = "Dhananjay has worked on several exciting projects, including game development in Roblox and Unity, as well as electronics engineering projects like a Line Follower Robot. You can check them out in the Projects section!";
pub const EDUCATION_REPLY: &str = "Dhananjay is currently in his 4th year of Electronics and Communication Engineering at GITA Autonomous College, Bhubaneswar. He completed his +2 from Vikash Group of Institute, Bargarh, and his 10th from Kendriya Vidyalaya, Barmer.";
pub const SKILLS_REPLY: &str = "Dhananjay specializes in Game Development and Electronics Engineering. He has expertise in Roblox, Unity, and various electronics projects.";
pub const RESUME_REPLY: &str = "You can view and download Dhananjay's resume in the Resume section of this portfolio.";
pub const CONTACT_REPLY: &str = "You can get in touch with Dhananjay through the Contact section. I'll make sure he receives your message promptly!";
pub const GREETING_REPLY: &str = "Hello! I'm LYRA, Dhananjay's AI assistant. How can I help you navigate his portfolio today?";
pub const SELF_REPLY: &str = "I'm LYRA, an AI assistant created to help visitors navigate Dhananjay's portfolio. I can answer questions about his projects, skills, education, and more!";

pub const DEFAULT_RULES: &[(&str, &str)] = &[
    (r"project|work", PROJECTS_REPLY),
    (r"education|study|college", EDUCATION_REPLY),
    (r"skill|experience", SKILLS_REPLY),
    (r"resume|\bcv\b", RESUME_REPLY),
    (r"contact|hire|email", CONTACT_REPLY),
    (r"\b(hello|hi|hey)\b", GREETING_REPLY),
    (r"who are you|about you", SELF_REPLY),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Canned(String),
    /// No rule matched; the caller must take the fallback path.
    Fallback,
}

#[derive(Clone, Debug)]
pub struct Rule {
    pattern: Regex,
    reply: String,
}

#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn compile(pattern: &str, reply: &str) -> Result<Rule> {
    let pattern = Regex::new(pattern).with_context(|| format!("invalid rule pattern {pattern:?}"))?;
    Ok(Rule {
        pattern,
        reply: reply.to_string(),
    })
}

impl RuleSet {
    /// Compiles `table` in order. Invalid patterns are dropped with a warning.
    pub fn from_table(table: &[(&str, &str)]) -> Self {
        let rules = table
            .iter()
            .filter_map(|(pattern, reply)| match compile(pattern, reply) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    cwarn(&format!("skipping rule: {e:#}"));
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn answer(&self, text: &str) -> Answer {
        let text = normalize(text);
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(&text))
            .map(|r| Answer::Canned(r.reply.clone()))
            .unwrap_or(Answer::Fallback)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_table(DEFAULT_RULES)
    }
}
