use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

static GREETING_REPLY: &str = "Hello there! 👋";
static HELP_REPLY: &str = "Sure! I'm here to assist you. What do you need help with?";
static WEATHER_REPLY: &str =
    "I can't check the weather yet, but I'd recommend bringing an umbrella just in case! ☔";

pub static FALLBACK_REPLIES: [&str; 5] = [
    "I'm just a mock bot, but I'm here to help!",
    "Interesting... Tell me more.",
    "Can you explain that a bit further?",
    "I'm not sure I understand. Could you rephrase?",
    "That's cool! Anything else you'd like to ask?",
];

// Checked top to bottom on the lowercased text, first hit wins.
// Plain substring match: "hi" also fires inside "this".
static RULES: [(&[&str], &str); 3] = [
    (&["hello", "hi"], GREETING_REPLY),
    (&["help"], HELP_REPLY),
    (&["weather"], WEATHER_REPLY),
];

/// Canned reply generator standing in for a real model.
pub struct ReplySelector {
    rng: Box<dyn RngCore>,
}

impl ReplySelector {
    pub fn new() -> ReplySelector {
        ReplySelector::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> ReplySelector {
        ReplySelector::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + 'static) -> ReplySelector {
        ReplySelector { rng: Box::new(rng) }
    }

    pub fn select(&mut self, user_text: &str) -> String {
        keyword_reply(user_text)
            .unwrap_or_else(|| {
                FALLBACK_REPLIES
                    .choose(&mut *self.rng)
                    .copied()
                    .unwrap_or(FALLBACK_REPLIES[0])
            })
            .to_string()
    }
}

impl Default for ReplySelector {
    fn default() -> Self {
        Self::new()
    }
}

/// The deterministic part of [`ReplySelector::select`].
pub fn keyword_reply(user_text: &str) -> Option<&'static str> {
    let lower = user_text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, reply)| *reply)
}
