//! Topic screen — is this query something a rural-health assistant should
//! answer?
//!
//! Rule order matters and is part of the contract:
//!
//! 1. Off-topic keyword → redirect (checked first, so a query mentioning
//!    both cricket and fever is still redirected).
//! 2. Health/education keyword → accept.
//! 3. Greeting-only text → accept (the responder produces a welcome).
//! 4. Longer than 10 characters with no match → redirect ("ask clearly").
//! 5. Anything else (short, unclassified) → accept.
//!
//! Pure function of the input text; no side effects.

use sehat_core::Screening;

/// Canned redirect for clearly off-topic queries.
pub const OFF_TOPIC_REDIRECT: &str = "मैं केवल स्वास्थ्य और शिक्षा से जुड़े प्रश्नों में मदद कर सकता हूँ। कृपया अपनी सेहत के बारे में पूछें। (I can only help with health and education questions. Please ask about your health.)";

/// Canned redirect for long queries that match nothing.
pub const UNCLEAR_REDIRECT: &str = "कृपया अपना स्वास्थ्य संबंधी प्रश्न स्पष्ट रूप से पूछें, जैसे बुखार, खांसी, या दवा के बारे में। (Please ask your health question clearly, for example about fever, cough, or medicines.)";

/// Queries mentioning any of these are redirected, regardless of what else
/// they mention.
static OFF_TOPIC_KEYWORDS: &[&str] = &[
    "movie", "film", "bollywood", "cinema", "song", "cricket", "football", "sports", "ipl",
    "politics", "election", "minister", "weather", "rain forecast", "stock market", "share market",
    "celebrity", "फिल्म", "सिनेमा", "गाना", "क्रिकेट", "फुटबॉल", "खेल", "राजनीति", "चुनाव",
    "मंत्री", "मौसम", "शेयर बाजार",
];

/// Queries mentioning any of these are accepted as in-scope.
static HEALTH_KEYWORDS: &[&str] = &[
    // English
    "fever", "pain", "ache", "cough", "cold", "diarrhea", "diarrhoea", "vomit", "medicine",
    "doctor", "hospital", "clinic", "health", "pregnan", "vaccin", "diabetes", "sugar",
    "blood pressure", "headache", "injury", "wound", "nutrition", "hygiene",
    // Romanized Hindi
    "bukhar", "dard", "khansi", "dawai", "ilaj", "swasthya", "tika", "garbh", "shugar",
    // Devanagari
    "बुखार", "ज्वर", "दर्द", "खांसी", "खाँसी", "सर्दी", "जुकाम", "दस्त", "उल्टी", "दवा",
    "दवाई", "इलाज", "डॉक्टर", "अस्पताल", "स्वास्थ्य", "सेहत", "गर्भ", "टीका", "टीकाकरण",
    "मधुमेह", "शुगर", "सिरदर्द", "रक्तचाप", "पोषण", "सफाई",
];

/// Greeting-only queries are let through so the assistant can welcome the
/// user. Matched against the whole (trimmed) text, not as substrings.
static GREETINGS: &[&str] = &[
    "hello", "hi", "hey", "namaste", "namaskar", "नमस्ते", "नमस्कार", "हेलो", "राम राम",
];

/// Screen a raw query for topical fit.
pub fn screen(text: &str) -> Screening {
    let lower = text.to_lowercase();

    if contains_any(&lower, OFF_TOPIC_KEYWORDS) {
        return Screening::Redirect(OFF_TOPIC_REDIRECT.to_string());
    }

    if contains_any(&lower, HEALTH_KEYWORDS) {
        return Screening::Accepted;
    }

    if is_greeting(text) {
        return Screening::Accepted;
    }

    if text.trim().chars().count() > 10 {
        return Screening::Redirect(UNCLEAR_REDIRECT.to_string());
    }

    // Short unclassified queries pass through; terse symptom words like
    // "dard" that the tables miss still deserve an answer attempt.
    Screening::Accepted
}

/// Whether the whole text is a greeting (modulo case and trailing
/// punctuation).
pub fn is_greeting(text: &str) -> bool {
    let trimmed = text
        .trim()
        .trim_end_matches(['!', '?', '.', '।'])
        .trim()
        .to_lowercase();
    GREETINGS.iter().any(|g| trimmed == *g)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
