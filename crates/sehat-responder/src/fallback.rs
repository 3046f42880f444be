//! Canned fallback answers.
//!
//! When no remote provider is configured, or every configured one failed,
//! the assistant still answers from these tables. Answers are keyword-keyed
//! per condition, written in all three supported languages, and always end
//! with the consult-a-doctor disclaimer. The first matching condition wins,
//! so order entries from specific to general.

use sehat_core::{BotReply, Language};

use crate::screen::is_greeting;

// ─────────────────────────────────────────────
// Condition table
// ─────────────────────────────────────────────

/// One canned answer, keyed by trigger keywords, in all three languages.
struct ConditionAnswer {
    keywords: &'static [&'static str],
    hindi: &'static str,
    english: &'static str,
    hinglish: &'static str,
}

impl ConditionAnswer {
    fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|kw| query.contains(kw))
    }

    fn text(&self, language: Language) -> &'static str {
        match language {
            Language::Hindi => self.hindi,
            Language::English => self.english,
            Language::Hinglish => self.hinglish,
        }
    }
}

static CONDITIONS: &[ConditionAnswer] = &[
    ConditionAnswer {
        keywords: &["बुखार", "ज्वर", "bukhar", "fever"],
        hindi: "बुखार में आराम करें और खूब पानी पिएं। पैरासिटामोल ले सकते हैं। अगर बुखार 3 दिन से ज्यादा रहे या बहुत तेज हो, तो तुरंत डॉक्टर को दिखाएं।",
        english: "For fever, rest and drink plenty of water. You may take paracetamol. If the fever lasts more than 3 days or is very high, see a doctor immediately.",
        hinglish: "Fever mein aaram karein aur khoob paani piyein. Paracetamol le sakte hain. Agar bukhar 3 din se zyada rahe ya bahut tez ho, to turant doctor ko dikhayein.",
    },
    ConditionAnswer {
        keywords: &["दस्त", "diarrhea", "diarrhoea", "loose motion"],
        hindi: "दस्त में ORS का घोल बार-बार पिएं और हल्का खाना खाएं। अगर दस्त में खून आए या बहुत कमजोरी हो, तो तुरंत डॉक्टर के पास जाएं।",
        english: "For diarrhea, drink ORS solution frequently and eat light food. If there is blood in the stool or severe weakness, go to a doctor immediately.",
        hinglish: "Dast mein ORS ka ghol baar-baar piyein aur halka khana khayein. Agar dast mein khoon aaye ya bahut kamzori ho, to turant doctor ke paas jayein.",
    },
    ConditionAnswer {
        keywords: &["खांसी", "खाँसी", "सर्दी", "जुकाम", "khansi", "cough", "cold"],
        hindi: "खांसी-जुकाम में गर्म पानी पिएं, भाप लें और शहद-अदरक का सेवन करें। अगर 2 हफ्ते से ज्यादा खांसी रहे, तो डॉक्टर से जांच कराएं।",
        english: "For cough and cold, drink warm water, take steam, and have honey with ginger. If the cough lasts more than 2 weeks, get checked by a doctor.",
        hinglish: "Khansi-zukaam mein garam paani piyein, bhaap lein aur shahad-adrak ka sevan karein. Agar 2 hafte se zyada khansi rahe, to doctor se jaanch karayein.",
    },
    ConditionAnswer {
        keywords: &["मधुमेह", "शुगर", "diabetes", "shugar", "sugar"],
        hindi: "मधुमेह में मीठा कम खाएं, रोज टहलें और समय पर दवा लें। नियमित रूप से शुगर की जांच कराते रहें और डॉक्टर की सलाह मानें।",
        english: "For diabetes, eat less sugar, walk daily, and take your medicines on time. Get your blood sugar checked regularly and follow your doctor's advice.",
        hinglish: "Diabetes mein meetha kam khayein, roz tahlein aur samay par dawa lein. Niyamit roop se sugar ki jaanch karate rahein aur doctor ki salah maanein.",
    },
    ConditionAnswer {
        keywords: &["गर्भ", "garbh", "pregnan"],
        hindi: "गर्भावस्था में पौष्टिक खाना खाएं, आयरन की गोली लें और नियमित जांच के लिए आंगनवाड़ी या स्वास्थ्य केंद्र जाएं। भारी काम से बचें।",
        english: "During pregnancy, eat nutritious food, take iron tablets, and visit the anganwadi or health centre for regular checkups. Avoid heavy work.",
        hinglish: "Pregnancy mein paushtik khana khayein, iron ki goli lein aur niyamit jaanch ke liye anganwadi ya health centre jayein. Bhari kaam se bachein.",
    },
    ConditionAnswer {
        keywords: &["टीका", "टीकाकरण", "tika", "vaccin"],
        hindi: "बच्चों का टीकाकरण समय पर कराना बहुत जरूरी है। नजदीकी स्वास्थ्य केंद्र या आंगनवाड़ी में टीके मुफ्त लगते हैं। टीकाकरण कार्ड संभाल कर रखें।",
        english: "Timely vaccination for children is very important. Vaccines are free at your nearest health centre or anganwadi. Keep the vaccination card safe.",
        hinglish: "Bachchon ka tikakaran samay par karana bahut zaroori hai. Nazdeeki health centre ya anganwadi mein tike muft lagte hain. Vaccination card sambhal kar rakhein.",
    },
    ConditionAnswer {
        keywords: &["सिरदर्द", "headache", "sar dard"],
        hindi: "सिरदर्द में आराम करें, पानी पिएं और आंखों को आराम दें। अगर सिरदर्द बार-बार हो या बहुत तेज हो, तो डॉक्टर से जांच कराएं।",
        english: "For headache, rest, drink water, and give your eyes a break. If headaches are frequent or severe, get checked by a doctor.",
        hinglish: "Headache mein aaram karein, paani piyein aur aankhon ko aaram dein. Agar sar dard baar-baar ho ya bahut tez ho, to doctor se jaanch karayein.",
    },
    ConditionAnswer {
        keywords: &["रक्तचाप", "blood pressure", "bp high", "high bp"],
        hindi: "रक्तचाप में नमक कम खाएं, तनाव से बचें और रोज हल्का व्यायाम करें। दवा बिना डॉक्टर की सलाह के बंद न करें और नियमित जांच कराएं।",
        english: "For blood pressure, eat less salt, avoid stress, and do light exercise daily. Do not stop medicines without a doctor's advice and get checked regularly.",
        hinglish: "Blood pressure mein namak kam khayein, tanav se bachein aur roz halka vyayam karein. Dawa bina doctor ki salah ke band na karein aur niyamit jaanch karayein.",
    },
];

// ─────────────────────────────────────────────
// Disclaimers, welcomes, defaults
// ─────────────────────────────────────────────

fn disclaimer(language: Language) -> &'static str {
    match language {
        Language::Hindi => "गंभीर समस्याओं के लिए डॉक्टर से सलाह लें।",
        Language::English => "For serious problems, please consult a doctor.",
        Language::Hinglish => "Gambhir samasyaon ke liye doctor se salah lein.",
    }
}

/// Greeting response, per language.
pub fn welcome_message(language: Language) -> &'static str {
    match language {
        Language::Hindi => "नमस्ते! मैं आपका स्वास्थ्य सहायक हूँ। आप मुझसे बुखार, खांसी, दवा, टीकाकरण जैसी स्वास्थ्य संबंधी बातें पूछ सकते हैं।",
        Language::English => "Hello! I am your health assistant. You can ask me about health topics like fever, cough, medicines, and vaccination.",
        Language::Hinglish => "Namaste! Main aapka health assistant hoon. Aap mujhse bukhar, khansi, dawa, tikakaran jaisi health se judi baatein pooch sakte hain.",
    }
}

fn default_message(language: Language) -> &'static str {
    match language {
        Language::Hindi => "मैं आपकी बात पूरी तरह समझ नहीं पाया। कृपया अपनी समस्या थोड़ा और बताएं, जैसे बुखार, खांसी, दर्द या दवा के बारे में।",
        Language::English => "I could not fully understand your question. Please tell me a bit more about your problem, for example fever, cough, pain, or medicines.",
        Language::Hinglish => "Main aapki baat poori tarah samajh nahi paya. Kripya apni samasya thoda aur batayein, jaise bukhar, khansi, dard ya dawa ke baare mein.",
    }
}

// ─────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────

/// Produce a canned reply for `query` in `language`.
///
/// Always succeeds; this is the last stage of the answer pipeline and the
/// reason the router never returns an error to the caller.
pub fn fallback_reply(query: &str, language: Language) -> BotReply {
    if is_greeting(query) {
        return BotReply::from_fallback(welcome_message(language), language);
    }

    let lower = query.to_lowercase();
    for condition in CONDITIONS {
        if condition.matches(&lower) {
            let message = format!("{} {}", condition.text(language), disclaimer(language));
            return BotReply::from_fallback(message, language);
        }
    }

    BotReply::from_fallback(default_message(language), language)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
