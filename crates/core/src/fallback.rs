//! Canned replies used when the advice service cannot answer.
//!
//! Every block mirrors the layout the hosted model is asked for: a 🩺
//! heading, a few bullet actions and a ⚠️ "see doctor if" line. Each one
//! exists in English and in Tanglish, see [`detect_register`].

use serde::{Deserialize, Serialize};

use crate::language::{Register, detect_register, is_tamil, words};

/// A condition the fallback table has a dedicated reply for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Fever.
    Fever,
    /// Headache.
    Headache,
    /// Common cold or cough.
    ColdCough,
    /// Stomach ache, acidity or general pain.
    Stomach,
    /// Diet and nutrition questions.
    Diet,
    /// Poor sleep or fatigue.
    SleepFatigue,
    /// Stress or anxiety.
    Stress,
    /// General wellness questions.
    Wellness,
}

impl Condition {
    /// The order conditions are matched in.
    pub const MATCH_ORDER: [Condition; 8] = [
        Condition::Fever,
        Condition::Headache,
        Condition::ColdCough,
        Condition::Stomach,
        Condition::Diet,
        Condition::SleepFatigue,
        Condition::Stress,
        Condition::Wellness,
    ];

    /// Returns the lowercase keywords, in English, Tanglish and Tamil,
    /// that select this condition.
    ///
    /// Romanized keywords match whole words, plus a plural "s" or "es".
    /// A trailing `*` marks a stem that matches the start of a word.
    /// Tamil-script keywords match anywhere, since Tamil attaches its
    /// suffixes to the word.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Condition::Fever => {
                &["fever*", "temperature", "kaichal", "காய்ச்சல்"]
            }
            Condition::Headache => &[
                "headache",
                "head ache",
                "migraine",
                "thalai vali",
                "thalaivali",
                "தலைவலி",
                "தலை வலி",
            ],
            Condition::ColdCough => &[
                "cold", "cough*", "sneez*", "sore throat", "sali", "irumal",
                "சளி", "இருமல்",
            ],
            Condition::Stomach => &[
                "stomach",
                "acidity",
                "gastric",
                "indigestion",
                "pain",
                "vayiru",
                "vali",
                "வயிறு",
                "வலி",
            ],
            Condition::Diet => &[
                "diet",
                "nutrition",
                "food",
                "weight",
                "saapadu",
                "சாப்பாடு",
                "உணவு",
            ],
            Condition::SleepFatigue => &[
                "sleep*",
                "insomnia",
                "fatigue*",
                "tired",
                "thookam",
                "thookkam",
                "தூக்கம்",
                "சோர்வு",
            ],
            Condition::Stress => &[
                "stress*",
                "anxiety",
                "anxious",
                "tension",
                "worried",
                "mana azhutham",
                "மன அழுத்தம்",
            ],
            Condition::Wellness => &[
                "wellness",
                "healthy",
                "fitness",
                "exercis*",
                "immunity",
                "arokiyam",
                "ஆரோக்கியம்",
            ],
        }
    }

    /// Finds the first condition mentioned in `text`.
    pub fn detect(text: &str) -> Option<Condition> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = words(&lowered).collect();
        Self::MATCH_ORDER.into_iter().find(|condition| {
            condition
                .keywords()
                .iter()
                .any(|keyword| mentions(&lowered, &words, keyword))
        })
    }

    /// Returns the canned reply for this condition.
    pub fn reply(self, register: Register) -> &'static str {
        match (self, register) {
            (Condition::Fever, Register::English) => FEVER_EN,
            (Condition::Fever, Register::Tanglish) => FEVER_TA,
            (Condition::Headache, Register::English) => HEADACHE_EN,
            (Condition::Headache, Register::Tanglish) => HEADACHE_TA,
            (Condition::ColdCough, Register::English) => COLD_EN,
            (Condition::ColdCough, Register::Tanglish) => COLD_TA,
            (Condition::Stomach, Register::English) => STOMACH_EN,
            (Condition::Stomach, Register::Tanglish) => STOMACH_TA,
            (Condition::Diet, Register::English) => DIET_EN,
            (Condition::Diet, Register::Tanglish) => DIET_TA,
            (Condition::SleepFatigue, Register::English) => SLEEP_EN,
            (Condition::SleepFatigue, Register::Tanglish) => SLEEP_TA,
            (Condition::Stress, Register::English) => STRESS_EN,
            (Condition::Stress, Register::Tanglish) => STRESS_TA,
            (Condition::Wellness, Register::English) => WELLNESS_EN,
            (Condition::Wellness, Register::Tanglish) => WELLNESS_TA,
        }
    }
}

/// Returns the generic reply for messages no condition matches.
#[inline]
pub fn generic_reply(register: Register) -> &'static str {
    match register {
        Register::English => GENERIC_EN,
        Register::Tanglish => GENERIC_TA,
    }
}

fn mentions(lowered: &str, words: &[&str], keyword: &str) -> bool {
    if keyword.chars().any(is_tamil) {
        return lowered.contains(keyword);
    }
    let parts: Vec<&str> = keyword.split(' ').collect();
    words.windows(parts.len()).any(|window| {
        window
            .iter()
            .zip(&parts)
            .all(|(word, part)| word_matches(word, part))
    })
}

fn word_matches(word: &str, keyword: &str) -> bool {
    if let Some(stem) = keyword.strip_suffix('*') {
        return word.starts_with(stem);
    }
    match word.strip_prefix(keyword) {
        Some(rest) => matches!(rest, "" | "s" | "es"),
        None => false,
    }
}

/// Picks the canned reply for `text`.
///
/// The result only depends on the text: the condition it mentions, if
/// any, and the register it is written in.
pub fn reply_for(text: &str) -> &'static str {
    let register = detect_register(text);
    match Condition::detect(text) {
        Some(condition) => condition.reply(register),
        None => generic_reply(register),
    }
}

/// The fever reply, in English.
pub const FEVER_EN: &str = "\
🩺 **Fever Care:**
• Rest and drink plenty of fluids (water, ORS, soups)
• Paracetamol 500mg every 6 hours if needed (max 4 doses a day)
• Sponge with lukewarm water to bring the temperature down
• Check your temperature every 4-6 hours

⚠️ **See doctor if:** fever stays above 103°F (39.4°C), lasts more than 3 days, or comes with rash, stiff neck or breathing trouble";

/// The fever reply, in Tanglish.
pub const FEVER_TA: &str = "\
🩺 **Kaichal (Fever) Care:**
• Nalla rest edunga, neraya thanni, ORS, soup kudinga
• Paracetamol 500mg, 6 mani nerathukku oru thadavai (oru naalukku max 4)
• Lukewarm thanni vechu udamba thudachu vidunga
• 4-6 mani nerathukku oru thadavai temperature check pannunga

⚠️ **Doctor-a paarunga if:** 103°F-ku mela irundha, 3 naalukku mela irundha, illa rash, kazhuthu stiffness, moochu vidradhula kashtam irundha";

/// The headache reply, in English.
pub const HEADACHE_EN: &str = "\
🩺 **Headache Relief:**
• Rest in a quiet, dark room
• Drink water, dehydration is a common trigger
• Paracetamol 500mg if needed, not more than 3 days in a row
• Apply a cold or warm compress on the forehead or neck

⚠️ **See doctor if:** the headache is sudden and severe, follows a head injury, or comes with vision changes, vomiting or confusion";

/// The headache reply, in Tanglish.
pub const HEADACHE_TA: &str = "\
🩺 **Thalai Vali Relief:**
• Amaidhiyana, irutta room-la konjam rest edunga
• Thanni kudinga, dehydration-naala kooda thalai vali varum
• Thevai-na Paracetamol 500mg, 3 naalukku mela continuous-a vendaam
• Nethi illa kazhuthula cold/warm compress vechukonga

⚠️ **Doctor-a paarunga if:** thideernu romba severe-a vandha, adi patta apram vandha, illa paarvai maattram, vomiting, confusion irundha";

/// The cold and cough reply, in English.
pub const COLD_EN: &str = "\
🩺 **Cold & Cough Care:**
• Steam inhalation 2-3 times a day
• Warm water with honey and ginger soothes the throat
• Salt water gargles morning and night
• Rest well and keep yourself hydrated

⚠️ **See doctor if:** cough lasts more than 2 weeks, you cough up blood, or you have high fever or breathlessness";

/// The cold and cough reply, in Tanglish.
pub const COLD_TA: &str = "\
🩺 **Sali & Irumal Care:**
• Oru naalukku 2-3 thadavai aavi pidinga (steam inhalation)
• Vennir-la honey, inji pottu kudinga, thondaikku nalladhu
• Kaalaiyum raathiriyum uppu thanni gargle pannunga
• Nalla rest edunga, neraya thanni kudinga

⚠️ **Doctor-a paarunga if:** irumal 2 vaarathukku mela irundha, irumal-la ratham vandha, illa high fever, moochu thinaral irundha";

/// The stomach and acidity reply, in English.
pub const STOMACH_EN: &str = "\
🩺 **Stomach & Acidity Care:**
• Eat small, light meals (curd rice, idli, bananas)
• Avoid spicy, oily food, tea and coffee for a few days
• Antacid after meals if needed
• Don't lie down right after eating

⚠️ **See doctor if:** pain is severe or keeps coming back, or you see blood in vomit or stool, or have persistent vomiting";

/// The stomach and acidity reply, in Tanglish.
pub const STOMACH_TA: &str = "\
🩺 **Vayiru Vali & Acidity Care:**
• Konjam konjama, light-a saapdunga (thayir saadham, idli, vaazhaipazham)
• Kaaram, ennai, tea, coffee konja naal avoid pannunga
• Thevai-na saapatukku apram antacid edukkalam
• Saaptadhum udane padukka vendaam

⚠️ **Doctor-a paarunga if:** vali romba adhigama irundha, thirumba thirumba vandha, illa vomit/motion-la ratham irundha";

/// The diet reply, in English.
pub const DIET_EN: &str = "\
🩺 **Healthy Diet Tips:**
• Fill half your plate with vegetables and fruits
• Choose whole grains like millets, brown rice and oats
• Include protein: dal, eggs, fish, paneer
• Drink 2-3 litres of water and cut down sugar and fried snacks

⚠️ **See doctor if:** you have sudden weight loss, diabetes, or need a diet plan for a medical condition";

/// The diet reply, in Tanglish.
pub const DIET_TA: &str = "\
🩺 **Healthy Saapadu Tips:**
• Plate-la paadhi kaaikari, pazhangal irukkanum
• Siruthaniyam, brown rice, oats maadhiri whole grains edunga
• Protein mukkiyam: paruppu, muttai, meen, paneer
• 2-3 litre thanni kudinga, sugar, varutha snacks kuraichukonga

⚠️ **Doctor-a paarunga if:** thideernu weight kuraiyudhu, sugar problem irukku, illa medical condition-kku diet plan venum-na";

/// The sleep and fatigue reply, in English.
pub const SLEEP_EN: &str = "\
🩺 **Sleep & Energy Tips:**
• Keep a fixed sleep schedule, 7-8 hours a night
• No screens for 1 hour before bed
• Avoid caffeine after 4 PM
• Take a short walk in morning sunlight

⚠️ **See doctor if:** tiredness lasts more than 2 weeks, or comes with weight loss, breathlessness or low mood";

/// The sleep and fatigue reply, in Tanglish.
pub const SLEEP_TA: &str = "\
🩺 **Thookam & Energy Tips:**
• Dhinamum ore neram thoongunga, 7-8 mani neram
• Thoongaradhukku 1 mani neram munnadi phone, TV vendaam
• Saayangaalam 4 mani-kku apram coffee, tea avoid pannunga
• Kaalai veyil-la konja neram nadanga

⚠️ **Doctor-a paarunga if:** sorvu 2 vaarathukku mela irundha, illa weight loss, moochu thinaral, mood down-a irundha";

/// The stress reply, in English.
pub const STRESS_EN: &str = "\
🩺 **Stress Relief:**
• Try slow breathing: in for 4 seconds, hold 4, out for 6
• Walk or exercise for 20-30 minutes a day
• Talk to someone you trust
• Limit news and social media before bed

⚠️ **See doctor if:** anxiety stops you from daily work, you have panic attacks, or thoughts of harming yourself";

/// The stress reply, in Tanglish.
pub const STRESS_TA: &str = "\
🩺 **Stress Relief:**
• Medhuva moochu vidunga: 4 second ulla, 4 hold, 6 second veliya
• Dhinamum 20-30 nimisham nadanga illa exercise pannunga
• Nambikkaiyana yaar kittayavadhu pesunga
• Thoongaradhukku munnadi news, social media kuraichukonga

⚠️ **Doctor-a paarunga if:** anxiety daily velaiya paadhikkudhu, panic attack varudhu, illa ungalukku theengu pannikanum-nu thonudhu";

/// The general wellness reply, in English.
pub const WELLNESS_EN: &str = "\
🩺 **Everyday Wellness:**
• Move for at least 30 minutes a day
• Eat balanced meals with plenty of vegetables
• Sleep 7-8 hours and stay hydrated
• Get a yearly health check-up

⚠️ **See doctor if:** you notice any new symptom that does not go away";

/// The general wellness reply, in Tanglish.
pub const WELLNESS_TA: &str = "\
🩺 **Dhinasari Arokiyam:**
• Dhinamum kuraindhadhu 30 nimisham udarpayirchi pannunga
• Kaaikari neraya irukka balanced saapadu saapdunga
• 7-8 mani neram thoongunga, neraya thanni kudinga
• Varushathukku oru thadavai health check-up pannunga

⚠️ **Doctor-a paarunga if:** pudhusa edhavadhu symptom vandhu pogaama irundha";

/// The generic reply, in English.
pub const GENERIC_EN: &str = "\
👋 I'm Mr. Doctor and I'm ready to help!
Tell me more about how you feel:
• What symptoms do you have?
• Since when?
• How severe are they?

⚠️ For chest pain, breathing trouble or heavy bleeding, call emergency services right away.";

/// The generic reply, in Tanglish.
pub const GENERIC_TA: &str = "\
👋 Naan Mr. Doctor, help panna ready!
Unga problem pathi konjam detail-a sollunga:
• Enna symptoms irukku?
• Eppo irundhu irukku?
• Evlo severe-a irukku?

⚠️ Nenju vali, moochu vidradhula kashtam, adhiga ratham pona udane emergency-ku call pannunga.";
