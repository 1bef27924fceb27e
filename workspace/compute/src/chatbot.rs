//! Rule-based farming assistant.
//!
//! A message is answered in the language of its script. The topic is chosen by
//! an ordered keyword table; the first rule that matches wins, so a message
//! mentioning both pests and water gets the pest-control answer.

use common::{ChatReply, Language};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};

/// Devanagari block, used for Hindi.
const DEVANAGARI: std::ops::RangeInclusive<char> = '\u{0900}'..='\u{097F}';
/// Odia block.
const ODIA: std::ops::RangeInclusive<char> = '\u{0B00}'..='\u{0B7F}';

/// Advice topics the assistant knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CropCare,
    PestControl,
    Fertilizer,
    Irrigation,
    Harvesting,
    /// Nothing matched; the answer lists what can be asked
    General,
}

/// A keyword rule. Every word of `all_of` and at least one word of `any_of`
/// must occur in the lower-cased message.
#[derive(Debug)]
pub struct IntentRule {
    pub topic: Topic,
    pub all_of: &'static [&'static str],
    pub any_of: &'static [&'static str],
}

impl IntentRule {
    fn matches(&self, lowered: &str) -> bool {
        self.all_of.iter().all(|word| lowered.contains(word))
            && self.any_of.iter().any(|word| lowered.contains(word))
    }
}

/// Rules in priority order.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        topic: Topic::CropCare,
        all_of: &["crop"],
        any_of: &["care", "grow", "maintain"],
    },
    IntentRule {
        topic: Topic::PestControl,
        all_of: &[],
        any_of: &["pest", "insect", "disease"],
    },
    IntentRule {
        topic: Topic::Fertilizer,
        all_of: &[],
        any_of: &["fertilizer", "fertiliser", "nutrient", "manure"],
    },
    IntentRule {
        topic: Topic::Irrigation,
        all_of: &[],
        any_of: &["water", "irrigation", "watering"],
    },
    IntentRule {
        topic: Topic::Harvesting,
        all_of: &[],
        any_of: &["harvest", "pick", "collect"],
    },
];

struct Responses {
    english: &'static str,
    hindi: &'static str,
    odia: &'static str,
}

impl Responses {
    fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Hindi => self.hindi,
            Language::Odia => self.odia,
        }
    }
}

const CROP_CARE: Responses = Responses {
    english: "To care for crops, ensure proper watering, adequate sunlight, and regular monitoring. Water crops early in the morning or late evening. Remove weeds regularly and check for signs of disease or pests. Use organic fertilizers and maintain proper spacing between plants.",
    hindi: "फसलों की देखभाल के लिए, उचित पानी, पर्याप्त धूप और नियमित निगरानी सुनिश्चित करें। सुबह जल्दी या शाम को देर से फसलों को पानी दें। नियमित रूप से खरपतवार हटाएं और बीमारी या कीटों के संकेतों की जांच करें। जैविक उर्वरक का उपयोग करें और पौधों के बीच उचित दूरी बनाए रखें।",
    odia: "ଫସଲର ଯତ୍ନ ନେବା ପାଇଁ, ଉଚିତ ଜଳସେଚନ, ପର୍ଯ୍ୟାପ୍ତ ସୂର୍ଯ୍ୟାଲୋକ, ଏବଂ ନିୟମିତ ନିରୀକ୍ଷଣ ନିଶ୍ଚିତ କରନ୍ତୁ। ସକାଳେ ବିଳମ୍ବରେ କିମ୍ବା ସନ୍ଧ୍ୟାରେ ଫସଲକୁ ପାଣି ଦିଅନ୍ତୁ। ନିୟମିତ ଭାବରେ ଘାସ ହଟାନ୍ତୁ ଏବଂ ରୋଗ କିମ୍ବା କୀଟର ଚିହ୍ନ ଯାଞ୍ଚ କରନ୍ତୁ। ଜୈବିକ ସାର ବ୍ୟବହାର କରନ୍ତୁ ଏବଂ ଉଦ୍ଭିଦ ମଧ୍ୟରେ ଉଚିତ ଦୂରତା ବଜାୟ ରଖନ୍ତୁ।",
};

const PEST_CONTROL: Responses = Responses {
    english: "For pest control, use integrated pest management (IPM). Start with preventive measures like crop rotation and companion planting. Use natural predators like ladybugs. Apply organic pesticides like neem oil or garlic spray. Monitor crops regularly and remove infected plants immediately.",
    hindi: "कीट नियंत्रण के लिए, एकीकृत कीट प्रबंधन (IPM) का उपयोग करें। फसल चक्र और साथी रोपण जैसे निवारक उपायों से शुरुआत करें। लेडीबग जैसे प्राकृतिक शिकारियों का उपयोग करें। नीम के तेल या लहसुन स्प्रे जैसे जैविक कीटनाशक लगाएं। नियमित रूप से फसलों की निगरानी करें और संक्रमित पौधों को तुरंत हटा दें।",
    odia: "କୀଟ ନିୟନ୍ତ୍ରଣ ପାଇଁ, ସମନ୍ୱିତ କୀଟ ପ୍ରବନ୍ଧନ (IPM) ବ୍ୟବହାର କରନ୍ତୁ। ଫସଲ ଘୂର୍ଣ୍ଣନ ଏବଂ ସାଥୀ ରୋପଣ ଭଳି ପ୍ରତିଷେଧାତ୍ମକ ଉପାୟରୁ ଆରମ୍ଭ କରନ୍ତୁ। ଲେଡିବଗ୍ ଭଳି ପ୍ରାକୃତିକ ଶିକାରୀ ବ୍ୟବହାର କରନ୍ତୁ। ନିମ ତେଲ କିମ୍ବା ରସୁଣ ସ୍ପ୍ରେ ଭଳି ଜୈବିକ କୀଟନାଶକ ପ୍ରୟୋଗ କରନ୍ତୁ। ନିୟମିତ ଭାବରେ ଫସଲ ନିରୀକ୍ଷଣ କରନ୍ତୁ ଏବଂ ସଂକ୍ରମିତ ଉଦ୍ଭିଦକୁ ତୁରନ୍ତ ହଟାନ୍ତୁ।",
};

const FERTILIZER: Responses = Responses {
    english: "For fertilizers, use organic options like compost, manure, or vermicompost. Apply fertilizers based on soil testing. Nitrogen-rich fertilizers are good for leafy vegetables, while phosphorus and potassium are important for root and fruit development. Apply fertilizers during the growing season and water well after application.",
    hindi: "उर्वरकों के लिए, खाद, गोबर, या वर्मीकम्पोस्ट जैसे जैविक विकल्पों का उपयोग करें। मिट्टी की जांच के आधार पर उर्वरक लगाएं। नाइट्रोजन युक्त उर्वरक पत्तेदार सब्जियों के लिए अच्छे होते हैं, जबकि फॉस्फोरस और पोटेशियम जड़ और फल के विकास के लिए महत्वपूर्ण हैं। बढ़ते मौसम के दौरान उर्वरक लगाएं और लगाने के बाद अच्छी तरह से पानी दें।",
    odia: "ସାର ପାଇଁ, କମ୍ପୋଷ୍ଟ, ଗୋବର, କିମ୍ବା ଭର୍ମିକମ୍ପୋଷ୍ଟ ଭଳି ଜୈବିକ ବିକଳ୍ପ ବ୍ୟବହାର କରନ୍ତୁ। ମାଟି ପରୀକ୍ଷା ଉପରେ ଆଧାର କରି ସାର ପ୍ରୟୋଗ କରନ୍ତୁ। ନାଇଟ୍ରୋଜେନ୍-ସମୃଦ୍ଧ ସାର ପତ୍ରଯୁକ୍ତ ଶାକସବଜି ପାଇଁ ଭଲ, ଯେତେବେଳେ ଫସଫରସ୍ ଏବଂ ପୋଟାସିୟମ୍ ମୂଳ ଏବଂ ଫଳ ବିକାଶ ପାଇଁ ଗୁରୁତ୍ୱପୂର୍ଣ୍ଣ। ବୃଦ୍ଧି ଋତୁରେ ସାର ପ୍ରୟୋଗ କରନ୍ତୁ ଏବଂ ପ୍ରୟୋଗ ପରେ ଭଲ ଭାବରେ ପାଣି ଦିଅନ୍ତୁ।",
};

const IRRIGATION: Responses = Responses {
    english: "For irrigation, water crops early morning or late evening to reduce evaporation. Use drip irrigation or soaker hoses for efficient water use. Water deeply but less frequently to encourage deep root growth. Check soil moisture before watering. Mulch around plants to retain moisture.",
    hindi: "सिंचाई के लिए, वाष्पीकरण को कम करने के लिए सुबह जल्दी या शाम को देर से फसलों को पानी दें। कुशल जल उपयोग के लिए ड्रिप सिंचाई या सोकर होज़ का उपयोग करें। गहरी जड़ वृद्धि को प्रोत्साहित करने के लिए गहराई से लेकिन कम बार पानी दें। पानी देने से पहले मिट्टी की नमी जांचें। नमी बनाए रखने के लिए पौधों के चारों ओर मल्च लगाएं।",
    odia: "ସିଞ୍ଚାଇ ପାଇଁ, ବାଷ୍ପୀକରଣ ହ୍ରାସ କରିବା ପାଇଁ ସକାଳେ ବିଳମ୍ବରେ କିମ୍ବା ସନ୍ଧ୍ୟାରେ ଫସଲକୁ ପାଣି ଦିଅନ୍ତୁ। କାର୍ଯ୍ୟକ୍ଷମ ଜଳ ବ୍ୟବହାର ପାଇଁ ଡ୍ରିପ୍ ସିଞ୍ଚାଇ କିମ୍ବା ସୋକର୍ ହୋଜ୍ ବ୍ୟବହାର କରନ୍ତୁ। ଗଭୀର ମୂଳ ବୃଦ୍ଧି ଉତ୍ସାହିତ କରିବା ପାଇଁ ଗଭୀର ଭାବରେ କିନ୍ତୁ କମ୍ ବାରମ୍ବାର ପାଣି ଦିଅନ୍ତୁ। ପାଣି ଦେବା ପୂର୍ବରୁ ମାଟିର ଆର୍ଦ୍ରତା ଯାଞ୍ଚ କରନ୍ତୁ। ଆର୍ଦ୍ରତା ରଖିବା ପାଇଁ ଉଦ୍ଭିଦ ଚାରିପାଖରେ ମଲ୍ଚ୍ ଲଗାନ୍ତୁ।",
};

const HARVESTING: Responses = Responses {
    english: "For harvesting, pick crops at the right maturity stage. Harvest in the early morning when temperatures are cooler. Use clean, sharp tools to avoid damaging plants. Handle produce gently to prevent bruising. Store harvested crops in a cool, dry place. Some crops like tomatoes continue to ripen after picking.",
    hindi: "फसल कटाई के लिए, सही परिपक्वता अवस्था में फसलें तोड़ें। जब तापमान ठंडा हो तो सुबह जल्दी कटाई करें। पौधों को नुकसान से बचाने के लिए साफ, तेज उपकरणों का उपयोग करें। चोट लगने से बचाने के लिए उत्पाद को धीरे से संभालें। कटाई की गई फसलों को ठंडी, सूखी जगह पर संग्रहीत करें। टमाटर जैसी कुछ फसलें तोड़ने के बाद भी पकती रहती हैं।",
    odia: "ଫସଲ କଟାଇ ପାଇଁ, ସଠିକ୍ ପରିପକ୍ୱତା ଅବସ୍ଥାରେ ଫସଲ ବାଛନ୍ତୁ। ଯେତେବେଳେ ତାପମାତ୍ରା ଥଣ୍ଡା ହୁଏ ସେତେବେଳେ ସକାଳେ ବିଳମ୍ବରେ କଟାଇ କରନ୍ତୁ। ଉଦ୍ଭିଦକୁ କ୍ଷତିରୁ ବଞ୍ଚାଇବା ପାଇଁ ପରିଷ୍କାର, ତୀକ୍ଷ୍ଣ ଉପକରଣ ବ୍ୟବହାର କରନ୍ତୁ। କ୍ଷତି ରୋକିବା ପାଇଁ ଉତ୍ପାଦକୁ ଧୀରେ ଧୀରେ ହ୍ୟାଣ୍ଡଲ୍ କରନ୍ତୁ। କଟାଇ ହୋଇଥିବା ଫସଲକୁ ଏକ ଥଣ୍ଡା, ଶୁଷ୍କ ସ୍ଥାନରେ ସଂରକ୍ଷଣ କରନ୍ତୁ। ଟମାଟୋ ଭଳି କିଛି ଫସଲ ବାଛିବା ପରେ ମଧ୍ୟ ପାଚିବା ଜାରି ରଖନ୍ତି।",
};

const GENERAL: Responses = Responses {
    english: "I'm here to help with farming questions! You can ask me about crop care, pest control, fertilizers, irrigation, harvesting, or any other farming-related topic. What would you like to know?",
    hindi: "मैं कृषि प्रश्नों में मदद के लिए यहां हूं! आप मुझसे फसल देखभाल, कीट नियंत्रण, उर्वरक, सिंचाई, फसल कटाई, या किसी अन्य कृषि-संबंधी विषय के बारे में पूछ सकते हैं। आप क्या जानना चाहेंगे?",
    odia: "ମୁଁ କୃଷି ପ୍ରଶ୍ନରେ ସାହାଯ୍ୟ କରିବା ପାଇଁ ଏଠାରେ ଅଛି! ଆପଣ ମୋଠାରୁ ଫସଲ ଯତ୍ନ, କୀଟ ନିୟନ୍ତ୍ରଣ, ସାର, ସିଞ୍ଚାଇ, ଫସଲ କଟାଇ, କିମ୍ବା ଅନ୍ୟ କୃଷି-ସମ୍ବନ୍ଧୀୟ ବିଷୟ ବିଷୟରେ ପଚାରିପାରନ୍ତି। ଆପଣ କଣ ଜାଣିବାକୁ ଚାହାନ୍ତି?",
};
/// Detects the answer language from the script used in the message.
///
/// Devanagari is checked before Odia; anything else is English.
pub fn detect_language(message: &str) -> Language {
    if message.chars().any(|c| DEVANAGARI.contains(&c)) {
        Language::Hindi
    } else if message.chars().any(|c| ODIA.contains(&c)) {
        Language::Odia
    } else {
        Language::English
    }
}

/// Picks the topic of the first rule matching the message.
pub fn match_intent(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::General)
}

/// Canned answer for a topic in a language.
pub fn response_for(topic: Topic, language: Language) -> &'static str {
    let responses = match topic {
        Topic::CropCare => &CROP_CARE,
        Topic::PestControl => &PEST_CONTROL,
        Topic::Fertilizer => &FERTILIZER,
        Topic::Irrigation => &IRRIGATION,
        Topic::Harvesting => &HARVESTING,
        Topic::General => &GENERAL,
    };
    responses.get(language)
}

/// Answers a user message.
///
/// Blank messages are rejected; everything else gets exactly one canned answer.
#[instrument(skip(message), fields(len = message.len()))]
pub fn reply(message: &str) -> Result<ChatReply> {
    if message.trim().is_empty() {
        debug!("Rejecting blank chatbot message");
        return Err(ComputeError::EmptyMessage);
    }

    let language = detect_language(message);
    let topic = match_intent(message);
    trace!(?language, ?topic, "Chatbot message classified");

    Ok(ChatReply {
        message: response_for(topic, language).to_string(),
        detected_language: language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language_defaults_to_english() {
        assert_eq!(detect_language("How do I water wheat?"), Language::English);
        assert_eq!(detect_language("1234 ?!"), Language::English);
    }

    #[test]
    fn test_detect_language_hindi() {
        assert_eq!(detect_language("फसल की देखभाल"), Language::Hindi);
        // A single Devanagari character inside English text is enough
        assert_eq!(detect_language("pest क"), Language::Hindi);
    }

    #[test]
    fn test_detect_language_odia() {
        assert_eq!(detect_language("ଫସଲ ଯତ୍ନ"), Language::Odia);
    }

    #[test]
    fn test_devanagari_is_checked_before_odia() {
        assert_eq!(detect_language("ଫସଲ फसल"), Language::Hindi);
    }

    #[test]
    fn test_crop_care_requires_both_keywords() {
        assert_eq!(match_intent("How to care for my crop?"), Topic::CropCare);
        assert_eq!(match_intent("best way to GROW a CROP"), Topic::CropCare);
        assert_eq!(match_intent("how to maintain crops"), Topic::CropCare);
        assert_eq!(match_intent("crop prices"), Topic::General);
        assert_eq!(match_intent("I care about soil"), Topic::General);
    }

    #[test]
    fn test_crop_care_wins_over_other_topics() {
        assert_eq!(
            match_intent("crop care against pest and water and harvest"),
            Topic::CropCare
        );
    }

    #[test]
    fn test_pest_control_beats_irrigation() {
        assert_eq!(match_intent("pest problem after water logging"), Topic::PestControl);
    }

    #[test]
    fn test_each_topic_keyword() {
        assert_eq!(match_intent("leaf disease"), Topic::PestControl);
        assert_eq!(match_intent("insects everywhere"), Topic::PestControl);
        assert_eq!(match_intent("which fertiliser"), Topic::Fertilizer);
        assert_eq!(match_intent("cow manure"), Topic::Fertilizer);
        assert_eq!(match_intent("soil nutrient levels"), Topic::Fertilizer);
        assert_eq!(match_intent("drip irrigation"), Topic::Irrigation);
        assert_eq!(match_intent("when to harvest rice"), Topic::Harvesting);
        assert_eq!(match_intent("collect seeds"), Topic::Harvesting);
        assert_eq!(match_intent("hello"), Topic::General);
    }

    #[test]
    fn test_fertilizer_beats_irrigation_and_harvest() {
        assert_eq!(match_intent("water the manure before you pick"), Topic::Fertilizer);
    }

    #[test]
    fn test_reply_rejects_blank_messages() {
        assert_eq!(reply(""), Err(ComputeError::EmptyMessage));
        assert_eq!(reply("   \n\t"), Err(ComputeError::EmptyMessage));
    }

    #[test]
    fn test_reply_is_deterministic() {
        let first = reply("How to care for my crop?").unwrap();
        let second = reply("How to care for my crop?").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.message, response_for(Topic::CropCare, Language::English));
        assert_eq!(first.detected_language, Language::English);
    }

    #[test]
    fn test_reply_in_hindi_uses_hindi_default_when_no_english_keyword() {
        let answer = reply("नमस्ते").unwrap();
        assert_eq!(answer.detected_language, Language::Hindi);
        assert_eq!(answer.message, response_for(Topic::General, Language::Hindi));
    }

    #[test]
    fn test_reply_mixed_script_keeps_topic() {
        let answer = reply("pest ଫସଲ").unwrap();
        assert_eq!(answer.detected_language, Language::Odia);
        assert_eq!(answer.message, response_for(Topic::PestControl, Language::Odia));
    }

    #[test]
    fn test_every_topic_has_distinct_answers_per_language() {
        let topics = [
            Topic::CropCare,
            Topic::PestControl,
            Topic::Fertilizer,
            Topic::Irrigation,
            Topic::Harvesting,
            Topic::General,
        ];
        for topic in topics {
            let en = response_for(topic, Language::English);
            let hi = response_for(topic, Language::Hindi);
            let or = response_for(topic, Language::Odia);
            assert!(!en.is_empty());
            assert_ne!(en, hi);
            assert_ne!(hi, or);
            assert_eq!(detect_language(hi), Language::Hindi);
            assert!(or.chars().any(|c| ODIA.contains(&c)));
        }
    }
}
