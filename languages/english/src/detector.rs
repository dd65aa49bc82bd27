use euterpe_core::language::LanguageDetector;

/// Trigram based detector. Deterministic, so repeated runs label identically.
pub struct TrigramDetector {
    inner: whatlang::Detector,
}

impl TrigramDetector {
    pub fn new() -> Self {
        Self {
            inner: whatlang::Detector::new(),
        }
    }
}

impl Default for TrigramDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for TrigramDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = self.inner.detect(text)?;
        Some(two_letter_code(info.lang().code()).to_string())
    }
}

/// ISO 639-1 code where one exists, else the 639-3 code unchanged
fn two_letter_code(iso639_3: &str) -> &str {
    match iso639_3 {
        "eng" => "en",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "por" => "pt",
        "ita" => "it",
        "nld" => "nl",
        "swe" => "sv",
        "dan" => "da",
        "nob" => "no",
        "fin" => "fi",
        "pol" => "pl",
        "ces" => "cs",
        "slk" => "sk",
        "hun" => "hu",
        "ron" => "ro",
        "hrv" => "hr",
        "srp" => "sr",
        "slv" => "sl",
        "tur" => "tr",
        "rus" => "ru",
        "ukr" => "uk",
        "bul" => "bg",
        "ell" => "el",
        "heb" => "he",
        "ara" => "ar",
        "pes" => "fa",
        "hin" => "hi",
        "ben" => "bn",
        "jpn" => "ja",
        "kor" => "ko",
        "cmn" => "zh",
        "vie" => "vi",
        "tha" => "th",
        "ind" => "id",
        "tgl" => "tl",
        "lat" => "la",
        "epo" => "eo",
        "cat" => "ca",
        "lit" => "lt",
        "lav" => "lv",
        "est" => "et",
        "afr" => "af",
        "zul" => "zu",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use euterpe_core::language::detect_language;

    use super::*;

    #[test]
    fn labels_english_and_spanish() {
        let detector = TrigramDetector::new();
        let english = "I just called to say I love you and I mean it from the bottom of my heart";
        let spanish = "Despacito quiero respirar tu cuello despacito deja que te diga cosas al oído";

        assert_eq!(detect_language(&detector, Some(english)).as_deref(), Some("en"));
        assert_eq!(detect_language(&detector, Some(spanish)).as_deref(), Some("es"));
    }

    #[test]
    fn ten_characters_are_never_labelled() {
        let detector = TrigramDetector::new();
        assert_eq!(detect_language(&detector, Some("hello you!")), None);
    }

    #[test]
    fn unmapped_codes_pass_through() {
        assert_eq!(two_letter_code("eng"), "en");
        assert_eq!(two_letter_code("yid"), "yid");
    }
}
