//! Static language table and service host list

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Pseudo language code asking the provider to detect the source language
pub const AUTO: &str = "auto";

/// Suffix used when the configured one is not a known service host
pub const DEFAULT_URL_SUFFIX: &str = "com";

/// Language codes accepted by the web endpoint, with display names
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

/// Known web translate hosts
pub const DEFAULT_SERVICE_URLS: &[&str] = &[
    "translate.google.ac", "translate.google.ad", "translate.google.ae",
    "translate.google.al", "translate.google.am", "translate.google.as",
    "translate.google.at", "translate.google.az", "translate.google.ba",
    "translate.google.be", "translate.google.bf", "translate.google.bg",
    "translate.google.bi", "translate.google.bj", "translate.google.bs",
    "translate.google.bt", "translate.google.by", "translate.google.ca",
    "translate.google.cat", "translate.google.cc", "translate.google.cd",
    "translate.google.cf", "translate.google.cg", "translate.google.ch",
    "translate.google.ci", "translate.google.cl", "translate.google.cm",
    "translate.google.cn", "translate.google.co.ao", "translate.google.co.bw",
    "translate.google.co.ck", "translate.google.co.cr", "translate.google.co.id",
    "translate.google.co.il", "translate.google.co.in", "translate.google.co.jp",
    "translate.google.co.ke", "translate.google.co.kr", "translate.google.co.ls",
    "translate.google.co.ma", "translate.google.co.mz", "translate.google.co.nz",
    "translate.google.co.th", "translate.google.co.tz", "translate.google.co.ug",
    "translate.google.co.uk", "translate.google.co.uz", "translate.google.co.ve",
    "translate.google.co.vi", "translate.google.co.za", "translate.google.co.zm",
    "translate.google.co.zw", "translate.google.com", "translate.google.com.af",
    "translate.google.com.ag", "translate.google.com.ai", "translate.google.com.ar",
    "translate.google.com.au", "translate.google.com.bd", "translate.google.com.bh",
    "translate.google.com.bn", "translate.google.com.bo", "translate.google.com.br",
    "translate.google.com.bz", "translate.google.com.co", "translate.google.com.cu",
    "translate.google.com.cy", "translate.google.com.do", "translate.google.com.ec",
    "translate.google.com.eg", "translate.google.com.et", "translate.google.com.fj",
    "translate.google.com.gh", "translate.google.com.gi", "translate.google.com.gt",
    "translate.google.com.hk", "translate.google.com.jm", "translate.google.com.kh",
    "translate.google.com.kw", "translate.google.com.lb", "translate.google.com.ly",
    "translate.google.com.mm", "translate.google.com.mt", "translate.google.com.mx",
    "translate.google.com.my", "translate.google.com.na", "translate.google.com.ng",
    "translate.google.com.ni", "translate.google.com.np", "translate.google.com.om",
    "translate.google.com.pa", "translate.google.com.pe", "translate.google.com.pg",
    "translate.google.com.ph", "translate.google.com.pk", "translate.google.com.pr",
    "translate.google.com.py", "translate.google.com.qa", "translate.google.com.sa",
    "translate.google.com.sb", "translate.google.com.sg", "translate.google.com.sl",
    "translate.google.com.sv", "translate.google.com.tj", "translate.google.com.tr",
    "translate.google.com.tw", "translate.google.com.ua", "translate.google.com.uy",
    "translate.google.com.vc", "translate.google.com.vn", "translate.google.cv",
    "translate.google.cz", "translate.google.de", "translate.google.dj",
    "translate.google.dk", "translate.google.dm", "translate.google.dz",
    "translate.google.ee", "translate.google.es", "translate.google.fi",
    "translate.google.fm", "translate.google.fr", "translate.google.ga",
    "translate.google.ge", "translate.google.gg", "translate.google.gl",
    "translate.google.gm", "translate.google.gp", "translate.google.gr",
    "translate.google.gy", "translate.google.hn", "translate.google.hr",
    "translate.google.ht", "translate.google.hu", "translate.google.ie",
    "translate.google.im", "translate.google.iq", "translate.google.is",
    "translate.google.it", "translate.google.je", "translate.google.jo",
    "translate.google.kg", "translate.google.ki", "translate.google.kz",
    "translate.google.la", "translate.google.li", "translate.google.lk",
    "translate.google.lt", "translate.google.lu", "translate.google.lv",
    "translate.google.md", "translate.google.me", "translate.google.mg",
    "translate.google.mk", "translate.google.ml", "translate.google.mn",
    "translate.google.ms", "translate.google.mu", "translate.google.mv",
    "translate.google.mw", "translate.google.ne", "translate.google.nl",
    "translate.google.no", "translate.google.nr", "translate.google.nu",
    "translate.google.pl", "translate.google.pn", "translate.google.ps",
    "translate.google.pt", "translate.google.ro", "translate.google.rs",
    "translate.google.ru", "translate.google.rw", "translate.google.sc",
    "translate.google.se", "translate.google.sh", "translate.google.si",
    "translate.google.sk", "translate.google.sm", "translate.google.sn",
    "translate.google.so", "translate.google.sr", "translate.google.st",
    "translate.google.td", "translate.google.tg", "translate.google.tk",
    "translate.google.tl", "translate.google.tm", "translate.google.tn",
    "translate.google.to", "translate.google.tt", "translate.google.us",
    "translate.google.vg", "translate.google.vu", "translate.google.ws",
];

static LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGES.iter().copied().collect());

static URL_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let pattern = Regex::new(r"translate\.google\.(.*)").expect("static host pattern is valid");
    DEFAULT_SERVICE_URLS
        .iter()
        .filter_map(|url| {
            pattern
                .captures(url.trim())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
        .collect()
});

/// Look up the display name of an exact language code
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_MAP.get(code).copied()
}

/// Check whether `code` is a known language code
pub fn is_supported(code: &str) -> bool {
    LANGUAGE_MAP.contains_key(code)
}

/// Check whether `code` is usable as a source language
pub fn is_supported_source(code: &str) -> bool {
    code == AUTO || is_supported(code)
}

/// Valid endpoint suffixes, in service list order
pub fn url_suffixes() -> &'static [&'static str] {
    &URL_SUFFIXES
}

/// Check whether `suffix` names a known service host
pub fn is_valid_suffix(suffix: &str) -> bool {
    URL_SUFFIXES.iter().any(|s| *s == suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_name("en"), Some("english"));
        assert_eq!(language_name("zh-cn"), Some("chinese (simplified)"));
        assert_eq!(language_name("EN"), None);
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn test_auto_is_source_only() {
        assert!(is_supported_source(AUTO));
        assert!(is_supported_source("fr"));
        assert!(!is_supported(AUTO));
        assert!(!is_supported_source("klingon"));
    }

    #[test]
    fn test_url_suffixes_derived_from_hosts() {
        assert_eq!(url_suffixes().len(), DEFAULT_SERVICE_URLS.len());
        assert!(is_valid_suffix("com"));
        assert!(is_valid_suffix("co.uk"));
        assert!(is_valid_suffix("com.br"));
        assert!(!is_valid_suffix("example"));
        assert!(!is_valid_suffix(""));
    }
}
