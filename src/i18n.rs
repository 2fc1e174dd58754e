use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko-kr",
            Language::En => "en-us",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
///
/// 조회 순서: 언어팩 디렉터리 → 내장 언어팩 → 내장 영어 언어팩 → 호출자가 준 기본 문자열.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    pack: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 내장 언어팩만으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리 파일에 없는 키는 같은 언어의 내장 문자열로 채운다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut pack = built_in_pack(lang.as_code()).unwrap_or_default();
        // 디렉터리 언어팩은 내장 언어팩 위에 덮어쓴다
        if let Some(overrides) = pack_dir.and_then(|dir| load_overrides(dir, lang.as_code())) {
            pack.extend(overrides);
        }
        let fallback = built_in_pack("en-us").unwrap_or_default();
        debug!(lang = lang.as_code(), keys = pack.len(), "language pack loaded");
        Self {
            lang,
            pack,
            fallback,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 어느 언어팩에도 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.pack
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
    }

    /// 키를 조회하고, 없으면 `default`를 돌려준다.
    pub fn text(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    /// 키를 조회하고, 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang {
        "en-us" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cli_language_wins() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn built_in_packs_cover_dialog_messages() {
        let en = Translator::new("en-us");
        assert_eq!(
            en.t("error.dry_bulb_required"),
            "Dry Bulb Temperature is a required input"
        );
        let ko = Translator::new("ko-kr");
        assert_eq!(ko.language(), Language::Ko);
        assert_ne!(ko.t("error.dry_bulb_required"), "error.dry_bulb_required");
    }

    #[test]
    fn unknown_key_falls_back() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.text("no.such.key", "dflt"), "dflt");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn pack_directory_overrides_built_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.toml"),
            "[process]\nsensible_heating = \"Heating (sensible)\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("en-us", dir.path().to_str());
        assert_eq!(tr.t("process.sensible_heating"), "Heating (sensible)");
        // 언어팩에 없는 키는 내장 영어로 채운다
        assert_eq!(tr.t("process.humidification"), "Humidification");
    }

    #[test]
    fn partial_pack_keeps_built_in_language() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ko-kr.toml"), "[general]\napp_title = \"습공기 계산기\"\n").unwrap();
        let tr = Translator::new_with_pack("ko-kr", dir.path().to_str());
        let built_in = Translator::new("ko-kr");
        assert_eq!(tr.t("general.app_title"), "습공기 계산기");
        assert_eq!(
            tr.t("process.sensible_heating"),
            built_in.t("process.sensible_heating")
        );
        assert_ne!(tr.t("process.sensible_heating"), "Sensible Heating");
    }
}
