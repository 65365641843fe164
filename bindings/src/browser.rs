//! Browser identity and rendering capabilities, detected once per
//! activation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowserName {
    #[default]
    Unknown,
    Chrome,
    Edge,
    Firefox,
    Safari,
    Opera,
    SamsungInternet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Engine {
    #[default]
    Unknown,
    Blink,
    Gecko,
    WebKit,
}

/// Result of a detection pass. The default is the conservative answer used
/// until detection has run: unknown identity, every flag false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserInfo {
    pub name: BrowserName,
    pub engine: Engine,
    pub major_version: Option<u32>,
    pub is_ios: bool,
    pub is_android: bool,
    pub is_mobile_device: bool,
    pub supports_touch: bool,
    pub supports_backdrop_filter: bool,
    pub supports_css_grid: bool,
    pub supports_webp: bool,
}

/// What the detection pass reads from the environment.
pub trait CapabilitySource {
    /// `None` outside a browser.
    fn user_agent(&self) -> Option<String>;
    /// CSS `supports(property, value)`.
    fn supports_css(&self, property: &str, value: &str) -> bool;
    fn max_touch_points(&self) -> u32;
    fn supports_webp(&self) -> bool;
}

/// Identity parsed from a user agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserAgent {
    pub name: BrowserName,
    pub engine: Engine,
    pub major_version: Option<u32>,
    pub is_ios: bool,
    pub is_android: bool,
    pub is_mobile: bool,
}

// Checked in order: most of these also advertise Chrome and Safari tokens.
const BROWSER_TOKENS: [(&str, BrowserName); 10] = [
    ("Edg/", BrowserName::Edge),
    ("EdgiOS/", BrowserName::Edge),
    ("EdgA/", BrowserName::Edge),
    ("OPR/", BrowserName::Opera),
    ("SamsungBrowser/", BrowserName::SamsungInternet),
    ("CriOS/", BrowserName::Chrome),
    ("Chrome/", BrowserName::Chrome),
    ("FxiOS/", BrowserName::Firefox),
    ("Firefox/", BrowserName::Firefox),
    ("Version/", BrowserName::Safari),
];

impl UserAgent {
    pub fn parse(ua: &str) -> Self {
        let is_ios = ["iPhone", "iPad", "iPod"].iter().any(|t| ua.contains(t));
        let is_android = ua.contains("Android");
        let is_mobile = is_ios || is_android || ua.contains("Mobi");

        let (name, major_version) = BROWSER_TOKENS
            .iter()
            .filter(|(_, name)| {
                *name != BrowserName::Safari || ua.contains("Safari/")
            })
            .find_map(|(token, name)| {
                let rest = &ua[ua.find(token)? + token.len()..];
                Some((*name, leading_number(rest)))
            })
            .unwrap_or_default();

        let engine = if is_ios {
            // every iOS browser renders with WebKit
            Engine::WebKit
        } else {
            match name {
                BrowserName::Chrome
                | BrowserName::Edge
                | BrowserName::Opera
                | BrowserName::SamsungInternet => Engine::Blink,
                BrowserName::Firefox => Engine::Gecko,
                BrowserName::Safari => Engine::WebKit,
                BrowserName::Unknown if ua.contains("Gecko/") => Engine::Gecko,
                BrowserName::Unknown if ua.contains("AppleWebKit/") => {
                    Engine::WebKit
                }
                BrowserName::Unknown => Engine::Unknown,
            }
        };

        Self {
            name,
            engine,
            major_version,
            is_ios,
            is_android,
            is_mobile,
        }
    }
}

fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Run one detection pass against `source`.
pub fn detect(source: &impl CapabilitySource) -> BrowserInfo {
    let Some(ua) = source.user_agent() else {
        return BrowserInfo::default();
    };
    let agent = UserAgent::parse(&ua);
    BrowserInfo {
        name: agent.name,
        engine: agent.engine,
        major_version: agent.major_version,
        is_ios: agent.is_ios,
        is_android: agent.is_android,
        is_mobile_device: agent.is_mobile,
        supports_touch: source.max_touch_points() > 0,
        supports_backdrop_filter: source
            .supports_css("backdrop-filter", "blur(2px)")
            || source.supports_css("-webkit-backdrop-filter", "blur(2px)"),
        supports_css_grid: source.supports_css("display", "grid"),
        supports_webp: source.supports_webp(),
    }
}

/// Detects once on the first activation and never again.
#[derive(Debug, Clone, Default)]
pub struct BrowserProbe {
    info: BrowserInfo,
    detected: bool,
}

impl BrowserProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, source: &impl CapabilitySource) -> &BrowserInfo {
        if !self.detected {
            self.info = detect(source);
            self.detected = true;
            tracing::debug!(
                browser = ?self.info.name,
                engine = ?self.info.engine,
                "browser detected"
            );
        }
        &self.info
    }

    pub fn info(&self) -> &BrowserInfo {
        &self.info
    }

    pub fn is_detected(&self) -> bool {
        self.detected
    }
}
