use crate::domain::{Agent, Locale};
use crate::linear::{scalar_text, RawField};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

/// One `@`, no whitespace, and a dotted domain without empty labels.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern compiles")
});

/// Agent fields gathered from whichever upstream shape the listing used,
/// before cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Merge the two upstream contact shapes, field by field. `realtor` wins.
///
/// - `realtor { name, tel, email, image: { url } }`
/// - `agent { firstName, lastName, phone, email, photo | photo: { url } }`
pub fn unify_agent(
    realtor: Option<&Map<String, Value>>,
    agent: Option<&Map<String, Value>>,
) -> AgentDraft {
    let realtor_draft = realtor.map(|r| AgentDraft {
        name: text_at(r, &["name"]),
        phone: text_at(r, &["tel", "phone"]),
        email: text_at(r, &["email"]),
        photo: text_at(r, &["image", "photo"]).or_else(|| url_of(r, &["image", "photo"])),
    });

    let agent_draft = agent.map(|a| {
        let name = match (text_at(a, &["firstName"]), text_at(a, &["lastName"])) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (first, last) => first.or(last).or_else(|| text_at(a, &["name"])),
        };
        AgentDraft {
            name,
            phone: text_at(a, &["phone", "mobilePhone", "tel"]),
            email: text_at(a, &["email"]),
            photo: text_at(a, &["photo", "image", "avatar"])
                .or_else(|| url_of(a, &["photo", "image", "avatar"])),
        }
    });

    match (realtor_draft, agent_draft) {
        (Some(r), Some(a)) => AgentDraft {
            name: r.name.or(a.name),
            phone: r.phone.or(a.phone),
            email: r.email.or(a.email),
            photo: r.photo.or(a.photo),
        },
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => AgentDraft::default(),
    }
}

/// Tidy a draft into an [`Agent`].
///
/// Values that cannot be used are dropped and reported as warnings; they never
/// fail the listing. Returns `None` when nothing usable is left.
pub fn clean_agent(draft: AgentDraft) -> (Option<Agent>, Vec<String>) {
    let mut warnings = Vec::new();

    let name = draft.name.as_deref().map(collapse_whitespace).filter(|n| !n.is_empty());

    let phone = draft
        .phone
        .as_deref()
        .map(collapse_whitespace)
        .filter(|p| !p.is_empty())
        .and_then(|p| {
            if p.chars().any(|c| c.is_ascii_digit()) {
                Some(p)
            } else {
                warnings.push(format!("agent phone has no digits: {p:?}"));
                None
            }
        });

    let email = draft
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .and_then(|e| {
            if looks_like_email(&e) {
                Some(e)
            } else {
                warnings.push(format!("agent email is not valid: {e:?}"));
                None
            }
        });

    let photo = draft
        .photo
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .and_then(|p| match web_url(p) {
            Some(url) => Some(url),
            None => {
                warnings.push(format!("agent photo is not an http(s) URL: {p:?}"));
                None
            }
        });

    if name.is_none() && phone.is_none() && email.is_none() && photo.is_none() {
        return (None, warnings);
    }

    (
        Some(Agent {
            name,
            phone,
            email,
            photo,
        }),
        warnings,
    )
}

/// Absolute http(s) URL, accepting protocol-relative `//host/..` as https.
pub fn web_url(raw: &str) -> Option<String> {
    let candidate = match raw.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => raw.to_string(),
    };
    Url::parse(&candidate)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .map(String::from)
}

fn looks_like_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First non-blank text among `keys`; values may be localized wrappers.
fn text_at(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let field = RawField::narrow(map.get(*key)?);
        let text = scalar_text(field.entry(Locale::Fi)?);
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

/// `{ url: .. }` objects under any of `keys`.
fn url_of(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(*key)?
            .as_object()?
            .get("url")?
            .as_str()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
    })
}
