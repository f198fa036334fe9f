use crate::domain::{Locale, LocalizedValue};
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Used when an address produces no usable characters at all.
const FALLBACK_SLUG: &str = "kohde";

/// URL-safe slug of a free-text address.
///
/// `"Östra Allén 3 B"` becomes `"ostra-allen-3-b"`.
pub fn slugify(input: &str) -> String {
    let lowered: String = input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ä' | 'å' => 'a',
            'ö' => 'o',
            other => other,
        })
        .collect();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Base slug of an address: the first language that yields any characters,
/// Finnish first, so a listing slugs the same in every locale.
pub fn slug_base(address: &LocalizedValue) -> String {
    Locale::ALL
        .iter()
        .filter_map(|locale| address.get(*locale))
        .map(slugify)
        .find(|slug| !slug.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}

/// A slug handed out by a [`SlugRegistry`], with the request it answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSlug {
    /// Listing id the slug belongs to.
    pub owner: String,
    pub slug: String,
    base: String,
    postal_code: Option<String>,
}

impl IssuedSlug {
    pub fn new(
        owner: impl Into<String>,
        slug: impl Into<String>,
        base: &str,
        postal_code: Option<&str>,
    ) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
            base: base_or_fallback(base).to_string(),
            postal_code: postal_key(postal_code),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    fn answers(&self, base: &str, postal_code: Option<&str>) -> bool {
        self.base == base && self.postal_code.as_deref() == postal_code
    }
}

/// The set of slugs issued during one mapping session.
///
/// Collisions are resolved by appending the postal code, then a numeric
/// suffix (`-2`, `-3`, ..). A listing that asks again with the same address
/// and postal code (e.g. when mapped for another locale) gets back the slug it
/// was already given; a changed address or postal code gets a new one.
#[derive(Debug, Clone, Default)]
pub struct SlugRegistry {
    issued: Vec<IssuedSlug>,
    taken: HashMap<String, usize>,
    owners: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry with slugs issued in an earlier session.
    /// Later duplicates of a slug are ignored.
    pub fn from_issued<I>(issued: I) -> Self
    where
        I: IntoIterator<Item = IssuedSlug>,
    {
        let mut registry = Self::new();
        for entry in issued {
            if !registry.taken.contains_key(&entry.slug) {
                registry.insert(entry);
            }
        }
        registry
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.taken.contains_key(slug)
    }

    pub fn slug_for(&self, owner: &str) -> Option<&str> {
        self.owners
            .get(owner)
            .map(|&idx| self.issued[idx].slug.as_str())
    }

    pub fn owner_of(&self, slug: &str) -> Option<&str> {
        self.taken
            .get(slug)
            .map(|&idx| self.issued[idx].owner.as_str())
    }

    pub fn issued(&self) -> &[IssuedSlug] {
        &self.issued
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// Slug for `owner` derived from the base slug `base`.
    ///
    /// Returns the owner's current slug when it was issued for the same base
    /// and postal code, otherwise issues a new unique one.
    pub fn reserve(&mut self, owner: &str, base: &str, postal_code: Option<&str>) -> String {
        let base = base_or_fallback(base);
        let postal = postal_key(postal_code);

        let current = self
            .owners
            .get(owner)
            .map(|&idx| &self.issued[idx])
            .filter(|entry| entry.answers(base, postal.as_deref()));
        if let Some(entry) = current {
            return entry.slug.clone();
        }

        self.issue(owner, base, postal)
    }

    /// Always issue a new slug, even if `owner` already holds one.
    pub fn reserve_new(&mut self, owner: &str, base: &str, postal_code: Option<&str>) -> String {
        let base = base_or_fallback(base);
        let postal = postal_key(postal_code);
        self.issue(owner, base, postal)
    }

    /// Record a slug issued elsewhere (e.g. by another worker's registry).
    ///
    /// Accepted when the slug is free or already held by `owner`; returns
    /// `false` when someone else holds it.
    pub fn adopt(&mut self, owner: &str, slug: &str, base: &str, postal_code: Option<&str>) -> bool {
        match self.owner_of(slug) {
            Some(holder) => holder == owner,
            None => {
                self.insert(IssuedSlug::new(owner, slug, base, postal_code));
                true
            }
        }
    }

    fn issue(&mut self, owner: &str, base: &str, postal: Option<String>) -> String {
        let slug = self.first_free(base, postal.as_deref());
        self.insert(IssuedSlug {
            owner: owner.to_string(),
            slug: slug.clone(),
            base: base.to_string(),
            postal_code: postal,
        });
        slug
    }

    fn first_free(&self, base: &str, postal: Option<&str>) -> String {
        if !self.contains(base) {
            return base.to_string();
        }

        let stem = match postal {
            Some(postal) => {
                let with_postal = format!("{base}-{postal}");
                if !self.contains(&with_postal) {
                    return with_postal;
                }
                with_postal
            }
            None => base.to_string(),
        };

        (2..)
            .map(|n| format!("{stem}-{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(stem)
    }

    fn insert(&mut self, entry: IssuedSlug) {
        let idx = self.issued.len();
        self.taken.insert(entry.slug.clone(), idx);
        self.owners.insert(entry.owner.clone(), idx);
        self.issued.push(entry);
    }
}

fn base_or_fallback(base: &str) -> &str {
    if base.is_empty() {
        FALLBACK_SLUG
    } else {
        base
    }
}

fn postal_key(postal_code: Option<&str>) -> Option<String> {
    postal_code.map(slugify).filter(|p| !p.is_empty())
}
