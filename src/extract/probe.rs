use scraper::{ElementRef, Html, Selector};

/// What to pull from a matched element.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// Joined text content, trimmed.
    Text,
    /// A named attribute value.
    Attr(&'static str),
}

/// One extraction strategy: a CSS selector plus a value target. Fields are
/// populated from an ordered probe list; the first probe that yields a
/// non-empty value wins, so upstream markup changes are handled by adding a
/// probe rather than rewriting extraction logic.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub selector: &'static str,
    pub target: Target,
}

impl Probe {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            target: Target::Text,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            target: Target::Attr(name),
        }
    }
}

/// Run probes in order within a scope element, returning the first non-empty
/// value. Probes that fail to parse or match are skipped silently.
pub fn first_match(probes: &[Probe], scope: ElementRef) -> Option<String> {
    for probe in probes {
        let Ok(selector) = Selector::parse(probe.selector) else {
            continue;
        };

        if let Some(value) = scope
            .select(&selector)
            .next()
            .and_then(|element| value_of(element, probe.target))
        {
            return Some(value);
        }
    }

    None
}

/// Run probes in order against the whole document. Used by detail-page
/// extraction, where fields are found anywhere rather than inside a card.
pub fn first_match_doc(probes: &[Probe], document: &Html) -> Option<String> {
    for probe in probes {
        let Ok(selector) = Selector::parse(probe.selector) else {
            continue;
        };

        if let Some(value) = document
            .select(&selector)
            .next()
            .and_then(|element| value_of(element, probe.target))
        {
            return Some(value);
        }
    }

    None
}

fn value_of(element: ElementRef, target: Target) -> Option<String> {
    match target {
        Target::Text => {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Target::Attr(name) => element
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    }
}
