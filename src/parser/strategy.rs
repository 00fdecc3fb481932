//! Ordered field-extraction strategies
//!
//! Each field of a record is extracted by a list of [`Strategy`] values tried
//! in priority order; the first one that yields a value wins. Strategies are
//! pure functions of the element they are given, so each can be tested alone.

use scraper::{ElementRef, Selector};

type Extract = dyn Fn(ElementRef<'_>) -> Option<String> + Send + Sync;

/// One way of pulling a value out of an element
pub struct Strategy {
    name: String,
    extract: Box<Extract>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

impl Strategy {
    /// Wraps an arbitrary extraction function
    pub fn custom<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(ElementRef<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Box::new(extract),
        }
    }

    /// Trimmed text of the first descendant matching `css`
    ///
    /// A match with no text yields `Some("")`: the node is there, it is just
    /// empty.
    pub fn text(css: &str) -> Option<Self> {
        let selector = compile(css)?;
        Some(Self::custom(css, move |el| {
            el.select(&selector).next().map(|found| trimmed_text(found))
        }))
    }

    /// Whitespace-collapsed text of the first descendant matching `css`
    pub fn spaced_text(css: &str) -> Option<Self> {
        let selector = compile(css)?;
        Some(Self::custom(css, move |el| {
            el.select(&selector).next().map(|found| spaced_text(found))
        }))
    }

    /// Newline-separated text of the first descendant matching `css`
    ///
    /// Like [`Strategy::text`], a match with no text yields `Some("")`, so a
    /// present but empty container still ends the cascade.
    pub fn block_text(css: &str) -> Option<Self> {
        let selector = compile(css)?;
        Some(Self::custom(css, move |el| {
            el.select(&selector).next().map(|found| block_text(found))
        }))
    }

    /// Non-empty value of an attribute on the element itself
    pub fn attr(name: &str) -> Self {
        let attr = name.to_string();
        Self::custom(format!("@{}", name), move |el| {
            el.value()
                .attr(&attr)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, el: ElementRef<'_>) -> Option<String> {
        (self.extract)(el)
    }
}

/// Runs strategies in order and returns the first value produced
pub fn first_success(strategies: &[Strategy], el: ElementRef<'_>) -> Option<String> {
    strategies.iter().find_map(|s| s.apply(el))
}

/// Compiles a selector, logging and skipping it if it does not parse
pub fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Skipping invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// All text under the element, trimmed at both ends
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// All text under the element with runs of whitespace collapsed to one space
pub fn spaced_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text nodes under the element, each trimmed, empty ones dropped, joined by newlines
pub fn block_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
