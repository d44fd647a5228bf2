//! Bookmarkable links carrying the current selection as `gpu` and `hours`
//! query parameters.
//!
//! Hours travel as the raw user input; they are only normalized when a quote
//! is computed, so a link reproduces exactly what was typed.

use crate::error::AppError;
use serde::Serialize;
use url::Url;

const GPU_PARAM: &str = "gpu";
const HOURS_PARAM: &str = "hours";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareParams {
    pub gpu: Option<String>,
    pub hours: Option<String>,
}

impl ShareParams {
    pub fn new(gpu: Option<String>, hours: Option<String>) -> Self {
        Self { gpu, hours }
    }

    /// Attach the parameters to `base`, replacing any previous `gpu`/`hours`
    /// and keeping unrelated query parameters
    pub fn to_url(&self, base: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(base)?;

        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != GPU_PARAM && key != HOURS_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(retained.iter());
            if let Some(gpu) = self.gpu.as_deref().filter(|g| !g.is_empty()) {
                pairs.append_pair(GPU_PARAM, gpu);
            }
            if let Some(hours) = self.hours.as_deref().filter(|h| !h.is_empty()) {
                pairs.append_pair(HOURS_PARAM, hours);
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    /// Read `gpu` and `hours` back out of a link; the first occurrence wins
    pub fn from_url(link: &str) -> Result<Self, AppError> {
        let url = Url::parse(link)?;

        let lookup = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        Ok(Self {
            gpu: lookup(GPU_PARAM),
            hours: lookup(HOURS_PARAM),
        })
    }
}
