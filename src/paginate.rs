use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::PipelineError;
use crate::fetch::Fetch;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+packages found").unwrap());

/// Pull the total result count out of the first page's body.
///
/// An absent count pattern is a valid outcome (empty result set, or markup
/// without the banner) and yields 0, which still drives one page fetch.
pub fn parse_count(body: &str) -> u64 {
    COUNT_RE
        .captures(body)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Probe the offset-0 page for the total result count. This fetch exists
/// only to read the count; its body does not join the corpus.
pub fn fetch_count<F: Fetch>(fetcher: &F, url: &str) -> Result<u64, PipelineError> {
    let body = fetcher.fetch(url).map_err(PipelineError::CountFetch)?;
    let total = parse_count(&body);
    info!("count probe: {} packages reported", total);
    Ok(total)
}

/// Fetch every result page and concatenate the bodies in fetch order.
///
/// The loop runs `total/page_size + 1` times at offsets page_size,
/// 2*page_size, ...: always one page past the exact division. Catalog
/// counts are approximate at request time, so the over-fetch stays; an
/// out-of-range page just contributes a fragment with no entries.
pub fn fetch_pages<F: Fetch>(
    fetcher: &F,
    total: u64,
    page_size: u64,
    url_for: impl Fn(u64) -> String,
) -> Result<String, PipelineError> {
    let pages = total / page_size + 1;

    let pb = ProgressBar::new(pages);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut corpus = String::new();
    for page in 1..=pages {
        let offset = page * page_size;
        let url = url_for(offset);
        debug!("fetching page at offset {}", offset);
        let body = fetcher.fetch(&url).map_err(PipelineError::PageFetch)?;
        corpus.push_str(&body);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("fetched {} result pages", pages);
    Ok(corpus)
}

/// Count probe + page loop against the configured search URL.
pub fn fetch_corpus<F: Fetch>(fetcher: &F, cfg: &Config) -> Result<String, PipelineError> {
    let total = fetch_count(fetcher, &cfg.search_url(0))?;
    fetch_pages(fetcher, total, cfg.page_size, |offset| cfg.search_url(offset))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::FetchError;

    /// Records every requested URL; fails on URLs listed in `poison`.
    struct ScriptedFetcher {
        body: String,
        poison: Vec<String>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn ok(body: &str) -> Self {
            ScriptedFetcher {
                body: body.to_string(),
                poison: Vec::new(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetch for ScriptedFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.seen.borrow_mut().push(url.to_string());
            if self.poison.iter().any(|p| url.contains(p.as_str())) {
                return Err(FetchError("connection refused".into()));
            }
            Ok(self.body.clone())
        }
    }

    #[test]
    fn count_parses_from_banner() {
        assert_eq!(parse_count("<p>1234 packages found.</p>"), 1234);
        assert_eq!(parse_count("exactly 7 packages found"), 7);
    }

    #[test]
    fn absent_count_is_zero_not_error() {
        assert_eq!(parse_count("<html><body>no results</body></html>"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn fetch_count_classifies_probe_failure() {
        let f = ScriptedFetcher {
            body: String::new(),
            poison: vec!["O=0".into()],
            seen: RefCell::new(Vec::new()),
        };
        let err = fetch_count(&f, "http://cat/packages/?O=0").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn page_count_and_offsets() {
        // total=600, page_size=250 -> floor(600/250)+1 = 3 page fetches
        let f = ScriptedFetcher::ok("");
        fetch_pages(&f, 600, 250, |o| format!("O={}", o)).unwrap();
        assert_eq!(
            *f.seen.borrow(),
            vec!["O=250", "O=500", "O=750"],
            "offsets must be strictly increasing multiples of page_size"
        );
    }

    #[test]
    fn zero_total_still_fetches_one_page() {
        let f = ScriptedFetcher::ok("");
        fetch_pages(&f, 0, 250, |o| format!("O={}", o)).unwrap();
        assert_eq!(*f.seen.borrow(), vec!["O=250"]);
    }

    #[test]
    fn whole_run_issues_probe_plus_pages() {
        // Property: exactly floor(total/page_size) + 2 fetches overall.
        let cfg = Config::new("http://cat".into(), "q".into(), 250, "data".into());
        let f = ScriptedFetcher::ok("740 packages found");
        fetch_corpus(&f, &cfg).unwrap();
        let seen = f.seen.borrow();
        assert_eq!(seen.len(), (740 / 250) + 2);
        assert!(seen[0].ends_with("O=0"));
    }

    #[test]
    fn page_failure_maps_to_code_5() {
        let f = ScriptedFetcher {
            body: String::new(),
            poison: vec!["O=500".into()],
            seen: RefCell::new(Vec::new()),
        };
        let err = fetch_pages(&f, 600, 250, |o| format!("O={}", o)).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        // Aborts immediately: nothing past the failing offset is requested.
        assert_eq!(*f.seen.borrow(), vec!["O=250", "O=500"]);
    }

    #[test]
    fn corpus_concatenates_in_fetch_order() {
        struct Numbered(RefCell<u32>);
        impl Fetch for Numbered {
            fn fetch(&self, _url: &str) -> Result<String, FetchError> {
                let mut n = self.0.borrow_mut();
                *n += 1;
                Ok(format!("page{};", n))
            }
        }
        let corpus = fetch_pages(&Numbered(RefCell::new(0)), 500, 250, |o| o.to_string()).unwrap();
        assert_eq!(corpus, "page1;page2;page3;");
    }
}
