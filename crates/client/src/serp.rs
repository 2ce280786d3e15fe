//! Search results page extraction.
//!
//! Parses the HTML results page into structured hits. Coupling to the
//! results page markup is confined to this module. Result blocks missing
//! a link or snippet are skipped entirely and do not count against the
//! cap.

use lantern_core::Hit;
use scraper::{ElementRef, Html, Selector};

/// Extract up to `max_hits` results from a results page.
///
/// A block only yields a hit when the title link, its href, and the
/// snippet are all present. The href is kept verbatim.
pub fn extract_hits(html: &str, max_hits: usize) -> Vec<Hit> {
    let document = Html::parse_document(html);
    let result_sel = Selector::parse("div.result").expect("invalid selector");
    let title_sel = Selector::parse("a.result__a").expect("invalid selector");
    let snippet_sel = Selector::parse("a.result__snippet").expect("invalid selector");

    let mut hits = Vec::new();

    for block in document.select(&result_sel) {
        if hits.len() >= max_hits {
            break;
        }

        let Some(link) = block.select(&title_sel).next() else {
            continue;
        };
        let Some(snippet) = block.select(&snippet_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        hits.push(Hit { title: element_text(link), snippet: element_text(snippet), url: href.to_string() });
    }

    hits
}

/// Flatten an element's text nodes and normalize interior whitespace.
///
/// Text nodes are concatenated without separators so inline markup like
/// `<b>` does not split words.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) const SEVEN_RESULT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en-US"><head><title>rust ownership at DuckDuckGo</title></head>
<body class="body--html">
<div class="serp__results">
<div id="links" class="results">
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html">Understanding Ownership - The Rust Programming Language</a>
      </h2>
      <div class="result__extras">
        <div class="result__extras__url">
          <span class="result__icon"></span>
          <a class="result__url" href="https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html">doc.rust-lang.org/book/ch04-00-understanding-ownership.html</a>
        </div>
      </div>
      <a class="result__snippet" href="https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html"><b>Ownership</b> is <b>Rust</b>'s most unique feature and has deep implications for the rest of the language.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://doc.rust-lang.org/rust-by-example/scope/move.html">Ownership and moves - Rust By Example</a>
      </h2>
      <a class="result__snippet" href="https://doc.rust-lang.org/rust-by-example/scope/move.html">Because variables are in charge of freeing their own resources, resources can only have one owner.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://en.wikipedia.org/wiki/Rust_(programming_language)">Rust (programming language) - Wikipedia</a>
      </h2>
      <a class="result__snippet" href="https://en.wikipedia.org/wiki/Rust_(programming_language)">Its <b>ownership</b> system enforces memory safety without a garbage collector.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://stackoverflow.com/questions/30288782/what-are-move-semantics-in-rust">What are move semantics in Rust? - Stack Overflow</a>
      </h2>
      <a class="result__snippet" href="https://stackoverflow.com/questions/30288782/what-are-move-semantics-in-rust">Assignment in <b>Rust</b> moves the value unless the type implements Copy.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://blog.logrocket.com/understanding-ownership-in-rust/">Understanding ownership in Rust - LogRocket Blog</a>
      </h2>
      <a class="result__snippet" href="https://blog.logrocket.com/understanding-ownership-in-rust/">A guide to the borrow checker with worked examples of moves, clones, and references.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://google.github.io/comprehensive-rust/ownership.html">Ownership - Comprehensive Rust</a>
      </h2>
      <a class="result__snippet" href="https://google.github.io/comprehensive-rust/ownership.html">All variable bindings have a scope where they are valid and it is an error to use them outside it.</a>
    </div>
  </div>
  <div class="result results_links results_links_deep web-result">
    <div class="links_main links_deep result__body">
      <h2 class="result__title">
        <a rel="nofollow" class="result__a" href="https://educative.io/answers/what-is-ownership-in-rust">What is ownership in Rust? - Educative</a>
      </h2>
      <a class="result__snippet" href="https://educative.io/answers/what-is-ownership-in-rust">Each value has a single owning variable, and the value is dropped when the owner leaves scope.</a>
    </div>
  </div>
</div>
</div>
</body></html>"##;
