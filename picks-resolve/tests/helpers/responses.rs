//! Search response fixtures
//!
//! Shaped like the real `search/index.xml` payload, trimmed to the
//! elements the extractor reads plus a few it must ignore.

/// One `<work>` element
pub fn work(id: u32, title: &str, author: &str, ratings: u64, year: Option<i32>) -> String {
    let year = match year {
        Some(y) => format!(r#"<original_publication_year type="integer">{}</original_publication_year>"#, y),
        None => r#"<original_publication_year type="integer" nil="true"/>"#.to_string(),
    };
    format!(
        r#"<work>
  <id type="integer">{id}</id>
  <ratings_count type="integer">{ratings}</ratings_count>
  {year}
  <average_rating>3.9</average_rating>
  <best_book type="Book">
    <id type="integer">{id}</id>
    <title>{title}</title>
    <author>
      <id type="integer">1</id>
      <name>{author}</name>
    </author>
  </best_book>
</work>"#
    )
}

/// Full response wrapping `works`
pub fn search_response(works: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GoodreadsResponse>
  <Request>
    <authentication>true</authentication>
  </Request>
  <search>
    <results-start>1</results-start>
    <results-end>{n}</results-end>
    <total-results>{n}</total-results>
    <results>
{works}
    </results>
  </search>
</GoodreadsResponse>"#,
        n = works.len(),
        works = works.join("\n")
    )
}
