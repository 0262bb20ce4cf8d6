pub mod admin;
pub mod archive;
pub mod home;
pub mod issue;
pub mod login;

use gazette_core::issue::Issue;

use crate::{
  ServerConfig,
  error::Error,
  gallery::{self, ViewQuery},
  html::Page,
};

/// A full issue page: heading, publication date and the viewer.
pub(super) fn issue_page(
  config: &ServerConfig,
  issue:  &Issue,
  base:   &str,
  query:  &ViewQuery,
) -> Result<String, Error> {
  let view = query.restore(issue.page_count());
  let title = format!("{} | {}", issue.title, config.site_title);

  let mut page = Page::new(&title)?;
  page.site_header(&config.site_title)?;
  page.open("article", &[("class", "issue")])?;
  page.element("h2", &[], &issue.title)?;
  let published = format!("Published on {}", issue.date.long_display());
  page.element("p", &[("class", "issue-date")], &published)?;
  gallery::render(&mut page, base, &issue.image_urls, &view)?;
  page.close("article")?;
  page.link("/archive", "button", "Browse the archive")?;
  page.site_footer(&config.site_title)?;
  page.finish()
}
