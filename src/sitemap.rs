//! `sitemap.xml` generation from `blog-manifest.json`.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::{io::Cursor, path::PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use log::{debug, info, warn};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{context::Context, metadata::PostMetadata, store};

mod entry;

use entry::UrlEntry;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SitemapOutcome {
    pub path: PathBuf,
    pub urls: usize,
}

pub(crate) struct Sitemap {
    urls: Vec<UrlEntry>,
}

impl Sitemap {
    pub fn build(ctx: &Context, posts: &[PostMetadata], today: NaiveDate) -> Self {
        let mut urls = vec![UrlEntry::home(ctx, today), UrlEntry::blog_index(ctx, today)];
        for post in posts {
            let entry = UrlEntry::post(ctx, post, today);
            debug!("Added: {} ({})", post.title, entry.loc);
            urls.push(entry);
        }
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn to_xml(&self) -> anyhow::Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for entry in self.urls.iter() {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            write_text_element(&mut writer, "lastmod", &entry.lastmod)?;
            write_text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
            write_text_element(&mut writer, "priority", entry.priority)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8(writer.into_inner().into_inner())
            .context("sitemap is not valid UTF-8")?;
        xml.push('\n');
        Ok(xml)
    }
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn build_sitemap(ctx: &Context, today: NaiveDate) -> anyhow::Result<SitemapOutcome> {
    let posts = match store::load_manifest(&ctx.manifest_path)? {
        Some(posts) => {
            info!("Found {} blog post(s)", posts.len());
            posts
        }
        None => {
            warn!("{:?} not found, only static pages will be listed", ctx.manifest_path);
            vec![]
        }
    };

    let sitemap = Sitemap::build(ctx, &posts, today);
    let xml = sitemap.to_xml()?;
    store::write_output(&ctx.sitemap_path, &xml)?;

    info!("Sitemap generated: {:?}", ctx.sitemap_path);
    info!("Total URLs: {}", sitemap.len());

    Ok(SitemapOutcome {
        path: ctx.sitemap_path.clone(),
        urls: sitemap.len(),
    })
}
