use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    context::{Context, BLOG_INDEX_PATH, POST_PAGE_PATH, POST_QUERY_KEY},
    date::{lastmod, parse_post_date},
    metadata::PostMetadata,
};

/// Characters left as-is in a post id: the RFC 3986 unreserved set plus `/`.
const POST_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: &'static str,
}

impl UrlEntry {
    pub fn home(ctx: &Context, today: NaiveDate) -> Self {
        Self {
            loc: format!("{}/", ctx.site_root()),
            lastmod: lastmod(today),
            changefreq: ChangeFreq::Weekly,
            priority: "1.0",
        }
    }

    pub fn blog_index(ctx: &Context, today: NaiveDate) -> Self {
        Self {
            loc: format!("{}{BLOG_INDEX_PATH}", ctx.site_root()),
            lastmod: lastmod(today),
            changefreq: ChangeFreq::Weekly,
            priority: "0.9",
        }
    }

    pub fn post(ctx: &Context, post: &PostMetadata, today: NaiveDate) -> Self {
        Self {
            loc: post_url(ctx, &post.id),
            lastmod: lastmod(parse_post_date(&post.date).unwrap_or(today)),
            changefreq: ChangeFreq::Monthly,
            priority: "0.8",
        }
    }
}

pub(crate) fn post_url(ctx: &Context, id: &str) -> String {
    format!(
        "{}{POST_PAGE_PATH}?{POST_QUERY_KEY}={}",
        ctx.site_root(),
        utf8_percent_encode(id, POST_ID)
    )
}
