use std::path::PathBuf;

pub(crate) const BLOG_INDEX_PATH: &str = "/blog/blog-index.html";
pub(crate) const POST_PAGE_PATH: &str = "/blog/blog.html";
pub(crate) const POST_QUERY_KEY: &str = "post";

#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub content_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub sitemap_path: PathBuf,

    pub base_url: String,
    pub default_author: String,

    pub calendar_sort: bool,
}

impl Context {
    /// Base URL without trailing slashes, ready for path concatenation.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
