//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/") // -> "/portfolio/blog/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Encode a single URL path segment
pub fn encode_url(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, percent_encoding::NON_ALPHANUMERIC).to_string()
}

/// Path of a blog post page, e.g. `/blog/my-post/`
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    let blog_dir = config.blog_dir.trim_matches('/');
    let slug = if is_url_safe(slug) {
        slug.to_string()
    } else {
        encode_url(slug)
    };

    if blog_dir.is_empty() {
        url_for(config, &format!("{}/", slug))
    } else {
        url_for(config, &format!("{}/{}/", blog_dir, slug))
    }
}

fn is_url_safe(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog/"), "/site/blog/");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/site/blog/"
        );
    }

    #[test]
    fn test_post_path() {
        let config = test_config();
        assert_eq!(
            post_path(&config, "designing-effective-user-experiences"),
            "/site/blog/designing-effective-user-experiences/"
        );
    }

    #[test]
    fn test_post_path_encodes_unsafe_slug() {
        let config = SiteConfig::default();
        assert_eq!(post_path(&config, "a b"), "/blog/a%20b/");
    }
}
