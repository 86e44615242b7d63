/// Fixed table of Times of India RSS categories. The feed ids are opaque
/// tokens assigned by the publisher; the set is compiled in and immutable.
pub fn feed_id(category: &str) -> Option<&'static str> {
    match category {
        "top" => Some("rssfeedstopstories"),
        "india" => Some("-2128936835"),
        "world" => Some("296589292"),
        "business" => Some("1898055"),
        "sports" => Some("4719148"),
        "technology" => Some("66949542"),
        "entertainment" => Some("1081479906"),
        "lifestyle" => Some("2886704"),
        "education" => Some("913168846"),
        "environment" => Some("2647163"),
        "science" => Some("3908999"),
        _ => None,
    }
}

pub fn feed_url(base_url: &str, feed_id: &str) -> String {
    format!("{}/{}.cms", base_url.trim_end_matches('/'), feed_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve() {
        for cat in [
            "top",
            "india",
            "world",
            "business",
            "sports",
            "technology",
            "entertainment",
            "lifestyle",
            "education",
            "environment",
            "science",
        ] {
            assert!(feed_id(cat).is_some(), "missing feed id for {cat}");
        }
    }

    #[test]
    fn unknown_category_is_none() {
        assert_eq!(feed_id("bogus"), None);
        assert_eq!(feed_id(""), None);
        // Lookup is case-sensitive; config lowercases before lookup.
        assert_eq!(feed_id("World"), None);
    }

    #[test]
    fn feed_url_joins_base_and_id() {
        assert_eq!(
            feed_url("https://timesofindia.indiatimes.com/rssfeeds", "296589292"),
            "https://timesofindia.indiatimes.com/rssfeeds/296589292.cms"
        );
        assert_eq!(
            feed_url("http://localhost:8080/", "x"),
            "http://localhost:8080/x.cms"
        );
    }
}
