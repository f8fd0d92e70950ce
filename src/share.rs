//! Share links for recipe pages

/// Public URL of a recipe's guest page
pub fn recipe_page_url(site_url: &str, id: u64) -> String {
    format!("{}/resep/{}", site_url.trim_end_matches('/'), id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    /// The page itself, for copying
    pub copy: String,
    pub whatsapp: String,
    pub facebook: String,
}

impl ShareLinks {
    pub fn for_page(page_url: &str) -> Self {
        let encoded = urlencoding::encode(page_url);
        Self {
            copy: page_url.to_string(),
            whatsapp: format!("https://wa.me/?text={}", encoded),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded),
        }
    }

    /// `(label, url)` pairs in display order
    pub fn entries(&self) -> [(&str, &str); 3] {
        [
            ("Copy link", self.copy.as_str()),
            ("WhatsApp", self.whatsapp.as_str()),
            ("Facebook", self.facebook.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_page_url() {
        assert_eq!(recipe_page_url("http://localhost:5173/", 12), "http://localhost:5173/resep/12");
    }

    #[test]
    fn test_share_links_are_encoded() {
        let links = ShareLinks::for_page("http://localhost:5173/resep/12");
        assert_eq!(links.copy, "http://localhost:5173/resep/12");
        assert_eq!(
            links.whatsapp,
            "https://wa.me/?text=http%3A%2F%2Flocalhost%3A5173%2Fresep%2F12"
        );
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=http%3A%2F%2Flocalhost%3A5173%2Fresep%2F12"
        );
        assert_eq!(links.entries()[1].0, "WhatsApp");
    }
}
