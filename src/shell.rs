// ============================================================================
// DOCUMENT SHELL - fixed page metadata, identical on every page
// ============================================================================

use wasm_bindgen::JsValue;

pub const SITE_TITLE: &str = "Share Me | Documentation";
pub const SITE_DESCRIPTION: &str = "Share images and videos on your own private server.";
pub const VIEWPORT: &str = "width=device-width, initial-scale=1";
pub const FAVICON: &str = "/share-me/favicon.ico";

#[derive(Debug, Clone, PartialEq)]
pub enum HeadTag {
    Title(String),
    /// `<meta {attribute}="{key}" content="{content}">`
    Meta {
        attribute: &'static str,
        key: &'static str,
        content: String,
    },
    Link {
        rel: &'static str,
        href: String,
    },
}

impl HeadTag {
    fn property(key: &'static str, content: &str) -> Self {
        HeadTag::Meta {
            attribute: "property",
            key,
            content: content.to_string(),
        }
    }

    fn name(key: &'static str, content: &str) -> Self {
        HeadTag::Meta {
            attribute: "name",
            key,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub favicon: String,
    /// Emitted as `og:url` when set; off by default
    pub canonical_url: Option<String>,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: SITE_TITLE.to_string(),
            description: SITE_DESCRIPTION.to_string(),
            favicon: FAVICON.to_string(),
            canonical_url: None,
        }
    }
}

impl PageMeta {
    pub fn head_tags(&self) -> Vec<HeadTag> {
        let mut tags = vec![
            HeadTag::Title(self.title.clone()),
            HeadTag::property("og:title", &self.title),
            HeadTag::name("description", &self.description),
        ];
        if let Some(url) = &self.canonical_url {
            tags.push(HeadTag::property("og:url", url));
        }
        tags.extend([
            HeadTag::property("og:type", "summary"),
            HeadTag::property("twitter:card", "summary"),
            HeadTag::property("twitter:title", &self.title),
            HeadTag::property("twitter:description", &self.description),
            HeadTag::name("viewport", VIEWPORT),
            HeadTag::Link {
                rel: "icon",
                href: self.favicon.clone(),
            },
        ]);
        tags
    }
}

/// Writes the metadata into the live `<head>`; the client renders without SSR
pub fn install_head(meta: &PageMeta) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;

    for tag in meta.head_tags() {
        match tag {
            HeadTag::Title(title) => document.set_title(&title),
            HeadTag::Meta {
                attribute,
                key,
                content,
            } => {
                let element = document.create_element("meta")?;
                element.set_attribute(attribute, key)?;
                element.set_attribute("content", &content)?;
                head.append_child(&element)?;
            }
            HeadTag::Link { rel, href } => {
                let element = document.create_element("link")?;
                element.set_attribute("rel", rel)?;
                element.set_attribute("href", &href)?;
                head.append_child(&element)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(tags: &[HeadTag], wanted: &str) -> Option<String> {
        tags.iter().find_map(|tag| match tag {
            HeadTag::Meta { key, content, .. } if *key == wanted => Some(content.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_default_tags() {
        let tags = PageMeta::default().head_tags();

        assert_eq!(tags[0], HeadTag::Title("Share Me | Documentation".to_string()));
        assert_eq!(content_of(&tags, "og:title").as_deref(), Some(SITE_TITLE));
        assert_eq!(content_of(&tags, "description").as_deref(), Some(SITE_DESCRIPTION));
        assert_eq!(content_of(&tags, "og:type").as_deref(), Some("summary"));
        assert_eq!(content_of(&tags, "twitter:card").as_deref(), Some("summary"));
        assert_eq!(content_of(&tags, "twitter:title").as_deref(), Some(SITE_TITLE));
        assert_eq!(content_of(&tags, "twitter:description").as_deref(), Some(SITE_DESCRIPTION));
        assert_eq!(content_of(&tags, "viewport").as_deref(), Some(VIEWPORT));
        assert_eq!(
            tags.last(),
            Some(&HeadTag::Link {
                rel: "icon",
                href: "/share-me/favicon.ico".to_string()
            })
        );
    }

    #[test]
    fn test_canonical_url_is_off_by_default() {
        let tags = PageMeta::default().head_tags();
        assert_eq!(content_of(&tags, "og:url"), None);
        assert_eq!(tags.len(), 9);
    }

    #[test]
    fn test_canonical_url_when_set() {
        let meta = PageMeta {
            canonical_url: Some("https://example.com/share-me".to_string()),
            ..PageMeta::default()
        };
        let tags = meta.head_tags();

        assert_eq!(content_of(&tags, "og:url").as_deref(), Some("https://example.com/share-me"));
        assert_eq!(tags.len(), 10);
    }

    #[test]
    fn test_description_uses_name_attribute() {
        let tags = PageMeta::default().head_tags();
        assert!(tags.contains(&HeadTag::Meta {
            attribute: "name",
            key: "description",
            content: SITE_DESCRIPTION.to_string(),
        }));
    }
}
