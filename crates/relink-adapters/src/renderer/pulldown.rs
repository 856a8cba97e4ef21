//! pulldown-cmark renderer with resolver-driven link rewriting.

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::{FmtWriter, escape_href, escape_html};
use relink_core::{
    application::ports::MarkdownRenderer,
    domain::{LinkKind, LinkNode, LinkStatus, ResolvedLink},
    error::{Context, RelinkResult},
};
use tracing::{debug, instrument};
use url::Url;

const BROKEN_LINK_CLASS: &str = "broken-link";

/// Markdown renderer built on pulldown-cmark.
///
/// Links and images are rewritten with the resolver's answer. Links that
/// carry extra attributes, or were resolved as invalid, are written as raw
/// HTML since pulldown-cmark tags have no attribute slot.
#[derive(Debug, Clone)]
pub struct PulldownRenderer {
    options: Options,
}

impl PulldownRenderer {
    /// Create a renderer with tables, footnotes, strikethrough, task lists,
    /// heading attributes and wiki links enabled.
    pub fn new() -> Self {
        Self::with_options(
            Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_HEADING_ATTRIBUTES
                | Options::ENABLE_WIKILINKS,
        )
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for PulldownRenderer {
    #[instrument(skip_all, fields(bytes = markdown.len()))]
    fn render(
        &self,
        markdown: &str,
        resolve: &mut dyn FnMut(&LinkNode) -> ResolvedLink,
    ) -> RelinkResult<String> {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();
        let events = rewrite_links(events, resolve)?;

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }
}

fn rewrite_links<'a>(
    events: Vec<Event<'a>>,
    resolve: &mut dyn FnMut(&LinkNode) -> ResolvedLink,
) -> RelinkResult<Vec<Event<'a>>> {
    let mut out = Vec::with_capacity(events.len());
    // One entry per open link: true when its opening tag was written as raw HTML.
    let mut raw_links: Vec<bool> = Vec::new();
    let mut resolved = 0usize;

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let end = closing_index(&events, i);
                let node = LinkNode::new(link_kind(*link_type), dest_url.to_string())
                    .with_title(title.to_string())
                    .with_reference(id.to_string())
                    .with_text(inner_text(&events[i + 1..end]));
                let link = resolve(&node);
                resolved += 1;

                if needs_raw_html(&link) {
                    out.push(Event::InlineHtml(open_anchor(&link)?.into()));
                    raw_links.push(true);
                } else {
                    out.push(Event::Start(Tag::Link {
                        link_type: *link_type,
                        dest_url: link.url.into(),
                        title: link.title.into(),
                        id: id.clone(),
                    }));
                    raw_links.push(false);
                }
            }
            Event::End(TagEnd::Link) => {
                if raw_links.pop() == Some(true) {
                    out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                } else {
                    out.push(Event::End(TagEnd::Link));
                }
            }
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let end = closing_index(&events, i);
                let node = LinkNode::new(LinkKind::Image, dest_url.to_string())
                    .with_title(title.to_string())
                    .with_reference(id.to_string())
                    .with_text(inner_text(&events[i + 1..end]));
                let link = resolve(&node);
                resolved += 1;

                if needs_raw_html(&link) {
                    // The alt text is baked into the tag, skip the inner events.
                    out.push(Event::InlineHtml(image_tag(&link, &node.text)?.into()));
                    i = end + 1;
                    continue;
                }
                out.push(Event::Start(Tag::Image {
                    link_type: *link_type,
                    dest_url: link.url.into(),
                    title: link.title.into(),
                    id: id.clone(),
                }));
            }
            other => out.push(other.clone()),
        }
        i += 1;
    }

    debug!(links = resolved, "Links rewritten");
    Ok(out)
}

fn link_kind(link_type: LinkType) -> LinkKind {
    match link_type {
        LinkType::Inline => LinkKind::Link,
        LinkType::Autolink => LinkKind::Autolink,
        LinkType::Email => LinkKind::Email,
        LinkType::WikiLink { .. } => LinkKind::WikiLink,
        _ => LinkKind::Reference,
    }
}

/// Index of the `End` event that closes the `Start` at `start`.
fn closing_index(events: &[Event<'_>], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, event) in events[start..].iter().enumerate() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return start + offset;
                }
            }
            _ => {}
        }
    }
    events.len()
}

fn inner_text(events: &[Event<'_>]) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Text(text) | Event::Code(text) => Some(text.as_ref()),
            Event::SoftBreak | Event::HardBreak => Some(" "),
            _ => None,
        })
        .collect()
}

fn needs_raw_html(link: &ResolvedLink) -> bool {
    !link.attributes.is_empty() || link.status == LinkStatus::Invalid
}

fn open_anchor(link: &ResolvedLink) -> RelinkResult<String> {
    let mut tag = String::from("<a href=\"");
    // Email autolinks carry the bare address; the plain writer adds the scheme.
    if link.kind == LinkKind::Email && Url::parse(&link.url).is_err() {
        tag.push_str("mailto:");
    }
    escape_href(FmtWriter(&mut tag), &link.url).context("escaping link href")?;
    tag.push('"');
    push_common_attributes(&mut tag, link)?;
    tag.push('>');
    Ok(tag)
}

fn image_tag(link: &ResolvedLink, alt: &str) -> RelinkResult<String> {
    let mut tag = String::from("<img src=\"");
    escape_href(FmtWriter(&mut tag), &link.url).context("escaping image src")?;
    tag.push('"');
    push_attribute(&mut tag, "alt", alt)?;
    push_common_attributes(&mut tag, link)?;
    tag.push_str(" />");
    Ok(tag)
}

fn push_common_attributes(tag: &mut String, link: &ResolvedLink) -> RelinkResult<()> {
    if !link.title.is_empty() {
        push_attribute(tag, "title", &link.title)?;
    }
    if link.status == LinkStatus::Invalid && !link.attributes.contains_key("class") {
        push_attribute(tag, "class", BROKEN_LINK_CLASS)?;
    }
    for (key, value) in &link.attributes {
        if matches!(key.as_str(), "href" | "src" | "alt" | "title") {
            continue;
        }
        push_attribute(tag, key, value)?;
    }
    Ok(())
}

fn push_attribute(tag: &mut String, key: &str, value: &str) -> RelinkResult<()> {
    tag.push(' ');
    escape_html(FmtWriter(&mut *tag), key).context("escaping attribute name")?;
    tag.push_str("=\"");
    escape_html(FmtWriter(&mut *tag), value).context("escaping attribute value")?;
    tag.push('"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_with(
        markdown: &str,
        mut resolve: impl FnMut(&LinkNode) -> ResolvedLink,
    ) -> String {
        PulldownRenderer::new().render(markdown, &mut resolve).unwrap()
    }

    fn collect_nodes(markdown: &str) -> Vec<LinkNode> {
        let mut nodes = Vec::new();
        render_with(markdown, |node| {
            nodes.push(node.clone());
            ResolvedLink::unresolved(node)
        });
        nodes
    }

    #[test]
    fn unresolved_links_render_as_written() {
        let html = render_with("[Guide](guide.md \"The guide\")", ResolvedLink::unresolved);
        assert_eq!(html, "<p><a href=\"guide.md\" title=\"The guide\">Guide</a></p>\n");
    }

    #[test]
    fn resolved_url_replaces_destination() {
        let html = render_with("see [the *guide*](guide.md)", |node| {
            ResolvedLink::unresolved(node).with_url("/docs/guide.html")
        });
        assert_eq!(
            html,
            "<p>see <a href=\"/docs/guide.html\">the <em>guide</em></a></p>\n"
        );
    }

    #[test]
    fn nodes_carry_kind_text_and_reference() {
        let nodes = collect_nodes(
            "[inline](a.md) [ref][r] <https://x.org> [[Wiki Page]] ![alt `code`](i.png)\n\n[r]: b.md \"B\"\n",
        );
        let kinds: Vec<_> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LinkKind::Link,
                LinkKind::Reference,
                LinkKind::Autolink,
                LinkKind::WikiLink,
                LinkKind::Image
            ]
        );
        assert_eq!(nodes[0].text, "inline");
        assert_eq!(nodes[1].destination, "b.md");
        assert_eq!(nodes[1].title, "B");
        assert_eq!(nodes[1].reference, "r");
        assert_eq!(nodes[3].destination, "Wiki Page");
        assert_eq!(nodes[4].text, "alt code");
    }

    #[test]
    fn attributes_force_raw_anchor() {
        let html = render_with("[ext](https://x.org/?a=1&b=2)", |node| {
            ResolvedLink::unresolved(node)
                .with_status(LinkStatus::Valid)
                .with_attribute("rel", "noopener \"x\"")
        });
        assert_eq!(
            html,
            "<p><a href=\"https://x.org/?a=1&amp;b=2\" rel=\"noopener &quot;x&quot;\">ext</a></p>\n"
        );
    }

    #[test]
    fn invalid_links_get_broken_class() {
        let html = render_with("[gone](gone.md)", |node| {
            ResolvedLink::unresolved(node).with_status(LinkStatus::Invalid)
        });
        assert!(html.contains("<a href=\"gone.md\" class=\"broken-link\">gone</a>"));
    }

    #[test]
    fn raw_email_anchors_keep_mailto_scheme() {
        let plain = render_with("<team@example.org>", ResolvedLink::unresolved);
        assert!(plain.contains(r#"href="mailto:team@example.org""#));

        let tagged = render_with("<team@example.org>", |node| {
            ResolvedLink::unresolved(node).with_attribute("rel", "x")
        });
        assert!(tagged.contains(r#"<a href="mailto:team@example.org" rel="x">"#));

        let invalid = render_with("<team@example.org>", |node| {
            ResolvedLink::unresolved(node).with_status(LinkStatus::Invalid)
        });
        assert!(invalid.contains(r#"<a href="mailto:team@example.org" class="broken-link">"#));

        let explicit = render_with("<team@example.org>", |node| {
            ResolvedLink::unresolved(node)
                .with_url("mailto:ops@example.org")
                .with_attribute("rel", "x")
        });
        assert!(explicit.contains(r#"href="mailto:ops@example.org""#));
        assert!(!explicit.contains("mailto:mailto:"));
    }

    #[test]
    fn images_with_attributes_become_img_tags() {
        let html = render_with("![A & B](pic.png \"T\")", |node| {
            ResolvedLink::unresolved(node).with_attribute("width", "40")
        });
        assert_eq!(
            html,
            "<p><img src=\"pic.png\" alt=\"A &amp; B\" title=\"T\" width=\"40\" /></p>\n"
        );
    }

    #[test]
    fn image_inside_link_resolves_both() {
        let nodes = collect_nodes("[![badge](b.svg)](https://ci.example.org)");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, LinkKind::Link);
        assert_eq!(nodes[0].text, "badge");
        assert_eq!(nodes[1].kind, LinkKind::Image);
    }

    #[test]
    fn documents_without_links_never_call_resolver() {
        let html = render_with("# Title\n\nplain *text*", |_| unreachable!());
        assert_eq!(html, "<h1>Title</h1>\n<p>plain <em>text</em></p>\n");
    }
}
