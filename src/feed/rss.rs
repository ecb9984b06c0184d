//! RSS 2.0 rendering.

use std::collections::BTreeMap;

use rss::extension::atom::AtomExtensionBuilder;
use rss::{ChannelBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder};

use super::{entry_timestamp, feed_updated, FeedEntry, FeedMetadata, INDENT_SIZE};

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub(super) fn render(
    meta: &FeedMetadata,
    title: &str,
    entries: &[FeedEntry],
) -> Result<Vec<u8>, rss::Error> {
    let mut namespaces = BTreeMap::new();
    namespaces.insert("atom".to_string(), ATOM_NAMESPACE.to_string());
    namespaces.insert("content".to_string(), CONTENT_NAMESPACE.to_string());

    let self_link = atom_syndication::LinkBuilder::default()
        .href(meta.self_link())
        .rel("self".to_string())
        .mime_type(Some("application/rss+xml".to_string()))
        .build();

    let image = meta.logo.as_ref().map(|logo| {
        ImageBuilder::default()
            .url(logo.clone())
            .title(title)
            .link(meta.url.clone())
            .build()
    });

    // RSS requires a channel description
    let description = meta
        .description
        .clone()
        .unwrap_or_else(|| title.to_string());

    let author = meta.rss_author();
    let items: Vec<Item> = entries.iter().map(|entry| to_item(entry, &author)).collect();

    let channel = ChannelBuilder::default()
        .namespaces(namespaces)
        .title(title)
        .link(meta.url.clone())
        .description(description)
        .language(meta.language.clone())
        .managing_editor(Some(meta.email.clone()))
        .webmaster(Some(meta.email.clone()))
        .generator(meta.generator_label())
        .image(image)
        .last_build_date(Some(feed_updated(entries).to_rfc2822()))
        .atom_ext(Some(
            AtomExtensionBuilder::default()
                .links(vec![self_link])
                .build(),
        ))
        .items(items)
        .build();

    channel.pretty_write_to(Vec::new(), b' ', INDENT_SIZE)
}

fn to_item(entry: &FeedEntry, author: &str) -> Item {
    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(Some(entry.link.clone()))
        .guid(Some(
            GuidBuilder::default()
                .value(entry.id.clone())
                .permalink(true)
                .build(),
        ))
        .author(Some(author.to_string()))
        .description(Some(entry.summary.clone()))
        .content(Some(entry.content.clone()))
        .pub_date(Some(entry_timestamp(entry.date).to_rfc2822()))
        .build()
}
