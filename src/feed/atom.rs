//! Atom 1.0 rendering.

use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, FeedBuilder, GeneratorBuilder, Link, LinkBuilder, Person,
    PersonBuilder, Text, WriteConfig,
};

use super::{entry_timestamp, feed_updated, FeedEntry, FeedMetadata, INDENT_SIZE};

pub(super) fn render(
    meta: &FeedMetadata,
    title: &str,
    entries: &[FeedEntry],
) -> Result<Vec<u8>, atom_syndication::Error> {
    let person = author(meta);

    let links = vec![
        link(meta.self_link(), "self"),
        link(meta.url.clone(), "alternate"),
    ];

    let generator = meta.generator.as_ref().map(|name| {
        GeneratorBuilder::default()
            .value(name.clone())
            .version(meta.generator_version.clone())
            .build()
    });

    let feed = FeedBuilder::default()
        .title(Text::plain(title))
        .id(meta.feed_id())
        .updated(feed_updated(entries).fixed_offset())
        .authors(vec![person.clone()])
        .contributors(vec![person.clone()])
        .links(links)
        .generator(generator)
        .logo(meta.logo.clone())
        .icon(meta.icon.clone())
        .subtitle(meta.description.clone().map(Text::plain))
        .lang(meta.language.clone())
        .entries(
            entries
                .iter()
                .map(|entry| to_entry(entry, &person))
                .collect::<Vec<_>>(),
        )
        .build();

    feed.write_with_config(
        Vec::new(),
        WriteConfig {
            write_document_declaration: true,
            indent_size: Some(INDENT_SIZE),
        },
    )
}

fn to_entry(entry: &FeedEntry, person: &Person) -> Entry {
    let timestamp = entry_timestamp(entry.date).fixed_offset();

    EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(entry.id.clone())
        .links(vec![link(entry.link.clone(), "alternate")])
        .authors(vec![person.clone()])
        .contributors(vec![person.clone()])
        .summary(Some(Text::plain(entry.summary.clone())))
        .content(Some(
            ContentBuilder::default()
                .value(Some(entry.content.clone()))
                .content_type(Some("html".to_string()))
                .build(),
        ))
        .published(Some(timestamp))
        .updated(timestamp)
        .build()
}

fn author(meta: &FeedMetadata) -> Person {
    PersonBuilder::default()
        .name(meta.name.clone())
        .email(Some(meta.email.clone()))
        .build()
}

fn link(href: String, rel: &str) -> Link {
    LinkBuilder::default().href(href).rel(rel.to_string()).build()
}
