//! Integration tests for relink-adapters: the real renderer and the
//! built-in extensions driven through `RenderService`.

use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use relink_adapters::{
    FnResolverFactory, PulldownRenderer, ResolverSettings,
    builtin::{self, BASE_URL_PROPERTY},
    documents,
};
use relink_core::{
    application::{ApplicationError, ports::LinkResolverFactory},
    prelude::*,
};
use tempfile::TempDir;

fn service(settings: &ResolverSettings) -> RenderService {
    RenderService::with_extensions(
        Box::new(PulldownRenderer::new()),
        builtin::factories(settings),
    )
    .unwrap()
}

#[test]
fn builtin_pipeline_rewrites_every_kind_of_link() {
    let settings = ResolverSettings {
        base_url: Some("https://docs.example.org/v1/".into()),
        wiki_prefix: "wiki/".into(),
        ..Default::default()
    };
    let markdown = "\
See [the guide](guide.md#setup), [[Getting Started]] and [Rust](https://www.rust-lang.org).

![logo](img/logo.png)

Jump to [the top](#top) or [mail us](mailto:team@example.org).
";

    let html = service(&settings)
        .render(markdown, &ResolverContext::new().with_document("docs/index.md"))
        .unwrap();

    assert!(html.contains(r#"<a href="https://docs.example.org/v1/guide.html#setup">the guide</a>"#));
    assert!(html.contains(r#"href="https://docs.example.org/v1/wiki/getting-started.html""#));
    assert!(html.contains(r#"<a href="https://www.rust-lang.org">Rust</a>"#));
    assert!(html.contains(r#"<img src="https://docs.example.org/v1/img/logo.png" alt="logo" />"#));
    assert!(html.contains(r##"<a href="#top">the top</a>"##));
    assert!(html.contains(r#"<a href="mailto:team@example.org">mail us</a>"#));
}

#[test]
fn context_base_url_wins_over_settings() {
    let settings = ResolverSettings {
        base_url: Some("https://old.example.org/".into()),
        ..Default::default()
    };
    let ctx = ResolverContext::new().with_property(BASE_URL_PROPERTY, "https://new.example.org/");

    let html = service(&settings).render("[a](a.md)", &ctx).unwrap();

    assert_eq!(html, "<p><a href=\"https://new.example.org/a.html\">a</a></p>\n");
}

#[test]
fn relative_links_stay_relative_without_base() {
    let html = service(&ResolverSettings::default())
        .render("[a](../a.md) [[Home]]", &ResolverContext::new())
        .unwrap();

    assert!(html.contains(r#"<a href="../a.html">a</a>"#));
    assert!(html.contains(r#"href="home.html""#));
}

#[test]
fn unresolvable_wiki_links_render_as_broken() {
    let html = service(&ResolverSettings::default())
        .render("[[!!!]]", &ResolverContext::new())
        .unwrap();

    assert!(html.contains(r#"class="broken-link""#));
}

#[test]
fn invalid_base_url_fails_the_pass() {
    let settings = ResolverSettings {
        base_url: Some("relative/only".into()),
        ..Default::default()
    };
    let err = service(&settings)
        .render("[a](a.md)", &ResolverContext::new())
        .unwrap_err();

    assert!(matches!(
        err,
        RelinkError::Domain(relink_core::domain::DomainError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn custom_extension_ahead_of_builtins_settles_links_first() {
    let settings = ResolverSettings {
        base_url: Some("https://docs.example.org/".into()),
        ..Default::default()
    };
    let mut factories = vec![
        FnResolverFactory::new("external-marker", |_| {
            Ok(|_: &LinkNode, _: &ResolverContext, link: ResolvedLink| {
                if link.url.starts_with("https://") {
                    link.with_status(LinkStatus::Unchecked)
                        .with_attribute("rel", "external")
                } else {
                    link
                }
            })
        })
        .before(builtin::BASE_URL)
        .into_shared(),
    ];
    factories.extend(builtin::factories(&settings));
    let service =
        RenderService::with_extensions(Box::new(PulldownRenderer::new()), factories).unwrap();

    let html = service
        .render("[x](https://x.org) [y](y.md)", &ResolverContext::new())
        .unwrap();

    assert!(html.contains(r#"<a href="https://x.org" rel="external">x</a>"#));
    assert!(html.contains(r#"<a href="https://docs.example.org/y.html">y</a>"#));
}

#[test]
fn misordered_builtins_are_rejected_at_render() {
    let mut factories = builtin::factories(&ResolverSettings::default());
    factories.reverse();
    let service =
        RenderService::with_extensions(Box::new(PulldownRenderer::new()), factories).unwrap();

    let err = service.render("[a](a.md)", &ResolverContext::new()).unwrap_err();

    assert!(matches!(
        err,
        RelinkError::Application(ApplicationError::OrderingViolation { .. })
    ));
}

/// A factory declared to run before an emphasis extension, whose resolver
/// sends every link to one fixed page.
#[test]
fn adapter_scenario_with_before_dependency() {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);
    let factory = FnResolverFactory::with_dependents(
        "example-extension",
        BTreeSet::new(),
        BTreeSet::from([ExtensionId::from("emphasis-extension-id")]),
        false,
        move |ctx: &ResolverContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            let target = ctx.property("target").unwrap_or("foo").to_string();
            Ok(move |_: &LinkNode, _: &ResolverContext, link: ResolvedLink| {
                link.with_url(format!("https://example.org/{target}"))
                    .with_status(LinkStatus::Valid)
            })
        },
    );

    assert!(factory.after_dependents().is_empty());
    assert_eq!(
        factory.before_dependents(),
        &BTreeSet::from([ExtensionId::from("emphasis-extension-id")])
    );
    assert!(!factory.affects_global_scope());

    let mut service = RenderService::new(Box::new(PulldownRenderer::new()));
    service.register(factory.into_shared()).unwrap();
    let ctx = ResolverContext::new().with_property("target", "foo");

    let first = service.render("[anything](somewhere.md)", &ctx).unwrap();
    let second = service.render("![pic](pic.png)", &ctx).unwrap();

    assert_eq!(
        first,
        "<p><a href=\"https://example.org/foo\">anything</a></p>\n"
    );
    assert!(second.contains(r#"src="https://example.org/foo""#));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[test]
fn renders_a_document_tree() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("guide")).unwrap();
    fs::write(src.path().join("index.md"), "[Intro](guide/intro.md)").unwrap();
    fs::write(src.path().join("guide/intro.md"), "[Back](../index.md)").unwrap();

    let service = service(&ResolverSettings::default());
    for doc in documents::collect(src.path()).unwrap() {
        let markdown = fs::read_to_string(&doc).unwrap();
        let html = service
            .render(&markdown, &ResolverContext::new().with_document(&doc))
            .unwrap();
        let target = documents::html_path(src.path(), &doc, out.path());
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(target, html).unwrap();
    }

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    let intro = fs::read_to_string(out.path().join("guide/intro.html")).unwrap();
    assert!(index.contains(r#"href="guide/intro.html""#));
    assert!(intro.contains(r#"href="../index.html""#));
}
