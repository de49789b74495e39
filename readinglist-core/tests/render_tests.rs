//! Integration tests for the listing render pipeline

use readinglist_core::{
    default_dispatcher, listing_fragments, render_listing, BookDraft, DisplayConfig,
    EntryFragment, EntryStore, HookStage, ImageSize, MediaLibrary, MemoryStore, Platform,
    ResolvedImage, WrapperAttributes, BOOK_TYPE, LISTING_BLOCK,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// Platform with hooks fired and the media library holding one medium image
async fn create_platform() -> (Platform, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let mut library = MediaLibrary::new();
    library.insert(
        "img1",
        ImageSize::Medium,
        ResolvedImage::new("https://media.example/img1-medium.jpg").with_dimensions(300, 200),
    );

    let mut platform = Platform::new(store.clone(), Arc::new(library));
    let dispatcher = default_dispatcher();
    dispatcher.fire(HookStage::Init, &mut platform).await.unwrap();
    dispatcher.fire(HookStage::RestInit, &mut platform).await.unwrap();

    (platform, store)
}

/// Seed the two-book scenario: Dune without an image, Foundation with one
async fn seed_books(store: &MemoryStore) {
    store
        .create_entry(
            BOOK_TYPE,
            BookDraft::new("Dune").with_body("<p>He who controls the spice.</p>"),
        )
        .await
        .unwrap();
    store
        .create_entry(
            BOOK_TYPE,
            BookDraft::new("Foundation")
                .with_body("<p>Psychohistory.</p>")
                .with_image("img1"),
        )
        .await
        .unwrap();
}

async fn render(platform: &Platform, attributes: serde_json::Value) -> String {
    platform
        .blocks
        .render(LISTING_BLOCK, &attributes, &WrapperAttributes::new())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_default_config_renders_titles_only() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let output = render(&platform, json!({})).await;

    assert!(output.contains("<h2>Dune</h2>"));
    assert!(output.contains("<h2>Foundation</h2>"));
    assert!(!output.contains("<img"));
    assert!(!output.contains("spice"));
    assert!(!output.contains("Psychohistory"));
}

#[tokio::test]
async fn test_show_image_scenario() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let output = render(&platform, json!({"showImage": true, "showContent": false})).await;

    // Both titles, exactly one image (Dune has no reference), no body text
    assert!(output.contains("<h2>Dune</h2>"));
    assert!(output.contains("<h2>Foundation</h2>"));
    assert_eq!(output.matches("<img").count(), 1);
    assert!(output.contains(r#"src="https://media.example/img1-medium.jpg""#));
    assert!(!output.contains("spice"));
    assert!(!output.contains("Psychohistory"));
}

#[tokio::test]
async fn test_show_content_includes_body_markup() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let output = render(&platform, json!({"showContent": true})).await;

    assert!(output.contains("<p>He who controls the spice.</p>"));
    assert!(output.contains("<p>Psychohistory.</p>"));
    assert!(!output.contains("<img"));
}

#[tokio::test]
async fn test_unresolvable_image_is_omitted() {
    let (platform, store) = create_platform().await;
    store
        .create_entry(BOOK_TYPE, BookDraft::new("Hyperion").with_image("img9"))
        .await
        .unwrap();

    let output = render(&platform, json!({"showImage": true})).await;

    assert!(output.contains("<h2>Hyperion</h2>"));
    assert!(!output.contains("<img"));
}

#[tokio::test]
async fn test_empty_store_renders_bare_container() {
    let (platform, _store) = create_platform().await;

    let output = render(&platform, json!({"showImage": true, "showContent": true})).await;

    assert_eq!(output, "<div></div>");
}

#[tokio::test]
async fn test_unknown_block_renders_empty_string() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let output = platform
        .blocks
        .render("gallery/slideshow", &json!({}), &WrapperAttributes::new())
        .await
        .unwrap();

    assert_eq!(output, "");
}

#[tokio::test]
async fn test_render_is_idempotent_against_unchanged_store() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let attributes = json!({"showImage": true, "showContent": true});
    let first = render(&platform, attributes.clone()).await;
    let second = render(&platform, attributes).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_enabling_content_is_monotonic() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let without = render(&platform, json!({"showImage": true})).await;
    let with = render(&platform, json!({"showImage": true, "showContent": true})).await;

    // Same titles and images, body fragments added
    for needle in ["<h2>Dune</h2>", "<h2>Foundation</h2>"] {
        assert!(without.contains(needle));
        assert!(with.contains(needle));
    }
    assert_eq!(without.matches("<img").count(), with.matches("<img").count());
    assert!(!without.contains("Psychohistory"));
    assert!(with.contains("Psychohistory"));
}

#[tokio::test]
async fn test_wrapper_attributes_land_on_the_container() {
    let (platform, store) = create_platform().await;
    seed_books(&store).await;

    let wrapper: WrapperAttributes = [("class", "wp-block-reading-list")].into_iter().collect();
    let output = platform
        .blocks
        .render(LISTING_BLOCK, &json!({}), &wrapper)
        .await
        .unwrap();

    assert!(output.starts_with(r#"<div class="wp-block-reading-list">"#));
    assert!(output.ends_with("</div>"));
}

#[tokio::test]
async fn test_entries_keep_store_order() {
    let (platform, store) = create_platform().await;
    for title in ["Ubik", "Valis", "Solaris"] {
        store.create_entry(BOOK_TYPE, BookDraft::new(title)).await.unwrap();
    }

    let output = render(&platform, json!({})).await;

    let ubik = output.find("Ubik").unwrap();
    let valis = output.find("Valis").unwrap();
    let solaris = output.find("Solaris").unwrap();
    assert!(ubik < valis && valis < solaris);
}

#[tokio::test]
async fn test_fragments_gate_sections_without_a_store() {
    let mut library = MediaLibrary::new();
    library.insert(
        "img1",
        ImageSize::Medium,
        ResolvedImage::new("https://media.example/img1-medium.jpg"),
    );

    let entries = vec![
        readinglist_core::BookEntry {
            id: uuid::Uuid::new_v4(),
            title: "Foundation".to_string(),
            body: Some("<p>Psychohistory.</p>".to_string()),
            image: Some("img1".into()),
            created_at: chrono::Utc::now(),
        },
    ];

    let fragments =
        listing_fragments(DisplayConfig::new(true, false), &entries, &library).await;
    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].image.is_some());
    assert!(fragments[0].body.is_none());

    let fragments =
        listing_fragments(DisplayConfig::default(), &entries, &library).await;
    assert!(fragments[0].image.is_none());
    assert!(fragments[0].body.is_none());
}

proptest! {
    /// Every title shows up in the output and sections only appear when a
    /// fragment carries them
    #[test]
    fn prop_titles_always_render(
        titles in proptest::collection::vec("[a-zA-Z0-9 ]{1,20}", 0..8),
        with_body in any::<bool>(),
    ) {
        let fragments: Vec<EntryFragment> = titles
            .iter()
            .map(|title| {
                let mut fragment = EntryFragment::new(title.clone());
                if with_body {
                    fragment.body = Some("<p>body</p>".to_string());
                }
                fragment
            })
            .collect();

        let output = render_listing(&WrapperAttributes::new(), &fragments).unwrap();

        for title in &titles {
            let expected_heading = format!("<h2>{}</h2>", title);
            prop_assert!(output.contains(&expected_heading));
        }
        prop_assert!(!output.contains("<img"));
        prop_assert_eq!(output.matches("<p>body</p>").count(), if with_body { titles.len() } else { 0 });

        // Joining the same fragments again is byte-identical
        let again = render_listing(&WrapperAttributes::new(), &fragments).unwrap();
        prop_assert_eq!(output, again);
    }
}
