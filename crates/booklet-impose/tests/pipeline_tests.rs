use booklet_impose::layout::*;
use booklet_impose::render::{CoverText, RenderContext, render_booklet};
use booklet_impose::*;
use contact_list::Contact;
use lopdf::Document;

fn scenario_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Alice", "0101010101"),
        Contact::new("Bob", "0202020202"),
        Contact::new("#1 Emergency", "1515151515"),
    ]
}

/// Four contacts under each of five letters
fn twenty_contacts() -> Vec<Contact> {
    let mut contacts = Vec::new();
    for letter in ['A', 'B', 'C', 'D', 'E'] {
        for i in 0..4 {
            contacts.push(Contact::new(
                format!("{}contact {}", letter, i),
                format!("06000000{}{}", letter as u8 - b'A', i),
            ));
        }
    }
    contacts
}

#[test]
fn test_three_contacts_two_panel() {
    let options = BookletOptions {
        topology: FoldTopology::TwoPanel,
        ..Default::default()
    };
    let layout = options.resolve().unwrap();

    let groups = group_contacts(&scenario_contacts());
    let keys: Vec<LetterKey> = groups.keys().copied().collect();
    assert_eq!(
        keys,
        vec![LetterKey::Letter('A'), LetterKey::Letter('B'), LetterKey::Other]
    );

    let half_pages = build_half_pages(&groups, &layout.heights, &layout.rules).unwrap();
    assert_eq!(half_pages.len(), 1);
    assert_eq!(half_pages[0].contact_count(), 3);

    let imposition = plan(half_pages.len(), FoldTopology::TwoPanel);
    assert_eq!(imposition.booklet_pages, 4);
    assert_eq!(imposition.spreads(), vec![(0, 1), (0, 0)]);
}

#[test]
fn test_twenty_contacts_four_panel() {
    let groups = group_contacts(&twenty_contacts());
    assert_eq!(groups.len(), 5);

    // Room for six lines per half-page
    let model = HeightModel {
        heading_height: 10.0,
        gap_height: 5.0,
        line_height: 10.0,
        usable_height: 60.0,
    };
    let half_pages = build_half_pages(&groups, &model, &PaginationRules::default()).unwrap();
    // A heading plus four lines leaves no room for the next group
    assert_eq!(half_pages.len(), 5);
    for page in &half_pages {
        assert_eq!(page.contact_count(), 4);
        assert_eq!(page.used_height, 50.0);
    }

    let imposition = plan(half_pages.len(), FoldTopology::FourPanel);
    assert_eq!(imposition.total_zones(), 8);
    assert_eq!(imposition.physical_sheets(), 1);
    assert_eq!(imposition.sheet_equivalent(), 1.0);

    // Half the room: every group spills onto a second half-page
    let model = HeightModel {
        usable_height: 30.0,
        ..model
    };
    let half_pages = build_half_pages(&groups, &model, &PaginationRules::default()).unwrap();
    assert_eq!(half_pages.len(), 10);

    let imposition = plan(half_pages.len(), FoldTopology::FourPanel);
    assert_eq!(imposition.total_zones(), 12);
    assert_eq!(imposition.physical_sheets(), 2);
    assert_eq!(imposition.sheet_equivalent(), 1.5);
}

#[test]
fn test_rendered_text_matches_contacts() {
    let options = BookletOptions {
        topology: FoldTopology::TwoPanel,
        ..Default::default()
    };
    let layout = options.resolve().unwrap();
    let groups = group_contacts(&scenario_contacts());
    let half_pages = build_half_pages(&groups, &layout.heights, &layout.rules).unwrap();
    let imposition = plan_with(half_pages.len(), layout.topology, &layout.policy);
    let cover = CoverText::new(&options.cover, 3);
    let ctx = RenderContext {
        layout: &layout,
        cover: &cover,
        logo_size: None,
    };

    let sides = render_booklet(&imposition, &half_pages, &ctx);
    assert_eq!(sides.len(), 4);

    let texts: Vec<&str> = sides.iter().flat_map(|s| s.texts()).collect();
    for expected in [
        "A",
        "B",
        "#",
        "Alice",
        "0101010101",
        "#1 Emergency",
        "3 contacts",
        cover.title.as_str(),
    ] {
        assert!(texts.contains(&expected), "missing {:?}", expected);
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let contacts = twenty_contacts();
    for topology in [
        FoldTopology::TwoPanel,
        FoldTopology::FourPanel,
        FoldTopology::EightPanel,
    ] {
        let options = BookletOptions {
            topology,
            ..Default::default()
        };
        let layout = options.resolve().unwrap();
        let cover = CoverText::new(&options.cover, contacts.len());
        let ctx = RenderContext {
            layout: &layout,
            cover: &cover,
            logo_size: Some((100, 50)),
        };

        let run = || {
            let groups = group_contacts(&contacts);
            let half_pages = build_half_pages(&groups, &layout.heights, &layout.rules).unwrap();
            let imposition = plan_with(half_pages.len(), topology, &layout.policy);
            let sides = render_booklet(&imposition, &half_pages, &ctx);
            (imposition, sides)
        };
        assert_eq!(run(), run(), "{:?}", topology);
    }
}

#[test]
fn test_document_has_page_per_side() {
    for topology in [
        FoldTopology::TwoPanel,
        FoldTopology::FourPanel,
        FoldTopology::EightPanel,
    ] {
        let options = BookletOptions {
            topology,
            ..Default::default()
        };
        let stats = calculate_statistics(&twenty_contacts(), &options).unwrap();
        let doc = build_booklet(&twenty_contacts(), &options).unwrap();
        assert_eq!(doc.get_pages().len(), stats.printed_sides, "{:?}", topology);
    }
}

#[tokio::test]
async fn test_generate_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.pdf");

    let options = BookletOptions {
        topology: FoldTopology::TwoPanel,
        ..Default::default()
    };
    let doc = generate_booklet(&scenario_contacts(), &options)
        .await
        .unwrap();
    save_pdf(doc, &path).await.unwrap();

    let saved = Document::load(&path).unwrap();
    assert_eq!(saved.get_pages().len(), 4);

    // No temporary files left behind
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn test_save_failure_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("contacts.pdf");

    let doc = generate_booklet(&scenario_contacts(), &BookletOptions::default())
        .await
        .unwrap();
    match save_pdf(doc, &path).await {
        Err(BookletError::Write { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected Write error, got {:?}", other),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn test_generate_without_contacts() {
    let result = generate_booklet(&[], &BookletOptions::default()).await;
    assert!(matches!(result, Err(BookletError::NoContacts)));
}
