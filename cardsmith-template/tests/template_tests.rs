use cardsmith_template::{
    check_design, evaluate, next, preview, previous, render, render_with_config, scope,
    substitute, CardDesign, CardError, Deck, EditorState, EditorTab, Face, FieldRecord,
    PreviewConfig, TemplateIssue,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push(filename);
    path
}

fn load_design(filename: &str) -> CardDesign {
    let json = fs::read_to_string(get_fixture_path(filename)).unwrap();
    CardDesign::from_json(&json).unwrap()
}

fn load_deck() -> Deck {
    let json = fs::read_to_string(get_fixture_path("vocab-deck.json")).unwrap();
    Deck::from_json(&json).unwrap()
}

fn load_config() -> PreviewConfig {
    let yaml = fs::read_to_string(get_fixture_path("preview-config.yaml")).unwrap();
    PreviewConfig::from_yaml(&yaml).unwrap()
}

// Rendering properties

#[test]
fn test_template_without_placeholders_is_unchanged() {
    let deck = load_deck();
    let template = "<div class=\"front\"><h1>Static</h1><p>{ not a tag }</p></div>";
    for index in 0..deck.len() {
        let record = deck.record(index).unwrap();
        assert_eq!(render(template, record, Face::Front), template);
        assert_eq!(render(template, record, Face::Back), template);
        assert_eq!(substitute(template, record), template);
    }
}

#[test]
fn test_render_is_idempotent() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    for index in 0..deck.len() {
        let record = deck.record(index).unwrap();
        for face in [Face::Front, Face::Back] {
            let once = render(design.template(face), record, face);
            assert_eq!(render(&once, record, face), once);
        }
    }
}

#[test]
fn test_conditional_examples() {
    let record = FieldRecord::new().with("a", "x");
    assert_eq!(evaluate("{{#a}}YES{{/a}}{{^a}}NO{{/a}}", &record), "YES");

    let record = FieldRecord::new().with("a", "x").with("b", "");
    assert_eq!(evaluate("{{#a}}outer{{#b}}inner{{/b}}{{/a}}", &record), "outer");
}

#[test]
fn test_tags_and_sentinels() {
    let record = FieldRecord::new().with("Tags", vec!["red".to_string(), "blue".to_string()]);
    assert_eq!(substitute("{{Tags}}", &record), "red, blue");

    let record = FieldRecord::new().with("Tags", Vec::<String>::new());
    assert_eq!(substitute("{{Tags}}", &record), "");

    let record = FieldRecord::new().with("picture", "{{picture}}");
    assert_eq!(substitute("{{picture}}", &record), "{{picture}}");
}

#[test]
fn test_blank_front_fallback() {
    let empty = FieldRecord::new();
    let front = render("", &empty, Face::Front);
    assert!(front.contains("The front of this card is blank."));
    assert!(front.contains("empty-front-notice"));
    assert_eq!(render("", &empty, Face::Back), "");

    // A front that only holds a dropped block counts as blank too.
    let front = render("  {{#reading}}{{reading}}{{/reading}}\n", &empty, Face::Front);
    assert!(front.contains("empty-front-notice"));
}

#[test]
fn test_blank_front_uses_configured_notice() {
    let config = load_config();
    let front = render_with_config("", &FieldRecord::new(), Face::Front, &config);
    assert!(front.contains("<p>Nothing on the front yet.</p>"));
    assert!(front.contains(r#"href="https://example.com/help/blank-front""#));
    assert!(front.contains(">Why?</a>"));
}

#[test]
fn test_deep_input_renders_without_crashing() {
    let record = FieldRecord::new().with("term", "深");
    let depth = 20_000;
    let template = format!(
        "{}{{{{term}}}}{}",
        "{{#term}}".repeat(depth),
        "{{/term}}".repeat(depth)
    );
    assert_eq!(render(&template, &record, Face::Back), "深");

    let css = format!("{}h1{{x:y}}{}", "@media screen{".repeat(5_000), "}".repeat(5_000));
    assert!(!scope(&css, ".card").contains("x:y"));
}

// Rendering the fixture design against the fixture deck

#[test]
fn test_front_with_audio_and_sentinel_picture() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let taberu = deck.record(0).unwrap();

    let front = design.render(taberu, Face::Front, &PreviewConfig::default());
    assert!(front.contains(r#"<h1 class="term">食べる</h1>"#));
    assert!(front.contains(r#"<audio id="card-audio-0" src="taberu.mp3""#));
    assert!(!front.contains("picture"));
}

#[test]
fn test_front_with_picture_and_missing_audio() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let neko = deck.record(1).unwrap();

    let front = design.render(neko, Face::Front, &PreviewConfig::default());
    assert!(front.contains(r#"<div class="picture"><img src="neko.png" alt=""></div>"#));
    assert!(!front.contains("<audio"));
}

#[test]
fn test_back_with_reading_and_tags() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let taberu = deck.record(0).unwrap();

    let back = design.render(taberu, Face::Back, &PreviewConfig::default());
    assert!(back.contains(r#"<p class="reading">たべる</p>"#));
    assert!(!back.contains("no reading"));
    assert!(back.contains("<footer>verb, n5</footer>"));
    assert!(back.contains(r#"<p class="translation">to eat</p>"#));
    assert!(back.contains(
        r#"<input type="text" class="type-answer" data-field="reading" placeholder="Type the reading">"#
    ));
    assert!(!back.contains("{{"));
}

#[test]
fn test_back_with_empty_reading_and_no_tags() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let neko = deck.record(1).unwrap();

    let back = design.render(neko, Face::Back, &PreviewConfig::default());
    assert!(back.contains(r#"<p class="reading missing">no reading</p>"#));
    assert!(!back.contains("<footer>"));
}

#[test]
fn test_record_with_absent_fields() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let mizu = deck.record(2).unwrap();

    let front = design.render(mizu, Face::Front, &PreviewConfig::default());
    assert_eq!(
        front,
        "<div class=\"front\">\n  <h1 class=\"term\">水</h1>\n  \n  \n</div>"
    );
}

// CSS scoping

#[test]
fn test_scope_examples() {
    let out = scope(".foo{color:red}", ".card");
    assert!(out.starts_with(".card .foo"));
    assert!(out.contains("color:red"));

    assert_eq!(scope(":root{--x:1}", ".card"), ":root{--x:1}");

    let out = scope(".a{x:y} @import url(a.css);", ".card");
    let import = out.find("@import url(a.css);").unwrap();
    let rule = out.find(".card .a").unwrap();
    assert!(import < rule);
}

#[test]
fn test_fixture_stylesheet_scoping() {
    let design = load_design("vocab-design.json");
    let css = design.scoped_css(&PreviewConfig::default());
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(
        lines,
        vec![
            "@import url(fonts.css);",
            "@keyframes pop { from { opacity: 0 } to { opacity: 1 } }",
            ":root { --accent: teal; }",
            ".card { font-size: 20px; }",
            ".card .term, .card .reading { color: var(--accent); }",
            "@media (max-width: 600px) {",
            ".card .term { font-size: 32px; }",
            "}",
        ]
    );
}

#[test]
fn test_fixture_stylesheet_with_custom_container() {
    let design = load_design("vocab-design.json");
    let css = design.scoped_css(&load_config());
    assert!(css.contains("#preview .card { font-size: 20px; }"));
    assert!(css.contains("#preview .term, #preview .reading"));
    assert!(css.contains(":root { --accent: teal; }"));
}

// Deck loading and navigation

#[test]
fn test_deck_navigation_examples() {
    assert_eq!(next(2, 3), 0);
    assert_eq!(previous(0, 3), 2);
    assert_eq!(next(0, 0), 0);
    assert_eq!(previous(0, 0), 0);
}

#[test]
fn test_deck_keeps_order_and_defaults() {
    let deck = load_deck();
    assert_eq!(deck.keys().collect::<Vec<_>>(), vec!["taberu", "neko", "mizu"]);
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.defaults().unwrap().text("term"), Some("単語"));
}

#[test]
fn test_deck_errors() {
    let result = Deck::from_json(r#"{"ok": {"term": "a"}, "bad": {"term": 5}}"#);
    assert!(matches!(
        result,
        Err(CardError::InvalidRecord { ref key, .. }) if key == "bad"
    ));

    assert!(matches!(Deck::from_json("[1, 2]"), Err(CardError::Json(_))));

    let deck = load_deck();
    assert!(matches!(
        deck.require(7),
        Err(CardError::RecordOutOfRange { index: 7, count: 3 })
    ));
    assert!(matches!(
        Deck::from_json("{}").unwrap().require(0),
        Err(CardError::EmptyDeck)
    ));
}

// Editor state

#[test]
fn test_editor_walks_the_deck() {
    let deck = load_deck();
    let mut editor = EditorState::new(load_design("vocab-design.json"));
    let config = PreviewConfig::default();

    assert!(editor.preview(&deck, &config).html.contains("食べる"));
    assert_eq!(editor.next_card(&deck), 1);
    assert!(editor.preview(&deck, &config).html.contains("猫"));
    assert_eq!(editor.next_card(&deck), 2);
    assert_eq!(editor.next_card(&deck), 0);
    assert_eq!(editor.previous_card(&deck), 2);
    assert!(editor.preview(&deck, &config).html.contains("水"));
}

#[test]
fn test_editor_edit_updates_preview() {
    let deck = load_deck();
    let mut editor = EditorState::new(load_design("vocab-design.json"));
    let config = PreviewConfig::default();

    editor.mark_copied();
    editor.select_tab(EditorTab::CardCss);
    assert!(!editor.copied());

    editor.edit_active("h1 { color: red }");
    assert_eq!(editor.preview(&deck, &config).css, ".card h1 { color: red }");

    editor.select_face(Face::Back);
    assert!(editor.preview(&deck, &config).html.contains("<footer>verb, n5</footer>"));
}

#[test]
fn test_editor_on_empty_deck_uses_defaults() {
    let deck = Deck::from_json(r#"{"default": {"term": "例"}}"#).unwrap();
    let editor = EditorState::new(load_design("vocab-design.json"));
    let preview = editor.preview(&deck, &PreviewConfig::default());
    assert!(preview.html.contains("例"));
}

// Design files

#[test]
fn test_design_export_round_trip() {
    let design = load_design("vocab-design.json");
    let exported = design.to_json().unwrap();
    assert!(exported.contains("\"frontHtml\""));
    assert_eq!(CardDesign::from_json(&exported).unwrap(), design);
}

#[test]
fn test_clean_design_has_no_issues() {
    assert!(check_design(&load_design("vocab-design.json")).is_empty());
}

#[test]
fn test_broken_design_issues() {
    let issues = check_design(&load_design("broken-design.json"));
    assert_eq!(
        issues,
        vec![
            (
                Face::Front,
                TemplateIssue::UnmatchedClose {
                    name: "reading".to_string()
                }
            ),
            (
                Face::Front,
                TemplateIssue::UnclosedBlock {
                    name: "term".to_string()
                }
            ),
            (
                Face::Front,
                TemplateIssue::UnknownPlaceholder {
                    name: "Front".to_string()
                }
            ),
            (
                Face::Back,
                TemplateIssue::UnclosedBlock {
                    name: "reading".to_string()
                }
            ),
        ]
    );
}

#[test]
fn test_broken_design_still_renders() {
    let design = load_design("broken-design.json");
    let record = FieldRecord::new().with("term", "犬").with("reading", "いぬ");
    let front = design.render(&record, Face::Front, &PreviewConfig::default());
    assert_eq!(front, "{{#term}}<h1>犬</h1>{{/reading}}{{Front}}");
}

// Preview documents

#[test]
fn test_preview_document_with_custom_container() {
    let deck = load_deck();
    let design = load_design("vocab-design.json");
    let html = preview::document(&design, deck.record(0).unwrap(), Face::Back, &load_config());

    assert!(html.contains("<title>Vocabulary</title>"));
    assert!(html.contains(r#"<div id="preview">"#));
    assert!(html.contains("#preview .term, #preview .reading"));
    assert!(html.contains("<footer>verb, n5</footer>"));
}
