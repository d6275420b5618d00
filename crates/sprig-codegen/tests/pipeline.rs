//! End-to-end pipeline tests: native scene nodes in, artifacts out.

use proptest::prelude::*;
use sprig_codegen::{aggregate_text_styles, build_ir, codegen_for_language, run, safe_run};
use sprig_core::{
    Color, Diagnostics, Framework, Language, SceneLayoutMode, SceneNode, ScenePaint, Settings,
};

fn text(id: &str, characters: &str, size: f64) -> SceneNode {
    let mut node = SceneNode::new(id, "TEXT")
        .with_name(characters)
        .with_bounds(0.0, 0.0, 80.0, 20.0)
        .with_characters(characters);
    node.font_size = Some(size);
    node
}

fn row(id: &str, gap: f64, children: Vec<SceneNode>) -> SceneNode {
    let mut node = SceneNode::new(id, "FRAME")
        .with_name("Row")
        .with_bounds(0.0, 0.0, 320.0, 40.0);
    node.auto_layout.layout_mode = SceneLayoutMode::Horizontal;
    node.auto_layout.item_spacing = gap;
    node.children = children;
    node
}

fn filled(id: &str, hex: &str) -> SceneNode {
    let color = Color::from_hex(hex).unwrap();
    SceneNode::new(id, "RECTANGLE")
        .with_name("Swatch")
        .with_bounds(0.0, 0.0, 40.0, 40.0)
        .with_fill(ScenePaint::solid(color))
}

fn titles(artifacts: &[sprig_core::CodeArtifact]) -> Vec<(&str, Language)> {
    artifacts
        .iter()
        .map(|a| (a.title.as_str(), a.language))
        .collect()
}

#[test]
fn test_children_keep_source_order_in_every_target() {
    let scene = row(
        "1:1",
        8.0,
        vec![
            text("1:2", "alpha", 14.0),
            text("1:3", "bravo", 14.0),
            text("1:4", "charlie", 14.0),
        ],
    );
    for framework in Framework::ALL {
        let output = run(&[scene.clone()], None, &Settings::for_framework(framework)).unwrap();
        let code = &output.artifacts[0].body;
        let positions: Vec<usize> = ["alpha", "bravo", "charlie"]
            .iter()
            .map(|word| code.find(word).unwrap_or_else(|| panic!("{} missing in {}", word, framework)))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "{} reordered children:\n{}",
            framework,
            code
        );
    }
}

#[test]
fn test_identical_texts_share_one_style() {
    let scene = row(
        "1:1",
        0.0,
        vec![
            text("1:2", "one", 16.0),
            text("1:3", "two", 16.0),
            text("1:4", "three", 16.0),
        ],
    );
    let mut diag = Diagnostics::new();
    let forest = build_ir(&[scene], None, &Settings::default(), &mut diag).unwrap();
    let groups = aggregate_text_styles(&forest);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].node_ids.len(), 3);
    assert_eq!(groups[0].sample, "one");
}

#[test]
fn test_distinct_typographies_give_distinct_styles() {
    let scene = row(
        "1:1",
        0.0,
        vec![
            text("1:2", "title", 24.0),
            text("1:3", "body", 14.0),
            text("1:4", "caption", 12.0),
            text("1:5", "more body", 14.0),
        ],
    );
    let mut diag = Diagnostics::new();
    let forest = build_ir(&[scene], None, &Settings::default(), &mut diag).unwrap();
    let groups = aggregate_text_styles(&forest);
    assert_eq!(groups.len(), 3);
    let sizes: Vec<f64> = groups.iter().map(|g| g.typography.size).collect();
    assert_eq!(sizes, vec![24.0, 14.0, 12.0]);

    let names: std::collections::HashSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names.len(), 3);
}

#[test]
fn test_unknown_node_type_warns_and_continues() {
    let scene = row(
        "1:1",
        0.0,
        vec![
            text("1:2", "before", 14.0),
            SceneNode::new("1:9", "WIDGET").with_bounds(0.0, 0.0, 10.0, 10.0),
            text("1:3", "after", 14.0),
        ],
    );
    for framework in Framework::ALL {
        let output = run(&[scene.clone()], None, &Settings::for_framework(framework)).unwrap();
        let warnings: Vec<_> = output
            .warnings
            .iter()
            .filter(|w| w.node_id.as_str() == "1:9")
            .collect();
        assert_eq!(warnings.len(), 1, "{}", framework);
        assert!(warnings[0].reason.contains("WIDGET"));
        assert!(output.artifacts[0].body.contains("after"));
    }
}

#[test]
fn test_palette_names_exact_and_nearest_colors() {
    let scene = row(
        "1:1",
        0.0,
        vec![
            filled("1:2", "#3b82f6"),
            filled("1:3", "#3b82f7"),
            filled("1:4", "#ff00ff"),
        ],
    );
    let output = run(&[scene], None, &Settings::default()).unwrap();
    let palette = output.artifacts.last().unwrap();
    assert_eq!(palette.title, "Colors");
    assert_eq!(palette.language, Language::Plaintext);

    let lines: Vec<&str> = palette.body.lines().collect();
    assert_eq!(
        lines,
        vec![
            "#3b82f6; // blue-500",
            "#3b82f7; // blue-500 (nearest match)",
            "#ff00ff;",
        ]
    );

    let names: Vec<&str> = output.colors.iter().map(|c| c.color_name.as_str()).collect();
    assert_eq!(names, vec!["blue-500", "blue-500", "#ff00ff"]);
}

#[test]
fn test_tailwind_rounding_snaps_gap_and_keeps_children() {
    let scene = row(
        "1:1",
        8.0,
        vec![filled("1:2", "#ffffff"), filled("1:3", "#000000")],
    );
    let settings = Settings {
        framework: Framework::Tailwind,
        round_tailwind_values: true,
        ..Default::default()
    };
    let output = run(&[scene], None, &settings).unwrap();
    let code = &output.artifacts[0].body;
    assert!(code.contains("gap-2"), "{}", code);
    assert!(!code.contains("gap-8"));

    let children: Vec<&str> = code.lines().filter(|l| l.starts_with("  <div")).collect();
    assert_eq!(children.len(), 2);
    assert!(children[0].contains("bg-white"));
    assert!(children[1].contains("bg-black"));
}

#[test]
fn test_codegen_for_language_sequences() {
    let scene = row("1:1", 4.0, vec![filled("1:2", "#3b82f6"), text("1:3", "label", 14.0)]);
    let settings = Settings::default();

    let html = codegen_for_language("html", &[scene.clone()], &settings).unwrap();
    assert_eq!(
        titles(&html),
        vec![("Code", Language::Html), ("Text Styles", Language::Html)]
    );

    let jsx = codegen_for_language("html_jsx", &[scene.clone()], &settings).unwrap();
    assert!(jsx[0].body.contains("style={{"));

    let tailwind = codegen_for_language("tailwind", &[scene.clone()], &settings).unwrap();
    assert_eq!(
        titles(&tailwind),
        vec![
            ("Code", Language::Html),
            ("Tailwind Colors", Language::Javascript),
            ("Text Styles", Language::Html),
        ]
    );
    assert!(tailwind[1].body.contains("blue-500"));

    let flutter = codegen_for_language("flutter", &[scene.clone()], &settings).unwrap();
    assert_eq!(
        titles(&flutter),
        vec![("Code", Language::Swift), ("Text Styles", Language::Swift)]
    );
    assert!(flutter[0].body.contains("Row("));

    let swiftui = codegen_for_language("swiftUI", &[scene.clone()], &settings).unwrap();
    assert_eq!(
        titles(&swiftui),
        vec![("SwiftUI", Language::Swift), ("Text Styles", Language::Swift)]
    );

    assert!(codegen_for_language("compose", &[scene], &settings)
        .unwrap()
        .is_empty());
}

#[test]
fn test_safe_run_reports_errors_as_messages() {
    let mut hidden = filled("1:1", "#000000");
    hidden.visible = false;
    let message = serde_json::to_value(safe_run(&[hidden], None, &Settings::default())).unwrap();
    assert_eq!(message["type"], "error");
    assert!(message["error"]
        .as_str()
        .unwrap()
        .starts_with("Empty selection"));

    let scene = filled("1:2", "#ffffff");
    let message = serde_json::to_value(safe_run(&[scene], None, &Settings::default())).unwrap();
    assert_eq!(message["type"], "code");
    assert_eq!(message["framework"], "HTML");
    assert_eq!(message["artifacts"][0]["title"], "Code");
    assert_eq!(message["preview"]["width"], 40.0);
}

#[test]
fn test_scene_json_with_lenient_settings() {
    let scene: SceneNode = serde_json::from_str(
        r#"{
            "id": "5:1",
            "name": "Profile Card",
            "type": "FRAME",
            "width": 240,
            "height": 120,
            "layoutMode": "VERTICAL",
            "itemSpacing": 12,
            "paddingTop": 16,
            "paddingBottom": 16,
            "paddingLeft": 16,
            "paddingRight": 16,
            "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}],
            "children": [
                {"id": "5:2", "name": "Name", "type": "TEXT", "characters": "Ada", "width": 100, "height": 24}
            ]
        }"#,
    )
    .unwrap();
    let settings = Settings::from_json_lenient(&serde_json::json!({
        "framework": "SwiftUI",
        "jsx": "sometimes",
        "showLayerNames": true,
        "legacyOption": 3
    }));
    assert!(!settings.jsx);

    let output = run(&[scene], None, &settings).unwrap();
    assert_eq!(output.framework, Framework::SwiftUI);
    let code = &output.artifacts[0].body;
    assert_eq!(output.artifacts[0].language, Language::Swift);
    assert!(code.contains("// Profile Card"), "{}", code);
    assert!(code.contains("VStack"));
    assert!(code.contains("Text(\"Ada\")"));
}

proptest! {
    #[test]
    fn prop_runs_are_deterministic(
        gap in 0.0f64..64.0,
        count in 0usize..5,
        framework in 0usize..4,
    ) {
        let children = (0..count)
            .map(|i| text(&format!("2:{}", i), &format!("item {}", i), 12.0 + i as f64))
            .collect();
        let scene = row("2:0", gap.round(), children);
        let settings = Settings::for_framework(Framework::ALL[framework]);

        let first = serde_json::to_value(run(&[scene.clone()], None, &settings).unwrap()).unwrap();
        let second = serde_json::to_value(run(&[scene], None, &settings).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_text_style_count_matches_distinct_sizes(sizes in prop::collection::vec(10u8..14, 1..8)) {
        let children = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| text(&format!("3:{}", i), "x", f64::from(*size)))
            .collect();
        let mut diag = Diagnostics::new();
        let forest = build_ir(&[row("3:0", 0.0, children)], None, &Settings::default(), &mut diag).unwrap();

        let mut distinct = sizes.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(aggregate_text_styles(&forest).len(), distinct.len());
    }
}
