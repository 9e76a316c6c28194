//! End-to-end placement tests: naive layout, relaxation and orientation run
//! through the public pipeline.

use pretty_assertions::assert_eq;
use stitchgraph::layout::{orient, place, place_naive, relax};
use stitchgraph::{
    embed, embed_with_config, link, EmbedConfig, InstructionStream, LayoutConfig, Pattern,
    StitchType, Vec3,
};

fn flat_swatch() -> InstructionStream {
    InstructionStream::slip_knot()
        .stitches(StitchType::Chain, 6, "white")
        .turn()
        .stitches(StitchType::Single, 6, "white")
        .turn()
        .stitches(StitchType::Single, 6, "white")
}

fn cup() -> InstructionStream {
    let mut stream = InstructionStream::magic_ring()
        .stitches(StitchType::Single, 6, "red")
        .end_of_ring();
    for _ in 0..6 {
        stream = stream.increase(StitchType::Single, "red");
    }
    stream.stitches(StitchType::Single, 12, "red")
}

fn naive(stream: &InstructionStream, config: &LayoutConfig) -> Pattern {
    let mut pattern = link(stream).unwrap();
    place_naive(&mut pattern, config);
    pattern
}

#[test]
fn test_every_stitch_gets_a_finite_pose() {
    for stream in [flat_swatch(), cup()] {
        let embedding = embed(&stream).unwrap();
        for node in &embedding.pattern.nodes {
            assert!(node.position.is_finite(), "stitch {}", node.index);
            assert!((node.orientation.length() - 1.0).abs() < 1e-9, "stitch {}", node.index);
        }
    }
}

#[test]
fn test_flat_rows_stack_upwards() {
    let pattern = naive(&flat_swatch(), &LayoutConfig::default());
    let heights: Vec<f64> = pattern
        .rows
        .iter()
        .map(|row| pattern.nodes[row.nodes[0]].position.y)
        .collect();
    assert_eq!(heights, vec![0.0, 1.0, 2.0]);

    // Each child sits directly above its parent
    for node in &pattern.nodes[6..] {
        let parent = pattern.nodes[node.parents[0]].position;
        assert!((node.position.x - parent.x).abs() < 1e-9, "stitch {}", node.index);
    }
}

#[test]
fn test_second_relaxation_moves_less() {
    let config = LayoutConfig::default().with_max_iterations(1000);
    let mut pattern = naive(&flat_swatch(), &config);
    pattern.nodes[8].position += Vec3::new(0.4, 0.3, 0.0);
    pattern.nodes[15].position += Vec3::new(-0.2, 0.6, 0.0);

    let first = relax(&mut pattern, &config);
    assert!(first.converged);
    assert!(first.total_movement > 0.0);
    let second = relax(&mut pattern, &config);
    assert!(second.converged);
    assert!(
        second.total_movement <= first.total_movement,
        "second run moved {} after the first moved {}",
        second.total_movement,
        first.total_movement
    );
}

#[test]
fn test_second_relaxation_of_a_round_moves_less() {
    let config = LayoutConfig::default();
    let mut pattern = naive(&cup(), &config);

    let first = relax(&mut pattern, &config);
    let second = relax(&mut pattern, &config);
    assert!(
        second.total_movement <= first.total_movement,
        "second run moved {} after the first moved {}",
        second.total_movement,
        first.total_movement
    );
}

fn longest_parent_link(pattern: &Pattern) -> f64 {
    pattern
        .nodes
        .iter()
        .flat_map(|node| node.parents.iter().map(move |&p| (node.index, p)))
        .map(|(child, parent)| {
            pattern.nodes[child]
                .position
                .distance(pattern.nodes[parent].position)
        })
        .fold(0.0, f64::max)
}

#[test]
fn test_relaxation_shortens_stretched_links() {
    let config = LayoutConfig::default().with_max_iterations(500);
    let mut pattern = naive(&cup(), &config);
    let before = longest_parent_link(&pattern);
    relax(&mut pattern, &config);
    let after = longest_parent_link(&pattern);

    assert!(after < before, "longest link grew from {} to {}", before, after);
    assert!(pattern.nodes.iter().all(|n| n.position.is_finite()));
}

#[test]
fn test_relaxation_is_reproducible() {
    let a = embed(&cup()).unwrap();
    let b = embed(&cup()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_place_matches_individual_stages() {
    let config = LayoutConfig::default().with_max_iterations(40);

    let mut staged = naive(&cup(), &config);
    let staged_report = relax(&mut staged, &config);
    orient(&mut staged, &config);

    let mut combined = link(&cup()).unwrap();
    let report = place(&mut combined, &config, true);

    assert_eq!(report, Some(staged_report));
    assert_eq!(combined, staged);
}

#[test]
fn test_orientation_follows_working_direction() {
    let config = EmbedConfig::new().with_relaxation(false);
    let embedding = embed_with_config(&flat_swatch(), &config).unwrap();
    let nodes = &embedding.pattern.nodes;

    // Second row is worked right to left, third row left to right
    let back = nodes[8].orientation.rotate(Vec3::X);
    let forth = nodes[14].orientation.rotate(Vec3::X);
    assert!(back.distance(-Vec3::X) < 1e-9, "got {:?}", back);
    assert!(forth.distance(Vec3::X) < 1e-9, "got {:?}", forth);

    // Local Y points up the fabric in both rows
    for index in [8, 14] {
        let up = nodes[index].orientation.rotate(Vec3::Y);
        assert!(up.distance(Vec3::Y) < 1e-9, "stitch {} up is {:?}", index, up);
    }
}

#[test]
fn test_config_from_toml() {
    let layout = LayoutConfig::from_toml_str(
        r#"
stitch_spacing = 2.0
row_spacing = 1.5
max_iterations = 0
"#,
    )
    .unwrap();
    let embedding = embed_with_config(&flat_swatch(), &EmbedConfig::new().with_layout(layout)).unwrap();

    let report = embedding.relaxation.unwrap();
    assert_eq!(report.iterations, 0);
    assert_eq!(embedding.pattern.nodes[6].position, Vec3::new(10.0, 1.5, 0.0));
}
