use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn leaf(axis: VarAxis, phase_offset: f64, dir: PhaseDirection, frequency: u32) -> ExprNode {
    ExprNode::Variable {
        axis,
        phase_offset,
        phase_direction: dir,
        frequency,
    }
}

fn collect_trig_directions(node: &ExprNode, level: i32, out: &mut Vec<(i32, PhaseDirection)>) {
    match node {
        ExprNode::Variable { .. } => {}
        ExprNode::Trig {
            child,
            phase_direction,
            ..
        } => {
            out.push((level + 1, *phase_direction));
            collect_trig_directions(child, level + 1, out);
        }
        ExprNode::Product { operands } => {
            collect_trig_directions(&operands[0], level, out);
            collect_trig_directions(&operands[1], level, out);
        }
    }
}

#[test]
fn zero_probability_always_builds_a_leaf() {
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let node = build_expression(&mut rng, 0.0);
        assert!(node.is_terminal(), "seed {seed}: {node}");
    }
}

#[test]
fn certain_probability_still_terminates() {
    let mut rng = StdRng::seed_from_u64(3);
    let node = build_expression(&mut rng, 1.0);
    assert!(node.depth() <= MAX_TREE_DEPTH as usize + 1);
    assert!(!node.is_terminal());
}

#[test]
fn leaves_have_valid_parameters() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let tree = ExprNode::random_tree(&mut rng);
        tree.validate().unwrap();
    }
}

#[test]
fn only_first_level_trig_nodes_animate() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen_first = false;
    for _ in 0..200 {
        let tree = build_expression(&mut rng, 0.97);
        let mut dirs = Vec::new();
        collect_trig_directions(&tree, 0, &mut dirs);
        for (level, dir) in dirs {
            if level == 1 {
                seen_first = true;
                assert_ne!(dir, PhaseDirection::Still);
            } else {
                assert_eq!(dir, PhaseDirection::Still);
            }
        }
    }
    assert!(seen_first);
}

#[test]
fn variable_folds_scaled_coordinate() {
    let v = leaf(VarAxis::X, 0.25, PhaseDirection::Still, 2);
    // ((0 + 1) + 0.5) * 2 = 3 -> 3 mod 2 - 1 = 0
    assert!(v.evaluate(Coord::new(0.0, 0.9), 0.0).abs() < 1e-12);
    let v = leaf(VarAxis::Y, 0.0, PhaseDirection::Backward, 1);
    // ((-0.5 + 1) - 2) * 1 = -1.5 -> 0.5 - 1 = -0.5
    assert!((v.evaluate(Coord::new(0.9, -0.5), 0.0) + 0.5).abs() < 1e-12);
}

#[test]
fn variable_ignores_animation_phase() {
    let v = leaf(VarAxis::X, 0.4, PhaseDirection::Forward, 3);
    let c = Coord::new(0.2, -0.3);
    assert_eq!(v.evaluate(c, 0.0), v.evaluate(c, 0.61));
}

#[test]
fn trig_node_applies_frequency_and_phase() {
    let node = ExprNode::Trig {
        kind: TrigKind::Sin,
        child: Box::new(leaf(VarAxis::X, 0.0, PhaseDirection::Still, 1)),
        phase_offset: 0.0,
        phase_direction: PhaseDirection::Forward,
        frequency: 1,
    };
    // child at x = -0.5 is -0.5; phase 0.25 adds a quarter turn.
    let c = Coord::new(-0.5, 0.0);
    assert!((node.evaluate(c, 0.0) - (-PI / 2.0).sin()).abs() < 1e-12);
    assert!((node.evaluate(c, 0.25) - 0.0f64.sin()).abs() < 1e-12);
    assert!((node.evaluate(c, 0.25) - node.evaluate(c, 1.25)).abs() < 1e-9);
}

#[test]
fn still_trig_node_is_frozen() {
    let node = ExprNode::Trig {
        kind: TrigKind::Cos,
        child: Box::new(leaf(VarAxis::Y, 0.3, PhaseDirection::Still, 2)),
        phase_offset: 0.7,
        phase_direction: PhaseDirection::Still,
        frequency: 3,
    };
    let c = Coord::new(0.1, 0.2);
    assert_eq!(node.evaluate(c, 0.1), node.evaluate(c, 0.9));
}

#[test]
fn product_multiplies_operands() {
    let a = leaf(VarAxis::X, 0.0, PhaseDirection::Still, 1);
    let b = leaf(VarAxis::Y, 0.0, PhaseDirection::Still, 1);
    let node = ExprNode::Product {
        operands: Box::new([a, b]),
    };
    let v = node.evaluate(Coord::new(-0.5, 0.5), 0.0);
    assert!((v - (-0.5 * 0.5)).abs() < 1e-12);
    assert_eq!(node.node_count(), 3);
    assert_eq!(node.depth(), 2);
}

#[test]
fn random_trees_are_bounded() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..40 {
        let tree = ExprNode::random_tree(&mut rng);
        for i in 0..=10 {
            for j in 0..=10 {
                let c = Coord::new(-1.0 + 0.2 * f64::from(i), -1.0 + 0.2 * f64::from(j));
                let v = tree.evaluate(c, 0.37);
                assert!((-1.0..=1.0).contains(&v), "{tree} -> {v}");
            }
        }
    }
}

#[test]
fn display_renders_nested_provenance() {
    let node = ExprNode::Trig {
        kind: TrigKind::Sin,
        child: Box::new(ExprNode::Product {
            operands: Box::new([
                leaf(VarAxis::X, 0.123, PhaseDirection::Forward, 2),
                leaf(VarAxis::Y, 0.5, PhaseDirection::Backward, 1),
            ]),
        }),
        phase_offset: 0.25,
        phase_direction: PhaseDirection::Still,
        frequency: 4,
    };
    assert_eq!(
        node.to_string(),
        "sin((pi * x(phase=0.123>, freq=2) * y(phase=0.500<, freq=1) * 4) + phase(0.250=))"
    );
}

#[test]
fn zero_frequency_fails_validation() {
    let node = ExprNode::Trig {
        kind: TrigKind::Cos,
        child: Box::new(leaf(VarAxis::X, 0.0, PhaseDirection::Still, 0)),
        phase_offset: 0.0,
        phase_direction: PhaseDirection::Still,
        frequency: 1,
    };
    assert!(matches!(
        node.validate(),
        Err(FormwaveError::Configuration(_))
    ));
}
