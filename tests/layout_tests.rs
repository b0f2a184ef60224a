use rstoryline::core::layout::{
    Breakpoint, LayoutConfig, SerpentineLayout, compute_serpentine_layout,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn test_events_per_row_breakpoints() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.events_per_row(1200.0), 4);
    assert_eq!(cfg.events_per_row(901.0), 4);
    assert_eq!(cfg.events_per_row(900.0), 3);
    assert_eq!(cfg.events_per_row(700.0), 3);
    assert_eq!(cfg.events_per_row(500.0), 2);
    assert_eq!(cfg.events_per_row(400.0), 1);
    assert_eq!(cfg.events_per_row(320.0), 1);
}

#[test]
fn test_columns_never_decrease_with_width() {
    let cfg = LayoutConfig::default();
    let mut previous = 0;
    for w in (100..3000).step_by(25) {
        let cols = cfg.events_per_row(w as f64);
        assert!(cols >= previous, "width {w}: {cols} < {previous}");
        previous = cols;
    }
}

#[test]
fn test_second_row_runs_right_to_left() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(5, 1000.0, &cfg);

    assert_eq!(layout.events_per_row, 4);
    assert_eq!(layout.row_count, 2);

    let spacing = 800.0 / 3.0;
    for col in 0..4 {
        let p = layout.position(col).unwrap();
        assert!(close(p.x, 100.0 + col as f64 * spacing));
        assert!(close(p.y, 100.0));
    }

    let p4 = layout.position(4).unwrap();
    assert!(close(p4.x, 900.0));
    assert!(close(p4.y, 280.0));
    assert_eq!(layout.nodes[4].row, 1);
    assert_eq!(layout.nodes[4].column, 0);
    assert_eq!(layout.nodes[4].display_column, 3);
}

#[test]
fn test_rows_alternate_direction() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(12, 1000.0, &cfg);

    for row in 0..layout.row_count {
        let xs: Vec<f64> = layout
            .nodes
            .iter()
            .filter(|n| n.row == row)
            .map(|n| n.position.x)
            .collect();

        if row % 2 == 0 {
            assert!(xs.windows(2).all(|w| w[0] < w[1]), "row {row}: {xs:?}");
        } else {
            assert!(xs.windows(2).all(|w| w[0] > w[1]), "row {row}: {xs:?}");
        }
    }
}

#[test]
fn test_y_never_decreases_and_rows_have_distinct_x() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(15, 700.0, &cfg);

    assert!(layout.nodes.windows(2).all(|w| w[0].position.y <= w[1].position.y));

    for row in 0..layout.row_count {
        let mut xs: Vec<f64> = layout.row_nodes(row).iter().map(|n| n.position.x).collect();
        let before = xs.len();
        xs.dedup_by(|a, b| close(*a, *b));
        assert_eq!(xs.len(), before);
    }
}

#[test]
fn test_path_turns_on_the_same_side() {
    // The last node of a row and the first of the next share x.
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(9, 1000.0, &cfg);

    assert!(close(layout.nodes[3].position.x, layout.nodes[4].position.x));
    assert!(close(layout.nodes[7].position.x, layout.nodes[8].position.x));
}

#[test]
fn test_single_column_is_centred() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(3, 360.0, &cfg);

    assert_eq!(layout.events_per_row, 1);
    for (i, node) in layout.nodes.iter().enumerate() {
        assert!(close(node.position.x, 180.0));
        assert!(close(node.position.y, 100.0 + i as f64 * 180.0));
    }
}

#[test]
fn test_canvas_height_counts_rows() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(5, 1000.0, &cfg);
    assert!(close(layout.canvas_height, 2.0 * 180.0 + 100.0 + 100.0));

    let empty = SerpentineLayout::compute(0, 1000.0, &cfg);
    assert!(empty.is_empty());
    assert_eq!(empty.row_count, 0);
    assert!(empty.svg_path_data().is_empty());
}

#[test]
fn test_resizing_recomputes_every_position() {
    let cfg = LayoutConfig::default();
    let wide = compute_serpentine_layout(6, 1000.0, &cfg);
    let narrow = compute_serpentine_layout(6, 500.0, &cfg);

    assert_eq!(wide.len(), 6);
    assert_eq!(narrow.len(), 6);
    // 2 per row at 500px: index 2 starts the second row on the right.
    assert!(close(narrow[2].x, 400.0));
    assert!(close(narrow[2].y, 280.0));
    assert!(close(wide[2].y, 100.0));
}

#[test]
fn test_svg_path_data_follows_nodes() {
    let cfg = LayoutConfig::default();
    let layout = SerpentineLayout::compute(2, 500.0, &cfg);
    assert_eq!(layout.svg_path_data(), "M 100.0 100.0 L 400.0 100.0");
}

#[test]
fn test_validate_rejects_bad_configs() {
    assert!(LayoutConfig::default().validate().is_ok());

    let cfg = LayoutConfig {
        row_height: 0.0,
        ..LayoutConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = LayoutConfig {
        breakpoints: vec![
            Breakpoint {
                min_width: 900.0,
                columns: 2,
            },
            Breakpoint {
                min_width: 600.0,
                columns: 3,
            },
        ],
        ..LayoutConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = LayoutConfig {
        breakpoints: vec![Breakpoint {
            min_width: 150.0,
            columns: 2,
        }],
        ..LayoutConfig::default()
    };
    assert!(cfg.validate().is_err());
}
