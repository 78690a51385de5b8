use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use bitlife::board::BitBoard;
use bitlife::camera::CameraView;

#[derive(Clone, Debug)]
enum Op {
    Move(i32, i32),
    Zoom(i32),
    Resize(i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-60i32..60, -60i32..60).prop_map(|(dx, dy)| Op::Move(dx, dy)),
        (-8i32..8).prop_map(Op::Zoom),
        (0i32..400, 0i32..400).prop_map(|(w, h)| Op::Resize(w, h)),
    ]
}

/// Each axis is either inside the board or centered on it
fn check_axis(pos: i32, view: i32, extent: i32) -> Result<(), TestCaseError> {
    if view > extent {
        prop_assert_eq!(pos, (extent - view) / 2);
    } else {
        prop_assert!(pos >= 0 && pos <= extent - view, "{} not in 0..={}", pos, extent - view);
    }

    Ok(())
}

fn check_view(view: &CameraView, board: &BitBoard) -> Result<(), TestCaseError> {
    check_axis(view.camera_x(), view.width_in_cells(), board.columns())?;
    check_axis(view.camera_y(), view.height_in_cells(), board.rows())?;

    let fits = view.width_in_cells() <= board.columns() && view.height_in_cells() <= board.rows();
    prop_assert_eq!(view.in_bounds(board), fits);

    prop_assert!(view.movement_speed_in_cells() >= 1);
    prop_assert!((3..=29).contains(&view.cell_size()));

    Ok(())
}

proptest! {
    #[test]
    fn view_stays_clamped(
        rows in 1i32..150,
        columns in 1i32..150,
        window_width in 0i32..400,
        window_height in 0i32..400,
        cell_size in 3i32..30,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let board = BitBoard::new(rows, columns).unwrap();
        let mut view = CameraView::new(window_width, window_height, cell_size, 20, &board);
        check_view(&view, &board)?;

        for op in ops {
            let before = view.clone();

            let changed = match op {
                Op::Move(dx, dy) => view.move_by(dx, dy, &board),
                Op::Zoom(delta) => view.zoom(delta, &board),
                Op::Resize(w, h) => {
                    view.resize_window(w, h, &board);
                    true
                }
            };

            if !changed {
                prop_assert_eq!(&view, &before);
            }

            check_view(&view, &board)?;
        }
    }

    #[test]
    fn rejected_zoom_changes_nothing(cell_size in 3i32..30, delta in -40i32..40) {
        let board = BitBoard::new(100, 100).unwrap();
        let mut view = CameraView::new(320, 240, cell_size, 20, &board);
        let before = view.clone();

        let target = cell_size + delta;
        let accepted = view.zoom(delta, &board);

        if delta == 0 || target <= 2 || target >= 30 {
            prop_assert!(!accepted);
            prop_assert_eq!(view, before);
        } else {
            prop_assert!(accepted);
            prop_assert_eq!(view.cell_size(), target);
            prop_assert_eq!(view.width_in_cells(), 320 / target);
            prop_assert_eq!(view.height_in_cells(), 240 / target);
        }
    }

    #[test]
    fn zoom_keeps_center(
        window_width in 30i32..600,
        window_height in 30i32..600,
        cell_size in 3i32..30,
        dx in -100i32..100,
        dy in -100i32..100,
        delta in -10i32..10,
    ) {
        let board = BitBoard::new(1000, 1000).unwrap();
        let mut view = CameraView::new(window_width, window_height, cell_size, 20, &board);
        prop_assert!(view.move_by(dx, dy, &board));

        let (cx, cy) = view.center();
        if view.zoom(delta, &board) {
            let (nx, ny) = view.center();

            prop_assert!((nx - cx).abs() <= 1, "x center moved from {} to {}", cx, nx);
            prop_assert!((ny - cy).abs() <= 1, "y center moved from {} to {}", cy, ny);
        }
    }

    #[test]
    fn blocked_moves_change_nothing(columns in 1i32..20, dx in -10i32..10, dy in -10i32..10) {
        // 50 cells wide, so never inside a board of fewer than 20 columns
        let board = BitBoard::new(100, columns).unwrap();
        let mut view = CameraView::new(500, 100, 10, 20, &board);
        let before = view.clone();

        prop_assert!(!view.in_bounds(&board));
        prop_assert!(!view.move_by(dx, dy, &board));
        prop_assert_eq!(view, before);
    }
}
