//! Integration tests for grid inference from pixel bounds

use koala_layout::{
    infer_grid, Constraint, ContainerGeometry, Fill, GridSpan, InferenceItem, Insets,
    KoalaLayout, LayoutChild, Rect, Size, Widget,
};
use pretty_assertions::assert_eq;

fn item(x: i32, y: i32, width: i32, height: i32) -> InferenceItem {
    InferenceItem::new(Rect::new(x, y, width, height), Size::new(width, height))
}

#[test]
fn test_l_shape_gives_two_by_two() {
    let items = [
        item(0, 0, 100, 50),
        item(0, 50, 100, 50),
        item(100, 0, 100, 100),
    ];
    let grid = infer_grid(&items, Size::new(200, 100));

    assert_eq!(grid.axes_x.lines(), &[0, 100, 200]);
    assert_eq!(grid.axes_y.lines(), &[0, 50, 100]);
    assert_eq!((grid.columns(), grid.rows()), (2, 2));
    assert_eq!(grid.constraints[0], Constraint::cell(0, 0, 1, 1));
    assert_eq!(grid.constraints[1], Constraint::cell(0, 1, 1, 1));
    assert_eq!(grid.constraints[2], Constraint::cell(1, 0, 1, 2));
    assert_eq!(grid.constraints[2].grid_height, GridSpan::Cells(2));
}

#[test]
fn test_no_rectangles_give_single_cell() {
    let grid = infer_grid(&[], Size::new(300, 200));
    assert_eq!(grid.axes_x.lines(), &[0, 300]);
    assert_eq!(grid.axes_y.lines(), &[0, 200]);
    assert!(grid.constraints.is_empty());
}

#[test]
fn test_one_rectangle_gives_single_cell() {
    let grid = infer_grid(&[item(20, 10, 50, 30)], Size::new(300, 200));
    assert_eq!(grid.axes_x.lines(), &[0, 300]);
    assert_eq!(grid.axes_y.lines(), &[0, 200]);
    let c = &grid.constraints[0];
    assert_eq!(c.insets, Insets::new(10, 20, 160, 230));
    assert_eq!(c.fill, Fill::Both);
}

#[test]
fn test_residual_offsets_become_insets() {
    let items = [item(10, 10, 80, 30), item(100, 0, 100, 50)];
    let grid = infer_grid(&items, Size::new(200, 50));

    assert_eq!(grid.axes_x.lines(), &[0, 90, 200]);
    assert_eq!(grid.axes_y.lines(), &[0, 40, 50]);
    assert_eq!(grid.constraints[0].insets, Insets::new(10, 10, 0, 0));
    assert_eq!(grid.constraints[1].insets, Insets::new(0, 10, 0, 0));
    assert_eq!(grid.constraints[1].grid_height, GridSpan::Cells(2));
}

#[test]
fn test_aligned_grid_round_trips() {
    let mut items = Vec::new();
    for row in 0..2 {
        for column in 0..3 {
            items.push(item(column * 100, row * 50, 100, 50));
        }
    }
    let grid = infer_grid(&items, Size::new(300, 100));
    assert_eq!((grid.columns(), grid.rows()), (3, 2));

    let names = ["a", "b", "c", "d", "e", "f"];
    let mut layout: KoalaLayout<&str> = grid.into_layout(names).unwrap();
    let mut children: Vec<Widget<&str>> = names
        .iter()
        .map(|name| Widget::new(*name, Size::new(100, 50)))
        .collect();
    layout.layout_container(
        &ContainerGeometry::new(Size::new(300, 100), Insets::zero()),
        &mut children,
    );

    let placed: Vec<Rect> = children.iter().map(|c| c.bounds()).collect();
    let original: Vec<Rect> = items.iter().map(|i| i.bounds).collect();
    assert_eq!(placed, original);
}

#[test]
fn test_pad_survives_round_trip() {
    // Components stretched past their natural size keep the stretch as pad
    let items = [
        InferenceItem::new(Rect::new(0, 0, 100, 40), Size::new(60, 20)),
        InferenceItem::new(Rect::new(100, 0, 100, 40), Size::new(100, 40)),
    ];
    let grid = infer_grid(&items, Size::new(200, 40));
    assert_eq!((grid.constraints[0].pad_x, grid.constraints[0].pad_y), (40, 20));
    assert_eq!((grid.constraints[1].pad_x, grid.constraints[1].pad_y), (0, 0));

    let mut layout = grid.into_layout(["stretched", "natural"]).unwrap();
    let children = vec![
        Widget::new("stretched", Size::new(60, 20)),
        Widget::new("natural", Size::new(100, 40)),
    ];
    assert_eq!(
        layout.preferred_extent(&Insets::zero(), &children),
        Size::new(200, 40)
    );
}

fn round_trip(items: &[InferenceItem], container: Size) -> Vec<Rect> {
    let grid = infer_grid(items, container);
    let keys: Vec<usize> = (0..items.len()).collect();
    let mut layout = grid.into_layout(keys.iter().copied()).unwrap();
    let mut children: Vec<Widget<usize>> = keys
        .iter()
        .zip(items)
        .map(|(&key, item)| Widget::new(key, item.preferred))
        .collect();
    layout.layout_container(
        &ContainerGeometry::new(container, Insets::zero()),
        &mut children,
    );
    children.iter().map(|c| c.bounds()).collect()
}

#[test]
fn test_mixed_spans_round_trip() {
    // Row 0 splits 2+1 columns, row 1 splits 1+2
    let items = [
        item(0, 0, 200, 50),
        item(200, 0, 100, 50),
        item(0, 50, 100, 50),
        item(100, 50, 200, 50),
    ];
    let grid = infer_grid(&items, Size::new(300, 100));
    assert_eq!(grid.axes_x.lines(), &[0, 100, 200, 300]);
    assert_eq!(grid.constraints[0], Constraint::cell(0, 0, 2, 1));
    assert_eq!(grid.constraints[3], Constraint::cell(1, 1, 2, 1));

    let original: Vec<Rect> = items.iter().map(|i| i.bounds).collect();
    assert_eq!(round_trip(&items, Size::new(300, 100)), original);
}

#[test]
fn test_multi_cell_spans_round_trip() {
    // A tall cell on the left, a wide one on top right, two small below it
    let items = [
        item(0, 0, 100, 100),
        item(100, 0, 200, 50),
        item(100, 50, 100, 50),
        item(200, 50, 100, 50),
    ];
    let original: Vec<Rect> = items.iter().map(|i| i.bounds).collect();
    assert_eq!(round_trip(&items, Size::new(300, 100)), original);

    let l_shape = [
        item(0, 0, 100, 50),
        item(0, 50, 100, 50),
        item(100, 0, 100, 100),
    ];
    let original: Vec<Rect> = l_shape.iter().map(|i| i.bounds).collect();
    assert_eq!(round_trip(&l_shape, Size::new(200, 100)), original);
}

#[test]
fn test_grid_line_with_empty_cell_beside_it_survives() {
    // Nothing occupies columns 2..3 of row 0, but the first rectangle still
    // ends on the line at 200
    let items = [
        item(0, 0, 200, 50),
        item(0, 50, 100, 50),
        item(100, 50, 200, 50),
    ];
    let grid = infer_grid(&items, Size::new(300, 100));
    assert_eq!(grid.axes_x.lines(), &[0, 100, 200, 300]);
    let original: Vec<Rect> = items.iter().map(|i| i.bounds).collect();
    assert_eq!(round_trip(&items, Size::new(300, 100)), original);
}

fn strips(spans: &[(i32, i32)]) -> Vec<InferenceItem> {
    spans
        .iter()
        .map(|&(start, end)| item(start, 0, end - start, 10))
        .collect()
}

#[test]
fn test_equal_crossing_shift_prefers_earliest_rectangle() {
    // The seeded axis at 70 cuts three strips. Moving it to the leading edge
    // of (60, 100) or of (40, 100) cuts two either way; the earlier strip wins.
    let items = strips(&[(20, 100), (60, 100), (40, 100), (60, 70), (30, 60)]);
    let grid = infer_grid(&items, Size::new(100, 10));
    assert_eq!(grid.axes_x.lines(), &[0, 60, 100]);
    assert_eq!(grid.axes_y.lines(), &[0, 10]);
}

#[test]
fn test_input_order_changes_inferred_axes() {
    let items = strips(&[(20, 100), (40, 100), (60, 100), (60, 70), (30, 60)]);
    let grid = infer_grid(&items, Size::new(100, 10));
    assert_eq!(grid.axes_x.lines(), &[0, 100]);
    assert_eq!(grid.axes_y.lines(), &[0, 10]);
}

#[test]
fn test_extreme_coordinates_do_not_overflow() {
    let items = [item(i32::MAX - 10, 0, 100, 10), item(0, 0, 50, 10)];
    let grid = infer_grid(&items, Size::new(100, 10));
    assert_eq!(grid.axes_x.lines(), &[0, 50, 100]);
    assert_eq!(grid.constraints.len(), 2);
}

#[test]
fn test_inference_is_deterministic() {
    let items = [
        item(0, 0, 120, 40),
        item(60, 40, 140, 40),
        item(0, 80, 200, 20),
    ];
    let first = infer_grid(&items, Size::new(200, 100));
    let second = infer_grid(&items, Size::new(200, 100));
    assert_eq!(first, second);
}
