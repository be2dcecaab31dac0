use super::*;

fn stack(entries: &[&'static str]) -> HistoryStack<&'static str> {
    let mut history = HistoryStack::new();
    for entry in entries {
        history.push(*entry);
    }
    history
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn new_stack_is_empty_without_cursor() {
    let history: HistoryStack<&str> = HistoryStack::new();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert_eq!(history.current(), None);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn reset_always_yields_single_entry() {
    for prior in [&[][..], &["a"][..], &["a", "b", "c"][..]] {
        let mut history = stack(prior);
        history.undo();
        history.reset("x");
        assert_eq!(history.entries(), &["x"]);
        assert_eq!(history.cursor(), Some(0));
    }
}

#[test]
fn first_push_on_empty_stack_sets_cursor_zero() {
    let history = stack(&["a"]);
    assert_eq!(history.cursor(), Some(0));
    assert!(!history.can_undo());
}

// =============================================================================
// PUSH / UNDO / REDO
// =============================================================================

#[test]
fn linear_pushes_undo_back_to_first() {
    let entries = ["s1", "s2", "s3", "s4", "s5"];
    let mut history = stack(&entries);
    assert!(history.can_undo());

    for _ in 0..entries.len() - 1 {
        assert!(history.undo().is_some());
    }
    assert_eq!(history.current(), Some(&"s1"));
    assert!(!history.can_undo());
}

#[test]
fn can_undo_becomes_true_after_second_push() {
    let mut history = stack(&["a"]);
    assert!(!history.can_undo());
    history.push("b");
    assert!(history.can_undo());
}

#[test]
fn branch_truncation_discards_redo_entries() {
    let mut history = stack(&["a", "b", "c"]);
    history.undo();
    history.undo();
    history.push("d");

    assert_eq!(history.entries(), &["a", "d"]);
    assert_eq!(history.cursor(), Some(1));
    assert!(!history.can_redo());
    assert_eq!(history.redo(), None);
    assert_eq!(history.entries(), &["a", "d"]);
}

#[test]
fn undo_then_redo_returns_entries() {
    let mut history = stack(&["a", "b"]);
    assert_eq!(history.undo(), Some(&"a"));
    assert_eq!(history.redo(), Some(&"b"));
}

#[test]
fn undo_at_oldest_entry_is_a_noop() {
    let mut history = stack(&["a", "b"]);
    history.undo();
    let before = history.clone();
    assert_eq!(history.undo(), None);
    assert_eq!(history, before);
}

#[test]
fn redo_at_tip_is_a_noop() {
    let mut history = stack(&["a", "b"]);
    let before = history.clone();
    assert_eq!(history.redo(), None);
    assert_eq!(history, before);
}

#[test]
fn navigation_on_empty_stack_is_a_noop() {
    let mut history: HistoryStack<&str> = HistoryStack::new();
    assert_eq!(history.undo(), None);
    assert_eq!(history.redo(), None);
    assert_eq!(history.cursor(), None);
}

// =============================================================================
// PEEK
// =============================================================================

#[test]
fn peek_does_not_move_cursor() {
    let mut history = stack(&["a", "b", "c"]);
    history.undo();

    assert_eq!(history.peek_undo(), Some(&"a"));
    assert_eq!(history.peek_redo(), Some(&"c"));
    assert_eq!(history.cursor(), Some(1));
}

#[test]
fn peek_at_boundaries_is_none() {
    let history = stack(&["a"]);
    assert_eq!(history.peek_undo(), None);
    assert_eq!(history.peek_redo(), None);
}

#[test]
fn seek_moves_to_absolute_index_without_truncating() {
    let mut history = stack(&["a", "b", "c"]);
    assert_eq!(history.seek(0), Some(&"a"));
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.len(), 3);
    assert!(history.can_redo());

    assert_eq!(history.seek(3), None);
    assert_eq!(history.cursor(), Some(0), "out of range leaves cursor");
}
