//! End-to-end scenarios from the document's convergence and coherence
//! requirements, exercised through the public crate surface only.

use annostring::attr::{Attribute, AttributeKind};
use annostring::command::{Command, CommandSet};
use annostring::editor::AnnotationEditor;
use annostring::id::{Id, Site};
use annostring::snapshot::Snapshot;

fn batch(cmds: Vec<Command>) -> CommandSet {
    CommandSet { commands: cmds }
}

#[test]
fn causally_dependent_batch_delivered_out_of_order_is_rejected() {
    let site_a = Site::new(1);
    let site_b = Site::new(2);

    let mut editor_a = AnnotationEditor::new(site_a);
    let mut editor_b = AnnotationEditor::new(site_b);

    let last_a = editor_a.make_insert("hello ", Id::BEGIN, Id::END);
    let batch_a = editor_a.end_edit();

    editor_b.make_insert("world", last_a, Id::END);
    let batch_b = editor_b.end_edit();

    let in_causal_order = Snapshot::new().integrate(&batch_a).unwrap().integrate(&batch_b).unwrap();
    assert_eq!(in_causal_order.render(), "hello world");

    // batch_b anchors on an id only batch_a produced; delivering it first
    // is a causality violation, not a silent reorder.
    assert!(Snapshot::new().integrate(&batch_b).is_err());
}

#[test]
fn disjoint_site_batches_converge_in_either_delivery_order() {
    let mut editor_c = AnnotationEditor::new(Site::new(3));
    editor_c.make_insert("foo", Id::BEGIN, Id::END);
    let batch_c = editor_c.end_edit();

    let mut editor_d = AnnotationEditor::new(Site::new(4));
    editor_d.make_insert("bar", Id::BEGIN, Id::END);
    let batch_d = editor_d.end_edit();

    let order1 = Snapshot::new().integrate(&batch_c).unwrap().integrate(&batch_d).unwrap();
    let order2 = Snapshot::new().integrate(&batch_d).unwrap().integrate(&batch_c).unwrap();

    assert_eq!(order1.render(), order2.render());
}

#[test]
fn idempotent_reintegration_converges() {
    let site = Site::new(1);
    let mut editor = AnnotationEditor::new(site);
    editor.make_insert("abc", Id::BEGIN, Id::END);
    let ops = editor.end_edit();

    let once = Snapshot::new().integrate(&ops).unwrap();
    let twice = once.integrate(&ops).unwrap();

    assert!(once.same_total_identity(&twice) || once.render() == twice.render());
    assert_eq!(once.render(), twice.render());
}

#[test]
fn disjoint_site_commands_commute() {
    let (a, b) = (Id::pack(1, 3), Id::pack(2, 3));
    let insert_a = batch(vec![Command::Insert { id: a, after: Id::BEGIN, before: Id::END, chr: 'a' }]);
    let insert_b = batch(vec![Command::Insert { id: b, after: Id::BEGIN, before: Id::END, chr: 'b' }]);

    let ab = Snapshot::new().integrate(&insert_a).unwrap().integrate(&insert_b).unwrap();
    let ba = Snapshot::new().integrate(&insert_b).unwrap().integrate(&insert_a).unwrap();

    assert_eq!(ab.render(), ba.render());
}

#[test]
fn render_round_trip_with_no_deletes_or_marks() {
    let mut editor = AnnotationEditor::new(Site::new(1));
    editor.make_insert("the quick brown fox", Id::BEGIN, Id::END);
    let ops = editor.end_edit();

    let snap = Snapshot::new().integrate(&ops).unwrap();
    assert_eq!(snap.render(), "the quick brown fox");
}

#[test]
fn annotation_coherence_across_mark_and_delmark() {
    let mut editor = AnnotationEditor::new(Site::new(1));
    let last = editor.make_insert("token", Id::BEGIN, Id::END);
    let ops = editor.end_edit();
    let snap = Snapshot::new().integrate(&ops).unwrap();

    let mut attr_tags = std::collections::BTreeSet::new();
    attr_tags.insert("identifier".to_string());

    let decl_id = Id::pack(1, 100);
    let mark_id = Id::pack(1, 101);
    let first_char = snap
        .cell(Id::BEGIN)
        .map(|c| c.next)
        .expect("begin exists");

    let marked = snap
        .integrate(&batch(vec![Command::Decl { id: decl_id, attribute: Attribute::TagSet(attr_tags) }]))
        .unwrap()
        .integrate(&batch(vec![Command::Mark {
            id: mark_id,
            begin: first_char,
            end: last,
            attribute: decl_id,
            kind: AttributeKind::TagSet,
        }]))
        .unwrap();

    let mut count = 0;
    marked.for_each_annotation(AttributeKind::TagSet, |id, _b, _e, attr| {
        assert!(matches!(attr, Attribute::TagSet(_)));
        if id == mark_id {
            count += 1;
        }
    });
    assert_eq!(count, 1);

    let unmarked = marked.integrate(&batch(vec![Command::DelMark { id: mark_id }])).unwrap();
    let mut count_after = 0;
    unmarked.for_each_annotation(AttributeKind::TagSet, |_id, _b, _e, _attr| count_after += 1);
    assert_eq!(count_after, 0);
}
