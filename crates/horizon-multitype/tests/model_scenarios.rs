//! End-to-end scenarios for the heterogeneous list model.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_multitype::{
    ContainerFactory, Error, Item, ItemBinder, ItemContainer, ItemSource, ModelChange,
    MultiTypeModel, MultiTypeModelBuilder, TypeTag, ViewLifecycle,
};
use parking_lot::Mutex;

const A: TypeTag = TypeTag::new(10);
const B: TypeTag = TypeTag::new(20);
const F: TypeTag = TypeTag::new(99);

/// Width of the list the host creates rows in.
struct ListWidth(usize);

#[derive(Default)]
struct Row {
    width: usize,
    text: String,
    visible: bool,
}

impl ViewLifecycle for Row {
    fn on_attached(&mut self) {
        self.visible = true;
    }

    fn on_detached(&mut self) {
        self.visible = false;
    }
}

impl ItemContainer for Row {
    fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle> {
        Some(self)
    }
}

struct RowFactory(TypeTag);

impl ContainerFactory<ListWidth> for RowFactory {
    type Container = Row;

    fn type_tag(&self) -> TypeTag {
        self.0
    }

    fn create(&self, parent: &ListWidth) -> Row {
        Row {
            width: parent.0,
            ..Row::default()
        }
    }
}

struct Entry {
    tag: TypeTag,
    name: &'static str,
}

impl ItemBinder for Entry {
    type Container = Row;

    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn bind(&self, row: &mut Row) {
        row.text = self.name.to_string();
    }
}

fn entry(tag: TypeTag, name: &'static str) -> Item {
    Item::new(Entry { tag, name })
}

fn builder() -> MultiTypeModelBuilder<ListWidth> {
    MultiTypeModelBuilder::new()
        .factory(RowFactory(A))
        .factory(RowFactory(B))
        .factory(RowFactory(F))
}

fn names(model: &MultiTypeModel<ListWidth>) -> Vec<&'static str> {
    model
        .binders()
        .unwrap()
        .iter()
        .filter_map(|item| item.downcast_ref::<Entry>().map(|e| e.name))
        .collect()
}

fn record(model: &MultiTypeModel<ListWidth>) -> Arc<Mutex<Vec<ModelChange>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let recv = changes.clone();
    model
        .signals()
        .changed
        .connect(move |change| recv.lock().push(*change));
    changes
}

fn assert_footer_last(model: &MultiTypeModel<ListWidth>) {
    if let Some(footer) = model.footer().unwrap() {
        let last = model.item_count().unwrap() - 1;
        assert_eq!(model.binder(last).unwrap(), Some(footer));
    }
}

#[test]
fn add_remove_mixed_types() {
    let mut model = builder().build();
    let a1 = entry(A, "a1");
    let b1 = entry(B, "b1");
    let a2 = entry(A, "a2");
    let b2 = entry(B, "b2");

    model.add(a1.clone()).unwrap();
    model.add(b1).unwrap();
    model.add(a2.clone()).unwrap();
    model.add(b2.clone()).unwrap();

    assert_eq!(model.item_count().unwrap(), 4);
    assert_eq!(model.item_type_tag(0).unwrap(), A);
    assert_eq!(model.item_type_tag(1).unwrap(), B);

    model.remove(1).unwrap();

    assert_eq!(model.item_count().unwrap(), 3);
    assert_eq!(model.binders().unwrap(), vec![a1, a2, b2]);
}

#[test]
fn footer_on_empty_model_stays_last() {
    let mut model = builder().build();
    let footer = entry(F, "footer");
    let x = entry(A, "x");

    model.set_footer(footer.clone()).unwrap();
    assert_eq!(model.item_count().unwrap(), 1);
    assert_eq!(model.binder(0).unwrap(), Some(footer.clone()));

    model.add(x.clone()).unwrap();
    assert_eq!(model.item_count().unwrap(), 2);
    assert_eq!(model.binder(0).unwrap(), Some(x));
    assert_eq!(model.binder(1).unwrap(), Some(footer));
}

#[test]
fn setting_same_footer_twice_replaces() {
    let mut model = builder().build();
    model.add(entry(A, "a")).unwrap();
    let footer = entry(F, "footer");

    model.set_footer(footer.clone()).unwrap();
    let count = model.item_count().unwrap();
    assert_eq!(model.footer().unwrap(), Some(footer.clone()));

    model.set_footer(footer.clone()).unwrap();
    assert_eq!(model.item_count().unwrap(), count);
    assert_eq!(model.footer().unwrap(), Some(footer));
}

#[test]
fn add_with_footer_lands_second_to_last() {
    let mut model = builder().build();
    model.set_footer(entry(F, "footer")).unwrap();

    for name in ["a", "b", "c"] {
        let position = model.add(entry(A, name)).unwrap();
        assert_eq!(position, model.item_count().unwrap() - 2);
        assert_footer_last(&model);
    }

    let end = model.item_count().unwrap();
    model.add_at(end, entry(B, "d")).unwrap();
    assert_eq!(model.item_type_tag(model.item_count().unwrap() - 2).unwrap(), B);
    assert_eq!(names(&model), vec!["a", "b", "c", "d", "footer"]);
}

#[test]
fn removing_footer_position_matches_clear_footer() {
    let mut by_remove = builder().build();
    let mut by_clear = builder().build();
    for model in [&mut by_remove, &mut by_clear] {
        model.add_all([entry(A, "a"), entry(B, "b")]).unwrap();
        model.set_footer(entry(F, "footer")).unwrap();
    }

    let last = by_remove.item_count().unwrap() - 1;
    by_remove.remove(last).unwrap();
    by_clear.clear_footer().unwrap();

    for model in [&by_remove, &by_clear] {
        assert_eq!(model.item_count().unwrap(), 2);
        assert!(model.footer().unwrap().is_none());
        assert_eq!(names(model), vec!["a", "b"]);
    }
}

#[test]
fn remove_all_of_includes_matching_footer() {
    let mut model = builder().build();
    model
        .add_all([entry(A, "a"), entry(F, "inline"), entry(B, "b")])
        .unwrap();
    model.set_footer(entry(F, "footer")).unwrap();
    let changes = record(&model);

    assert_eq!(model.remove_all_of(F).unwrap(), 2);

    assert!(model.footer().unwrap().is_none());
    assert_eq!(names(&model), vec!["a", "b"]);
    assert_eq!(
        *changes.lock(),
        vec![ModelChange::removed(3), ModelChange::removed(1)]
    );
}

#[test]
fn snapshots_are_isolated_from_later_mutation() {
    let mut model = builder().build();
    model
        .add_all([entry(A, "a1"), entry(B, "b1"), entry(A, "a2")])
        .unwrap();

    let all = model.binders().unwrap();
    let only_a = model.binders_of(A).unwrap();

    model.clear().unwrap();
    model.add(entry(B, "b2")).unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(only_a.len(), 2);
    assert!(only_a.iter().all(|item| item.type_tag() == A));
}

#[test]
fn notifications_track_item_count() {
    let mut model = builder().build();
    let shadow = Arc::new(Mutex::new(0_usize));
    let count = shadow.clone();
    model.signals().changed.connect(move |change| {
        let mut count = count.lock();
        *count = change.apply_to_count(*count).unwrap_or(0);
    });

    // Deterministic xorshift so failures reproduce.
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    for step in 0..500 {
        let len = model.item_count().unwrap();
        let roll = next();
        let tag = if roll & 1 == 0 { A } else { B };
        let position = (roll as usize >> 8) % (len + 1);
        match roll % 9 {
            0 | 1 => {
                model.add(entry(tag, "x")).unwrap();
            }
            2 => {
                model.add_at(position, entry(tag, "y")).unwrap();
            }
            3 => {
                model.add_all([entry(A, "p"), entry(B, "q")]).unwrap();
            }
            4 if len > 0 => {
                model.remove(position % len).unwrap();
            }
            5 => {
                model.set_footer(entry(F, "footer")).unwrap();
            }
            6 => {
                model.clear_footer().unwrap();
            }
            7 => {
                model.remove_all_of(tag).unwrap();
            }
            8 if step % 50 == 0 => {
                model.clear().unwrap();
            }
            _ => {}
        }

        assert_eq!(*shadow.lock(), model.item_count().unwrap(), "step {step}");
        assert_footer_last(&model);
    }
}

#[test]
fn add_remove_count_without_footer() {
    let mut model = builder().build();
    let mut expected = 0;

    for i in 0..20 {
        model.add(entry(A, "a")).unwrap();
        expected += 1;
        if i % 3 == 0 {
            model.remove(0).unwrap();
            expected -= 1;
        }
    }
    assert!(model.remove(usize::MAX).is_err());

    assert_eq!(model.item_count().unwrap(), expected);
}

#[test]
fn denied_calls_leave_model_untouched() {
    let owning = Arc::new(AtomicBool::new(true));
    let flag = owning.clone();
    let mut model = builder()
        .thread_guard(move || flag.load(Ordering::SeqCst))
        .build();
    model.add(entry(A, "a")).unwrap();
    let footer = entry(F, "footer");
    model.set_footer(footer.clone()).unwrap();

    owning.store(false, Ordering::SeqCst);
    let results = [
        model.add(entry(B, "b")).map(drop),
        model.add_at(0, entry(B, "b")).map(drop),
        model.add_all([entry(B, "b")]).map(drop),
        model.set_footer(entry(F, "other")).map(drop),
        model.clear_footer().map(drop),
        model.remove(0).map(drop),
        model.remove_all_of(A).map(drop),
        model.clear(),
    ];
    for result in results {
        assert!(matches!(result, Err(Error::NotOnOwningThread { .. })));
    }
    owning.store(true, Ordering::SeqCst);

    assert_eq!(model.item_count().unwrap(), 2);
    assert_eq!(model.footer().unwrap(), Some(footer));
}

#[test]
fn model_moved_to_another_thread_rejects_calls() {
    let mut model = builder().build();
    model.add(entry(A, "a")).unwrap();

    let handle = std::thread::spawn(move || {
        let denied = model.add(entry(B, "b"));
        (denied, model)
    });
    let (denied, model) = handle.join().unwrap();

    assert_eq!(
        denied,
        Err(Error::NotOnOwningThread { operation: "add" })
    );
    assert_eq!(model.item_count().unwrap(), 1);
}

#[test]
fn host_renders_through_item_source() {
    let mut model = builder().require_lifecycle(true).build();
    model.add_all([entry(A, "first"), entry(B, "second")]).unwrap();
    model.set_footer(entry(F, "more")).unwrap();

    fn render(source: &dyn ItemSource<ListWidth>) -> Vec<(usize, String, bool)> {
        let parent = ListWidth(40);
        (0..source.item_count().unwrap())
            .map(|position| {
                let tag = source.item_type_tag(position).unwrap();
                let mut handle = source.create_container(tag, &parent).unwrap();
                source.bind(position, &mut handle).unwrap();
                source.container_attached(&mut handle).unwrap();
                let row = handle.downcast_ref::<Row>().unwrap();
                (row.width, row.text.clone(), row.visible)
            })
            .collect()
    }

    assert_eq!(
        render(&model),
        vec![
            (40, "first".to_string(), true),
            (40, "second".to_string(), true),
            (40, "more".to_string(), true),
        ]
    );
}

#[test]
fn unknown_tag_is_reported_at_creation() {
    let model = builder().build();
    let err = model
        .create_container(TypeTag::new(7), &ListWidth(10))
        .unwrap_err();

    assert_eq!(err, Error::UnknownType { tag: TypeTag::new(7) });
    assert!(err.to_string().contains("type 7"));
}
