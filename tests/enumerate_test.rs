//! Consumer-side tests: iterate generated-style modules through the public
//! range types, exactly as engine code does with the emitted artifact.

use res_id::{IdRange, MultiRange, ResId, Run};

// Mirrors the artifact the generator emits for the table
//   sfx/jump = 2, ui/icons/save = 12, ui/icons/load = 13, ui/cursor = 20.
#[rustfmt::skip]
#[allow(dead_code)]
pub mod resources {
    pub mod sfx {
        pub const JUMP: ::res_id::ResId = ::res_id::ResId::from_raw(2);
        pub const fn enumerate() -> ::res_id::IdRange<::res_id::ResId> {
            ::res_id::IdRange::new(2, 3)
        }
    }
    pub mod ui {
        pub mod icons {
            pub const SAVE: ::res_id::ResId = ::res_id::ResId::from_raw(12);
            pub const LOAD: ::res_id::ResId = ::res_id::ResId::from_raw(13);
            pub const fn enumerate() -> ::res_id::IdRange<::res_id::ResId> {
                ::res_id::IdRange::new(12, 14)
            }
        }
        pub const CURSOR: ::res_id::ResId = ::res_id::ResId::from_raw(20);
        pub const fn enumerate() -> ::res_id::MultiRange<::res_id::ResId, 2> {
            ::res_id::MultiRange::new([
                ::res_id::Run::new(12, 14),
                ::res_id::Run::new(20, 21),
            ])
        }
    }
    pub const fn enumerate() -> ::res_id::MultiRange<::res_id::ResId, 3> {
        ::res_id::MultiRange::new([
            ::res_id::Run::new(2, 3),
            ::res_id::Run::new(12, 14),
            ::res_id::Run::new(20, 21),
        ])
    }
}

#[test]
fn leaf_constants_carry_their_ids() {
    assert_eq!(resources::sfx::JUMP, ResId(2));
    assert_eq!(resources::ui::icons::SAVE, ResId(12));
    assert_eq!(resources::ui::icons::LOAD, ResId(13));
    assert_eq!(resources::ui::CURSOR, ResId(20));
}

#[test]
fn inner_scope_enumerates_its_own_ids() {
    let icons: Vec<ResId> = resources::ui::icons::enumerate().iter().collect();
    assert_eq!(icons, vec![ResId(12), ResId(13)]);
    assert_eq!(resources::sfx::enumerate().count(), 1);
}

#[test]
fn ancestor_scope_enumerates_the_descendant_union() {
    let ui: Vec<u32> = resources::ui::enumerate().iter().map(ResId::raw).collect();
    assert_eq!(ui, vec![12, 13, 20]);

    let all: Vec<u32> = resources::enumerate().iter().map(ResId::raw).collect();
    assert_eq!(all, vec![2, 12, 13, 20]);
    assert_eq!(
        resources::enumerate().count(),
        resources::sfx::enumerate().count() + resources::ui::enumerate().count()
    );
}

#[test]
fn scope_ranges_answer_membership() {
    let ui = resources::ui::enumerate();
    assert!(ui.contains(resources::ui::CURSOR.raw()));
    assert!(ui.contains(resources::ui::icons::SAVE.raw()));
    assert!(!ui.contains(resources::sfx::JUMP.raw()));
}

#[test]
fn empty_scope_shape() {
    const EMPTY: IdRange<ResId> = IdRange::new(0, 0);
    assert_eq!(EMPTY.count(), 0);
    assert_eq!(EMPTY.iter().next(), None);
}

#[test]
fn ranges_iterate_independently_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                resources::enumerate()
                    .iter()
                    .map(ResId::raw)
                    .sum::<u32>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2 + 12 + 13 + 20);
    }
}

#[test]
fn res_id_serde_round_trip() {
    let id = ResId(42);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "42");
    let back: ResId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);

    let run = Run::new(3, 9);
    let json = serde_json::to_string(&run).unwrap();
    let back: Run = serde_json::from_str(&json).unwrap();
    assert_eq!(back, run);
}

#[test]
fn res_id_is_pod() {
    use zerocopy::IntoBytes;
    let id = ResId(0x0102_0304);
    assert_eq!(id.as_bytes(), 0x0102_0304u32.as_bytes());

    let run = Run::new(1, 2);
    assert_eq!(run.as_bytes().len(), 8);
}

#[test]
fn multi_range_type_is_copy_and_const() {
    const UI: MultiRange<ResId, 2> =
        MultiRange::new([Run::new(12, 14), Run::new(20, 21)]);
    let a = UI;
    let b = UI;
    assert_eq!(a.count(), b.count());
}
